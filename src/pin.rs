// src/pin.rs
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::KeystoreError;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
const KEY_LENGTH: usize = 32; // 256 bits for AES-256
pub const SALT_LENGTH: usize = 16;
pub const NONCE_LENGTH: usize = 12;

/// Derive encryption key from a pincode using PBKDF2
pub fn derive_key_from_pin(pin: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(pin.as_bytes(), salt, iterations, &mut key[..]);
    key
}

pub fn generate_salt() -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    salt
}

pub fn generate_nonce() -> [u8; NONCE_LENGTH] {
    let mut nonce = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt data with a pincode-derived key
pub fn encrypt_with_pin(
    data: &[u8],
    pin: &str,
    salt: &[u8],
    nonce: &[u8; NONCE_LENGTH],
    iterations: u32,
) -> Result<Vec<u8>, KeystoreError> {
    let key = derive_key_from_pin(pin, salt, iterations);
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| KeystoreError::Encryption(format!("failed to create cipher: {}", e)))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), data)
        .map_err(|e| KeystoreError::Encryption(e.to_string()))
}

/// Decrypt data with a pincode-derived key. A wrong pincode fails AEAD authentication.
pub fn decrypt_with_pin(
    ciphertext: &[u8],
    pin: &str,
    salt: &[u8],
    nonce: &[u8],
    iterations: u32,
) -> Result<Zeroizing<Vec<u8>>, KeystoreError> {
    if nonce.len() != NONCE_LENGTH {
        return Err(KeystoreError::Malformed(format!(
            "nonce must be {} bytes, got {}",
            NONCE_LENGTH,
            nonce.len()
        )));
    }

    let key = derive_key_from_pin(pin, salt, iterations);
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| KeystoreError::Encryption(format!("failed to create cipher: {}", e)))?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| KeystoreError::IncorrectPincode)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keeps the tests fast; production blobs use PBKDF2_ITERATIONS
    const TEST_ITERATIONS: u32 = 1_000;

    #[test]
    fn test_encryption_decryption() {
        let salt = generate_salt();
        let nonce = generate_nonce();
        let data = b"SBTESTSECRET";

        let encrypted = encrypt_with_pin(data, "1234", &salt, &nonce, TEST_ITERATIONS).unwrap();
        let decrypted = decrypt_with_pin(&encrypted, "1234", &salt, &nonce, TEST_ITERATIONS).unwrap();

        assert_eq!(data.to_vec(), *decrypted);
    }

    #[test]
    fn test_wrong_pin_fails() {
        let salt = generate_salt();
        let nonce = generate_nonce();

        let encrypted = encrypt_with_pin(b"secret", "1234", &salt, &nonce, TEST_ITERATIONS).unwrap();
        let result = decrypt_with_pin(&encrypted, "4321", &salt, &nonce, TEST_ITERATIONS);

        assert_eq!(result.unwrap_err(), KeystoreError::IncorrectPincode);
    }

    #[test]
    fn test_short_nonce_is_malformed() {
        let salt = generate_salt();
        let result = decrypt_with_pin(b"whatever", "1234", &salt, &[0u8; 4], TEST_ITERATIONS);
        assert!(matches!(result, Err(KeystoreError::Malformed(_))));
    }
}
