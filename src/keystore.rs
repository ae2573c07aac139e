//! Pincode-protected keystore holding a single Stellar secret seed.
//!
//! The blob is a JSON document:
//!
//! ```text
//! { "version": 1, "kdf": "pbkdf2-sha256", "iterations": 100000,
//!   "salt": <base64>, "nonce": <base64>, "ciphertext": <base64> }
//! ```
//!
//! The plaintext is the `S...` seed. Unlocking re-derives the keypair every
//! time; nothing decrypted is kept around after the call returns.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::KeystoreError;
use crate::pin::{self, PBKDF2_ITERATIONS};
use crate::wallet::{AccountKeys, Keypair};

const KEYSTORE_VERSION: u32 = 1;
const KDF_NAME: &str = "pbkdf2-sha256";
/// Upper bound on a stored iteration count; unlock runs on the UI task
const MAX_ITERATIONS: u32 = 10 * PBKDF2_ITERATIONS;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct KeystoreBlob {
    version: u32,
    kdf: String,
    iterations: u32,
    salt: String,
    nonce: String,
    ciphertext: String,
}

/// Decrypt the keystore with the pincode and rebuild the signing keypair
pub fn unlock(pincode: &str, keystore: &str) -> Result<Keypair, KeystoreError> {
    let blob: KeystoreBlob =
        serde_json::from_str(keystore).map_err(|e| KeystoreError::Malformed(e.to_string()))?;

    if blob.version != KEYSTORE_VERSION || blob.kdf != KDF_NAME {
        return Err(KeystoreError::Malformed(format!(
            "unsupported keystore v{} ({})",
            blob.version, blob.kdf
        )));
    }
    if blob.iterations == 0 || blob.iterations > MAX_ITERATIONS {
        return Err(KeystoreError::Malformed(format!(
            "iteration count {} outside 1..={}",
            blob.iterations, MAX_ITERATIONS
        )));
    }

    let salt = decode_field("salt", &blob.salt)?;
    let nonce = decode_field("nonce", &blob.nonce)?;
    let ciphertext = decode_field("ciphertext", &blob.ciphertext)?;

    let plaintext = pin::decrypt_with_pin(&ciphertext, pincode, &salt, &nonce, blob.iterations)?;
    let secret = std::str::from_utf8(&plaintext).map_err(|_| KeystoreError::InvalidSecret)?;

    Keypair::from_secret(secret).map_err(|_| KeystoreError::InvalidSecret)
}

/// Encrypt the keypair's secret seed under a pincode
pub(crate) fn create_keystore(
    pincode: &str,
    keypair: &Keypair,
    iterations: u32,
) -> Result<String, KeystoreError> {
    let salt = pin::generate_salt();
    let nonce = pin::generate_nonce();
    let secret = keypair.secret();
    let ciphertext = pin::encrypt_with_pin(secret.as_bytes(), pincode, &salt, &nonce, iterations)?;

    let blob = KeystoreBlob {
        version: KEYSTORE_VERSION,
        kdf: KDF_NAME.to_string(),
        iterations,
        salt: STANDARD.encode(salt),
        nonce: STANDARD.encode(nonce),
        ciphertext: STANDARD.encode(ciphertext),
    };

    serde_json::to_string(&blob).map_err(|e| KeystoreError::Encryption(e.to_string()))
}

/// Fresh random account whose secret is locked under `pincode`
pub fn generate_account(pincode: &str) -> Result<AccountKeys, KeystoreError> {
    generate_account_with_iterations(pincode, PBKDF2_ITERATIONS)
}

fn generate_account_with_iterations(pincode: &str, iterations: u32) -> Result<AccountKeys, KeystoreError> {
    let keypair = Keypair::random();
    let keystore = create_keystore(pincode, &keypair, iterations)?;
    log::info!("Generated new account {}", keypair.public_key());
    Ok(AccountKeys {
        public_key: keypair.public_key(),
        keystore: Some(keystore),
    })
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, KeystoreError> {
    STANDARD
        .decode(value)
        .map_err(|e| KeystoreError::Malformed(format!("{name}: {e}")))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_unlock_with_correct_pincode() {
        let keypair = unlock(FIXTURE_PINCODE, &fixture_keystore()).unwrap();
        assert_eq!(keypair.public_key(), fixture_keypair().public_key());
    }

    #[test]
    fn test_unlock_with_wrong_pincode() {
        let result = unlock("0000", &fixture_keystore());
        assert_eq!(result.unwrap_err(), KeystoreError::IncorrectPincode);
    }

    #[test]
    fn test_unlock_malformed_blob() {
        assert!(matches!(unlock("1234", "not json"), Err(KeystoreError::Malformed(_))));

        let mut blob: serde_json::Value = serde_json::from_str(&fixture_keystore()).unwrap();
        blob["salt"] = serde_json::json!("***");
        let tampered = blob.to_string();
        assert!(matches!(unlock("1234", &tampered), Err(KeystoreError::Malformed(_))));
    }

    #[test]
    fn test_unlock_rejects_unknown_version() {
        let mut blob: serde_json::Value = serde_json::from_str(&fixture_keystore()).unwrap();
        blob["version"] = serde_json::json!(7);
        let result = unlock(FIXTURE_PINCODE, &blob.to_string());
        assert!(matches!(result, Err(KeystoreError::Malformed(_))));
    }

    #[test]
    fn test_unlock_rejects_out_of_range_iterations() {
        for iterations in [0, MAX_ITERATIONS + 1, u32::MAX] {
            let mut blob: serde_json::Value = serde_json::from_str(&fixture_keystore()).unwrap();
            blob["iterations"] = serde_json::json!(iterations);
            let result = unlock(FIXTURE_PINCODE, &blob.to_string());
            assert!(matches!(result, Err(KeystoreError::Malformed(_))), "{iterations} accepted");
        }
    }

    #[test]
    fn test_generated_account_unlocks() {
        let keys = generate_account_with_iterations("2468", 1_000).unwrap();
        let keystore = keys.keystore.as_deref().unwrap();
        assert_eq!(unlock("2468", keystore).unwrap().public_key(), keys.public_key);
        assert!(unlock("1357", keystore).is_err());
    }

    #[test]
    fn test_keystore_does_not_contain_plain_secret() {
        let keystore = fixture_keystore();
        assert!(!keystore.contains(fixture_keypair().secret().as_str()));
    }
}
