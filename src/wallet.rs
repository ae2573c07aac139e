// src/wallet.rs
use ed25519_dalek::{Signer, SigningKey};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};
use stellar_strkey::ed25519::{PrivateKey, PublicKey};
use zeroize::Zeroizing;

use crate::error::KeypairError;

/// Account identity handed to the account view by the app shell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeys {
    pub public_key: String,
    /// Encrypted secret key, see `keystore::unlock`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore: Option<String>,
}

/// Ed25519 signing keypair. Built for one signing operation and then dropped.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair
    pub fn random() -> Self {
        let mut csprng = OsRng;
        let secret_bytes: [u8; 32] = csprng.gen();
        Self::from_seed(&secret_bytes)
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct from an `S...` secret seed
    pub fn from_secret(secret: &str) -> Result<Self, KeypairError> {
        let key = PrivateKey::from_string(secret.trim()).map_err(|_| KeypairError::InvalidSecret)?;
        Ok(Self::from_seed(&key.0))
    }

    /// `G...` account id
    pub fn public_key(&self) -> String {
        PublicKey(self.public_key_bytes()).to_string()
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// `S...` secret seed, wiped from memory when the returned value drops
    pub fn secret(&self) -> Zeroizing<String> {
        Zeroizing::new(PrivateKey(self.signing_key.to_bytes()).to_string())
    }

    /// Last four bytes of the public key, used by the network to pick the signer
    pub fn signature_hint(&self) -> [u8; 4] {
        let pk = self.public_key_bytes();
        [pk[28], pk[29], pk[30], pk[31]]
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Decode a `G...` account id into its raw ed25519 key
pub fn decode_public_key(account_id: &str) -> Result<[u8; 32], KeypairError> {
    PublicKey::from_string(account_id.trim())
        .map(|pk| pk.0)
        .map_err(|_| KeypairError::InvalidPublicKey(account_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    #[test]
    fn test_secret_round_trip() {
        let keypair = Keypair::random();
        let secret = keypair.secret();
        assert!(secret.starts_with('S'));
        assert_eq!(secret.len(), 56);

        let restored = Keypair::from_secret(&secret).unwrap();
        assert_eq!(restored.public_key(), keypair.public_key());
        assert!(keypair.public_key().starts_with('G'));
    }

    #[test]
    fn test_rejects_public_key_as_secret() {
        let keypair = Keypair::from_seed(&[3u8; 32]);
        assert_eq!(
            Keypair::from_secret(&keypair.public_key()).unwrap_err(),
            KeypairError::InvalidSecret
        );
        assert!(Keypair::from_secret("").is_err());
    }

    #[test]
    fn test_signature_verifies() {
        let keypair = Keypair::from_seed(&[9u8; 32]);
        let sig = keypair.sign(b"payload");
        let signature = Signature::from_bytes(&sig);
        let verifying_key = VerifyingKey::from_bytes(&keypair.public_key_bytes()).unwrap();
        assert!(verifying_key.verify(b"payload", &signature).is_ok());
        assert_eq!(&keypair.signature_hint(), &keypair.public_key_bytes()[28..]);
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = Keypair::from_seed(&[5u8; 32]);
        let printed = format!("{:?}", keypair);
        assert!(!printed.contains(keypair.secret().as_str()));
        assert!(printed.contains(&keypair.public_key()));
    }

    #[test]
    fn test_account_keys_json_shape() {
        let keys = AccountKeys {
            public_key: "GABC".to_string(),
            keystore: Some("blob".to_string()),
        };
        let json = serde_json::to_string(&keys).unwrap();
        assert_eq!(json, r#"{"publicKey":"GABC","keystore":"blob"}"#);
    }
}
