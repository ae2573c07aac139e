// src/storage.rs
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::wallet::AccountKeys;

const ACCOUNT_FILE: &str = "account.json";

/// Directory holding the account file: `$STELLAR_WALLET_DIR`, else `$HOME/.stellar_demo_wallet`
pub fn storage_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STELLAR_WALLET_DIR") {
        return PathBuf::from(dir);
    }
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(format!("{home_dir}/.stellar_demo_wallet"))
}

/// Persist the account's public key and keystore, replacing any previous account
pub fn save_account_keys(dir: &Path, keys: &AccountKeys) -> Result<(), StorageError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(ACCOUNT_FILE);
    let serialized = serde_json::to_string_pretty(keys)?;

    // Temp file + rename: the account file is never half-written
    let tmp = dir.join(format!("{ACCOUNT_FILE}.tmp"));
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, &path)?;

    log::info!("Saved account {} to {}", keys.public_key, path.display());
    Ok(())
}

/// Load the stored account, `None` when nothing has been saved yet
pub fn load_account_keys(dir: &Path) -> Result<Option<AccountKeys>, StorageError> {
    let path = dir.join(ACCOUNT_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No account file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let keys: AccountKeys = serde_json::from_str(&data)?;
    log::info!("Loaded account {}", keys.public_key);
    Ok(Some(keys))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "stellar_demo_wallet_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_and_load() {
        let dir = temp_dir("save_load");
        let keys = AccountKeys {
            public_key: "GTEST".to_string(),
            keystore: Some("{\"version\":1}".to_string()),
        };

        assert_eq!(load_account_keys(&dir).unwrap(), None);
        save_account_keys(&dir, &keys).unwrap();
        assert_eq!(load_account_keys(&dir).unwrap(), Some(keys));
        assert!(!dir.join(format!("{ACCOUNT_FILE}.tmp")).exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ACCOUNT_FILE), "{ not json").unwrap();

        assert!(matches!(load_account_keys(&dir), Err(StorageError::Json(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
