// src/network/mod.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TX_TIMEOUT_SECS;
use crate::error::{NetworkError, TransactionError};
use crate::transaction::{Operation, TimeboundPolicy, Transaction};
use crate::wallet::Keypair;

pub mod horizon;

pub use horizon::HorizonClient;

/// One line of an account's balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// `XLM` for the native asset
    pub asset_code: String,
    pub asset_issuer: Option<String>,
    pub balance: String,
}

impl Balance {
    /// Stable row key: `CODE-ISSUER`, or `CODE-native` for lumens
    pub fn key(&self) -> String {
        format!(
            "{}-{}",
            self.asset_code,
            self.asset_issuer.as_deref().unwrap_or("native")
        )
    }
}

/// Account data shown by the account view. Always replaced wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountData {
    pub balances: Vec<Balance>,
}

/// Ledger state needed to build the next transaction
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub account_id: String,
    /// Last consumed sequence number
    pub sequence: i64,
    pub balances: Vec<Balance>,
}

impl AccountRecord {
    pub fn account_data(&self) -> AccountData {
        AccountData {
            balances: self.balances.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub hash: String,
    /// Horizon's verdict; `false` means the transaction did not apply
    pub successful: bool,
}

/// Ledger network capability used by the transaction actions
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Fetch the account, including its current sequence number
    async fn load_account(&self, public_key: &str) -> Result<AccountRecord, NetworkError>;

    /// Submit a signed transaction and wait for the network's verdict
    async fn submit(&self, transaction: &Transaction) -> Result<SubmissionResult, NetworkError>;

    /// Balances for the account view
    async fn load_account_data(&self, public_key: &str) -> Result<AccountData, NetworkError> {
        self.load_account(public_key).await.map(|record| record.account_data())
    }

    /// Create and fund an account on a test network
    async fn fund_account(&self, _public_key: &str) -> Result<(), NetworkError> {
        Err(NetworkError::FriendbotUnavailable)
    }

    /// Window used by `TimeboundPolicy::SubmissionWindow`
    fn default_timeout_secs(&self) -> u64 {
        DEFAULT_TX_TIMEOUT_SECS
    }

    fn build_transaction(
        &self,
        account: &AccountRecord,
        operation: Operation,
        fee: u32,
        network_passphrase: &str,
        policy: TimeboundPolicy,
    ) -> Result<Transaction, TransactionError> {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        Transaction::new(
            &account.account_id,
            account.sequence,
            vec![operation],
            fee,
            network_passphrase,
            policy.resolve(now, self.default_timeout_secs()),
        )
    }

    fn sign(&self, transaction: &mut Transaction, keypair: &Keypair) -> Result<(), TransactionError> {
        transaction.sign(keypair)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_keys() {
        let native = Balance {
            asset_code: "XLM".to_string(),
            asset_issuer: None,
            balance: "1.0".to_string(),
        };
        let usd = Balance {
            asset_code: "USD".to_string(),
            asset_issuer: Some("GISSUER".to_string()),
            balance: "2.0".to_string(),
        };
        assert_eq!(native.key(), "XLM-native");
        assert_eq!(usd.key(), "USD-GISSUER");
    }

    #[tokio::test]
    async fn test_load_account_data_and_default_friendbot() {
        let network = testing::MockNetwork::new();
        let data = network.load_account_data("GABC").await.unwrap();
        assert_eq!(data.balances.len(), 1);
        assert_eq!(data.balances[0].asset_code, "XLM");

        network.mark_missing("GMISSING");
        let missing = network.load_account_data("GMISSING").await;
        assert!(matches!(missing, Err(NetworkError::AccountNotFound(_))));

        let funded = network.fund_account("GABC").await;
        assert!(matches!(funded, Err(NetworkError::FriendbotUnavailable)));
    }
}
