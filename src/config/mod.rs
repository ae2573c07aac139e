use serde::{Deserialize, Serialize};

pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const TESTNET_FRIENDBOT_URL: &str = "https://friendbot.stellar.org";

/// Minimum fee per operation, in stroops
pub const BASE_FEE: u32 = 100;

/// Validity window given to a transaction built with the submission-window policy
pub const DEFAULT_TX_TIMEOUT_SECS: u64 = 30;

/// Network settings shared by the Horizon client and the transaction actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub horizon_url: String,
    pub network_passphrase: String,
    /// Fee per operation, in stroops
    pub base_fee: u32,
    pub tx_timeout_secs: u64,
    /// Friendbot endpoint, only present on test networks
    pub friendbot_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            horizon_url: TESTNET_HORIZON_URL.to_string(),
            network_passphrase: TESTNET_PASSPHRASE.to_string(),
            base_fee: BASE_FEE,
            tx_timeout_secs: DEFAULT_TX_TIMEOUT_SECS,
            friendbot_url: Some(TESTNET_FRIENDBOT_URL.to_string()),
            request_timeout_secs: 30,
        }
    }
}

impl NetworkConfig {
    /// Load network configuration from environment variables, falling back to testnet
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            horizon_url: lookup("STELLAR_HORIZON_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.horizon_url),
            network_passphrase: lookup("STELLAR_NETWORK_PASSPHRASE")
                .unwrap_or(defaults.network_passphrase),
            base_fee: lookup("STELLAR_BASE_FEE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.base_fee),
            tx_timeout_secs: lookup("STELLAR_TX_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tx_timeout_secs),
            // An empty value switches friendbot off
            friendbot_url: match lookup("STELLAR_FRIENDBOT_URL") {
                Some(v) if v.is_empty() => None,
                Some(v) => Some(v),
                None => defaults.friendbot_url,
            },
            request_timeout_secs: lookup("STELLAR_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Check if the configuration is usable
    pub fn is_valid(&self) -> bool {
        !self.horizon_url.is_empty() && !self.network_passphrase.is_empty() && self.base_fee > 0
    }
}
