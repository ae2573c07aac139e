use std::sync::Arc;
use crate::config::NetworkConfig;
use crate::network::NetworkClient;

pub mod account_view;
pub mod wallet_view;
pub mod modals;
pub mod common;
pub mod forms;
pub mod onboarding;

pub use wallet_view::*;

/// Network handle and settings shared with every view through context
#[derive(Clone)]
pub struct WalletServices {
    pub client: Arc<dyn NetworkClient>,
    pub config: NetworkConfig,
}
