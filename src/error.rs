// src/error.rs
use thiserror::Error;

/// A modal was confirmed with a required field left empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("pincodes do not match")]
    PincodeMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeypairError {
    #[error("invalid secret key")]
    InvalidSecret,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeystoreError {
    #[error("keystore is malformed: {0}")]
    Malformed(String),

    #[error("incorrect pincode")]
    IncorrectPincode,

    #[error("keystore does not contain a valid secret key")]
    InvalidSecret,

    #[error("keystore encryption failed: {0}")]
    Encryption(String),
}

/// Failures while assembling a transaction locally, before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("invalid asset code: {0:?}")]
    InvalidAssetCode(String),

    #[error("invalid account id: {0:?}")]
    InvalidAccount(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("sequence number overflow")]
    SequenceOverflow,

    #[error("fee overflow")]
    FeeOverflow,

    #[error("transaction encoding failed: {0}")]
    Encoding(String),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("account {0} not found on the network")]
    AccountNotFound(String),

    /// Horizon answered with an error document. Result codes are kept so a
    /// failed trustline and an underfunded payment read differently.
    #[error("transaction rejected ({status}): {}", describe_rejection(.title, .transaction_code, .operation_codes))]
    Rejected {
        status: u16,
        title: String,
        transaction_code: Option<String>,
        operation_codes: Vec<String>,
    },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("friendbot is not configured for this network")]
    FriendbotUnavailable,

    #[error(transparent)]
    Encoding(#[from] TransactionError),
}

fn describe_rejection(
    title: &str,
    transaction_code: &Option<String>,
    operation_codes: &[String],
) -> String {
    match (transaction_code, operation_codes.is_empty()) {
        (Some(tx), true) => format!("{title}: {tx}"),
        (Some(tx), false) => format!("{title}: {tx} [{}]", operation_codes.join(", ")),
        (None, _) => title.to_string(),
    }
}

/// Cause behind a failed trust or payment action
#[derive(Debug, Error)]
pub enum ActionFailure {
    #[error(transparent)]
    Keypair(#[from] KeypairError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Add trustline transaction failed: {0}")]
    TrustAsset(#[source] ActionFailure),

    #[error("Payment transaction failed: {0}")]
    Payment(#[source] ActionFailure),
}

impl ActionError {
    pub fn failure(&self) -> &ActionFailure {
        match self {
            ActionError::TrustAsset(f) | ActionError::Payment(f) => f,
        }
    }
}

/// Errors surfaced by the account controller to the view
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("another action is already in progress")]
    Busy,

    #[error("this account has no keystore")]
    NoKeystore,

    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("account file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_keeps_result_codes() {
        let err = NetworkError::Rejected {
            status: 400,
            title: "Transaction Failed".to_string(),
            transaction_code: Some("tx_failed".to_string()),
            operation_codes: vec!["op_underfunded".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("tx_failed"));
        assert!(msg.contains("op_underfunded"));
    }

    #[test]
    fn action_error_names_the_action() {
        let err = ActionError::TrustAsset(ActionFailure::Transaction(
            TransactionError::InvalidAssetCode("TOOLONGASSETCODE".to_string()),
        ));
        assert!(err.to_string().starts_with("Add trustline transaction failed"));
        assert!(matches!(err.failure(), ActionFailure::Transaction(_)));
    }
}
