// src/actions.rs
//! Single-operation account actions: create a trustline, send a payment.
//!
//! Both follow the same script: keypair from the secret, load the account for
//! its sequence number, build one operation, sign, submit. The caller derives
//! the secret from the keystore right before calling and drops it afterwards.

use zeroize::Zeroizing;

use crate::config::NetworkConfig;
use crate::error::{ActionError, ActionFailure, NetworkError};
use crate::network::{NetworkClient, SubmissionResult};
use crate::transaction::{Asset, Operation, TimeboundPolicy};
use crate::wallet::Keypair;

pub struct TrustAssetRequest {
    pub secret_key: Zeroizing<String>,
    pub asset_code: String,
    pub asset_issuer: String,
}

pub struct MakePaymentRequest {
    pub secret_key: Zeroizing<String>,
    pub destination: String,
    pub amount: String,
    pub asset_code: String,
    pub asset_issuer: String,
}

/// Create a trustline from the key's account to `asset_code:asset_issuer`
pub async fn trust_asset(
    client: &dyn NetworkClient,
    config: &NetworkConfig,
    request: TrustAssetRequest,
) -> Result<SubmissionResult, ActionError> {
    let result: Result<SubmissionResult, ActionFailure> = async {
        let asset = Asset::credit(&request.asset_code, &request.asset_issuer)?;
        log::info!("Creating trustline to {}", asset);
        submit_single_operation(client, config, &request.secret_key, Operation::change_trust(asset)).await
    }
    .await;

    result.map_err(|e| {
        log::error!("Add trustline transaction failed: {}", e);
        ActionError::TrustAsset(e)
    })
}

/// Send `amount` of `asset_code:asset_issuer` to `destination`
pub async fn make_payment(
    client: &dyn NetworkClient,
    config: &NetworkConfig,
    request: MakePaymentRequest,
) -> Result<SubmissionResult, ActionError> {
    let result: Result<SubmissionResult, ActionFailure> = async {
        let asset = Asset::from_code_issuer(&request.asset_code, &request.asset_issuer)?;
        let operation = Operation::payment(&request.destination, asset, &request.amount)?;
        log::info!("Sending {} {} to {}", request.amount, request.asset_code, request.destination);
        submit_single_operation(client, config, &request.secret_key, operation).await
    }
    .await;

    result.map_err(|e| {
        log::error!("Payment transaction failed: {}", e);
        ActionError::Payment(e)
    })
}

async fn submit_single_operation(
    client: &dyn NetworkClient,
    config: &NetworkConfig,
    secret_key: &str,
    operation: Operation,
) -> Result<SubmissionResult, ActionFailure> {
    let keypair = Keypair::from_secret(secret_key)?;
    let account = client.load_account(&keypair.public_key()).await?;

    let mut transaction = client.build_transaction(
        &account,
        operation,
        config.base_fee,
        &config.network_passphrase,
        TimeboundPolicy::SubmissionWindow,
    )?;
    client.sign(&mut transaction, &keypair)?;
    drop(keypair);

    let result = client.submit(&transaction).await?;
    if !result.successful {
        return Err(NetworkError::Rejected {
            status: 200,
            title: format!("Transaction {} was not applied", result.hash),
            transaction_code: None,
            operation_codes: Vec::new(),
        }
        .into());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{KeypairError, NetworkError, TransactionError};
    use crate::network::testing::{MockNetwork, MOCK_SEQUENCE};
    use crate::transaction::STROOPS_PER_UNIT;

    fn signer() -> Keypair {
        Keypair::from_seed(&[11u8; 32])
    }

    fn issuer() -> String {
        Keypair::from_seed(&[12u8; 32]).public_key()
    }

    fn trust_request(code: &str) -> TrustAssetRequest {
        TrustAssetRequest {
            secret_key: signer().secret(),
            asset_code: code.to_string(),
            asset_issuer: issuer(),
        }
    }

    #[tokio::test]
    async fn test_trust_asset_submits_one_change_trust() {
        let network = MockNetwork::new();
        let config = NetworkConfig::default();

        let result = trust_asset(&network, &config, trust_request("USD")).await.unwrap();

        let submitted = network.submitted();
        assert_eq!(submitted.len(), 1);
        let tx = &submitted[0];
        assert_eq!(result.hash, tx.hash_hex().unwrap());
        assert_eq!(tx.source_account, signer().public_key());
        assert_eq!(tx.sequence, MOCK_SEQUENCE + 1);
        assert_eq!(tx.fee, config.base_fee);
        assert_eq!(tx.signatures.len(), 1);
        assert!(tx.time_bounds.max_time > 0);
        assert_eq!(tx.operations.len(), 1);
        match &tx.operations[0] {
            Operation::ChangeTrust { asset, limit } => {
                assert_eq!(asset.code(), "USD");
                assert_eq!(asset.issuer(), Some(issuer().as_str()));
                assert_eq!(*limit, i64::MAX);
            }
            other => panic!("expected change trust, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_make_payment_submits_one_payment() {
        let network = MockNetwork::new();
        let destination = issuer();
        let request = MakePaymentRequest {
            secret_key: signer().secret(),
            destination: destination.clone(),
            amount: "12.5".to_string(),
            asset_code: "XLM".to_string(),
            asset_issuer: "native".to_string(),
        };

        make_payment(&network, &NetworkConfig::default(), request).await.unwrap();

        let submitted = network.submitted();
        assert_eq!(submitted.len(), 1);
        match &submitted[0].operations[..] {
            [Operation::Payment { destination: d, asset, amount, .. }] => {
                assert_eq!(d, &destination);
                assert_eq!(asset, &Asset::Native);
                assert_eq!(*amount, 12 * STROOPS_PER_UNIT + STROOPS_PER_UNIT / 2);
            }
            other => panic!("expected one payment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_asset_never_reaches_network() {
        let network = MockNetwork::new();
        let err = trust_asset(&network, &NetworkConfig::default(), trust_request("NOT VALID"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ActionError::TrustAsset(ActionFailure::Transaction(TransactionError::InvalidAssetCode(_)))
        ));
        assert_eq!(network.load_count(), 0);
        assert!(network.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_bad_secret_is_reported() {
        let network = MockNetwork::new();
        let mut request = trust_request("USD");
        request.secret_key = Zeroizing::new("SNOTASECRET".to_string());

        let err = trust_asset(&network, &NetworkConfig::default(), request).await.unwrap_err();
        assert!(matches!(
            err.failure(),
            ActionFailure::Keypair(KeypairError::InvalidSecret)
        ));
    }

    #[tokio::test]
    async fn test_rejection_keeps_network_cause() {
        let network = MockNetwork::rejecting();
        let request = MakePaymentRequest {
            secret_key: signer().secret(),
            destination: issuer(),
            amount: "1".to_string(),
            asset_code: "USD".to_string(),
            asset_issuer: issuer(),
        };

        let err = make_payment(&network, &NetworkConfig::default(), request).await.unwrap_err();
        assert!(err.to_string().starts_with("Payment transaction failed"));
        match err.failure() {
            ActionFailure::Network(NetworkError::Rejected { operation_codes, .. }) => {
                assert_eq!(operation_codes, &vec!["op_no_trust".to_string()]);
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_account_is_reported() {
        let network = MockNetwork::new();
        network.mark_missing(&signer().public_key());

        let err = trust_asset(&network, &NetworkConfig::default(), trust_request("USD"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.failure(),
            ActionFailure::Network(NetworkError::AccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unapplied_submission_is_a_failure() {
        let network = MockNetwork::unsuccessful();
        let err = trust_asset(&network, &NetworkConfig::default(), trust_request("USD"))
            .await
            .unwrap_err();

        assert_eq!(network.submitted().len(), 1);
        assert!(matches!(
            err.failure(),
            ActionFailure::Network(NetworkError::Rejected { .. })
        ));
    }
}
