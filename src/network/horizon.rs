// src/network/horizon.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::network::{AccountRecord, Balance, NetworkClient, SubmissionResult};
use crate::transaction::Transaction;

#[derive(Debug, Deserialize)]
struct HorizonAccount {
    id: String,
    sequence: String,
    #[serde(default)]
    balances: Vec<HorizonBalance>,
}

#[derive(Debug, Deserialize)]
struct HorizonBalance {
    balance: String,
    asset_type: String,
    asset_code: Option<String>,
    asset_issuer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HorizonSubmitResponse {
    hash: String,
    ledger: Option<u32>,
    successful: Option<bool>,
}

/// Horizon "problem" document returned with every error status
#[derive(Debug, Deserialize)]
struct HorizonProblem {
    title: Option<String>,
    detail: Option<String>,
    extras: Option<ProblemExtras>,
}

#[derive(Debug, Deserialize)]
struct ProblemExtras {
    result_codes: Option<ResultCodes>,
}

#[derive(Debug, Deserialize)]
struct ResultCodes {
    transaction: Option<String>,
    #[serde(default)]
    operations: Vec<String>,
}

/// Horizon REST client
pub struct HorizonClient {
    client: Client,
    config: NetworkConfig,
}

impl HorizonClient {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            client: build_http_client(&config),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.horizon_url.trim_end_matches('/'), path)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(config: &NetworkConfig) -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_config: &NetworkConfig) -> Client {
    Client::new()
}

#[async_trait]
impl NetworkClient for HorizonClient {
    async fn load_account(&self, public_key: &str) -> Result<AccountRecord, NetworkError> {
        let response = self
            .client
            .get(self.url(&format!("accounts/{}", public_key)))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(NetworkError::AccountNotFound(public_key.to_string()));
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_problem(status.as_u16(), &body));
        }

        let record = parse_account(&body)?;
        log::info!(
            "Loaded account {} at sequence {} ({} balances)",
            record.account_id,
            record.sequence,
            record.balances.len()
        );
        Ok(record)
    }

    async fn submit(&self, transaction: &Transaction) -> Result<SubmissionResult, NetworkError> {
        let envelope = transaction.to_envelope_base64()?;
        let hash = transaction.hash_hex()?;
        log::info!(
            "Submitting transaction {} (seq {}, {} ops)",
            hash,
            transaction.sequence,
            transaction.operations.len()
        );

        let response = self
            .client
            .post(self.url("transactions"))
            .form(&[("tx", envelope.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = parse_problem(status.as_u16(), &body);
            log::warn!("Transaction {} rejected: {}", hash, err);
            return Err(err);
        }

        let parsed: HorizonSubmitResponse = serde_json::from_str(&body)
            .map_err(|e| NetworkError::UnexpectedResponse(format!("submit response: {}", e)))?;
        log::info!("Transaction {} included in ledger {:?}", parsed.hash, parsed.ledger);

        Ok(SubmissionResult {
            hash: parsed.hash,
            successful: parsed.successful.unwrap_or(true),
        })
    }

    async fn fund_account(&self, public_key: &str) -> Result<(), NetworkError> {
        let Some(friendbot) = &self.config.friendbot_url else {
            return Err(NetworkError::FriendbotUnavailable);
        };

        let response = self
            .client
            .get(friendbot)
            .query(&[("addr", public_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(parse_problem(status.as_u16(), &body));
        }
        log::info!("Friendbot funded {}", public_key);
        Ok(())
    }

    fn default_timeout_secs(&self) -> u64 {
        self.config.tx_timeout_secs
    }
}

fn parse_account(body: &str) -> Result<AccountRecord, NetworkError> {
    let account: HorizonAccount = serde_json::from_str(body)
        .map_err(|e| NetworkError::UnexpectedResponse(format!("account response: {}", e)))?;
    let sequence = account
        .sequence
        .parse::<i64>()
        .map_err(|_| NetworkError::UnexpectedResponse(format!("bad sequence {:?}", account.sequence)))?;

    let balances = account
        .balances
        .into_iter()
        .filter_map(|b| match b.asset_type.as_str() {
            "native" => Some(Balance {
                asset_code: "XLM".to_string(),
                asset_issuer: None,
                balance: b.balance,
            }),
            // Pool shares carry no code and are not shown
            _ => b.asset_code.map(|code| Balance {
                asset_code: code,
                asset_issuer: b.asset_issuer,
                balance: b.balance,
            }),
        })
        .collect();

    Ok(AccountRecord {
        account_id: account.id,
        sequence,
        balances,
    })
}

fn parse_problem(status: u16, body: &str) -> NetworkError {
    match serde_json::from_str::<HorizonProblem>(body) {
        Ok(problem) => {
            let codes = problem.extras.and_then(|e| e.result_codes);
            let title = problem
                .title
                .or(problem.detail)
                .unwrap_or_else(|| format!("HTTP {}", status));
            NetworkError::Rejected {
                status,
                title,
                transaction_code: codes.as_ref().and_then(|c| c.transaction.clone()),
                operation_codes: codes.map(|c| c.operations).unwrap_or_default(),
            }
        }
        Err(_) => NetworkError::UnexpectedResponse(format!("HTTP {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account() {
        let body = r#"{
            "id": "GACCOUNT",
            "sequence": "4294967301",
            "balances": [
                {"balance": "12.5000000", "asset_type": "credit_alphanum4",
                 "asset_code": "USD", "asset_issuer": "GISSUER"},
                {"balance": "3.0000000", "asset_type": "liquidity_pool_shares",
                 "liquidity_pool_id": "abcd"},
                {"balance": "9999.9999900", "asset_type": "native"}
            ]
        }"#;

        let record = parse_account(body).unwrap();
        assert_eq!(record.account_id, "GACCOUNT");
        assert_eq!(record.sequence, 4_294_967_301);
        assert_eq!(record.balances.len(), 2);
        assert_eq!(record.balances[0].key(), "USD-GISSUER");
        assert_eq!(record.balances[1].asset_code, "XLM");
        assert_eq!(record.balances[1].asset_issuer, None);
    }

    #[test]
    fn test_parse_account_bad_sequence() {
        let body = r#"{"id": "GACCOUNT", "sequence": "nope", "balances": []}"#;
        assert!(matches!(parse_account(body), Err(NetworkError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_parse_problem_keeps_result_codes() {
        let body = r#"{
            "type": "https://stellar.org/horizon-errors/transaction_failed",
            "title": "Transaction Failed",
            "status": 400,
            "extras": {
                "envelope_xdr": "AAAA",
                "result_codes": {"transaction": "tx_failed", "operations": ["op_underfunded"]}
            }
        }"#;

        match parse_problem(400, body) {
            NetworkError::Rejected {
                status,
                title,
                transaction_code,
                operation_codes,
            } => {
                assert_eq!(status, 400);
                assert_eq!(title, "Transaction Failed");
                assert_eq!(transaction_code.as_deref(), Some("tx_failed"));
                assert_eq!(operation_codes, vec!["op_underfunded".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_problem_non_json() {
        let err = parse_problem(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, NetworkError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_url_joins_paths() {
        let client = HorizonClient::new(NetworkConfig {
            horizon_url: "http://localhost:8000/".to_string(),
            ..NetworkConfig::default()
        });
        assert_eq!(client.url("transactions"), "http://localhost:8000/transactions");
    }
}
