// src/transaction.rs
//! Stellar transaction model: validated assets, operations and time bounds,
//! lowered onto `stellar_xdr` types for hashing, signing and the envelope
//! that Horizon accepts.

use sha2::{Digest, Sha256};
use stellar_xdr::curr::{self as xdr, Limits, WriteXdr};

use crate::error::TransactionError;
use crate::wallet::{decode_public_key, Keypair};

/// 1 unit of any asset is 10^7 stroops
pub const STROOPS_PER_UNIT: i64 = 10_000_000;
const AMOUNT_DECIMALS: usize = 7;

fn encoding(e: xdr::Error) -> TransactionError {
    TransactionError::Encoding(e.to_string())
}

fn account_id(key: &[u8; 32]) -> xdr::AccountId {
    xdr::AccountId(xdr::PublicKey::PublicKeyTypeEd25519(xdr::Uint256(*key)))
}

fn muxed_account(key: &[u8; 32]) -> xdr::MuxedAccount {
    xdr::MuxedAccount::Ed25519(xdr::Uint256(*key))
}

fn padded_code<const N: usize>(code: &str) -> [u8; N] {
    let mut out = [0u8; N];
    out[..code.len()].copy_from_slice(code.as_bytes());
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Native,
    Credit {
        code: String,
        issuer: String,
        issuer_key: [u8; 32],
    },
}

impl Asset {
    /// Issued asset. Codes are 1-12 ASCII alphanumerics; the issuer is a `G...` id.
    pub fn credit(code: &str, issuer: &str) -> Result<Self, TransactionError> {
        let code = code.trim();
        if code.is_empty() || code.len() > 12 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TransactionError::InvalidAssetCode(code.to_string()));
        }
        let issuer = issuer.trim();
        let issuer_key = decode_public_key(issuer)
            .map_err(|_| TransactionError::InvalidAccount(issuer.to_string()))?;

        Ok(Asset::Credit {
            code: code.to_string(),
            issuer: issuer.to_string(),
            issuer_key,
        })
    }

    /// Asset as typed into a form. `XLM` issued by `native` is the native asset.
    pub fn from_code_issuer(code: &str, issuer: &str) -> Result<Self, TransactionError> {
        if code.trim().eq_ignore_ascii_case("XLM") && issuer.trim().eq_ignore_ascii_case("native") {
            return Ok(Asset::Native);
        }
        Self::credit(code, issuer)
    }

    pub fn code(&self) -> &str {
        match self {
            Asset::Native => "XLM",
            Asset::Credit { code, .. } => code,
        }
    }

    pub fn issuer(&self) -> Option<&str> {
        match self {
            Asset::Native => None,
            Asset::Credit { issuer, .. } => Some(issuer),
        }
    }

    /// 1-4 character codes are AlphaNum4, longer ones AlphaNum12
    pub fn to_xdr(&self) -> xdr::Asset {
        match self {
            Asset::Native => xdr::Asset::Native,
            Asset::Credit { code, issuer_key, .. } if code.len() <= 4 => {
                xdr::Asset::CreditAlphanum4(xdr::AlphaNum4 {
                    asset_code: xdr::AssetCode4(padded_code(code)),
                    issuer: account_id(issuer_key),
                })
            }
            Asset::Credit { code, issuer_key, .. } => xdr::Asset::CreditAlphanum12(xdr::AlphaNum12 {
                asset_code: xdr::AssetCode12(padded_code(code)),
                issuer: account_id(issuer_key),
            }),
        }
    }

    fn to_change_trust_asset(&self) -> xdr::ChangeTrustAsset {
        match self.to_xdr() {
            xdr::Asset::Native => xdr::ChangeTrustAsset::Native,
            xdr::Asset::CreditAlphanum4(a) => xdr::ChangeTrustAsset::CreditAlphanum4(a),
            xdr::Asset::CreditAlphanum12(a) => xdr::ChangeTrustAsset::CreditAlphanum12(a),
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.issuer() {
            None => write!(f, "{}", self.code()),
            Some(issuer) => write!(f, "{}:{}", self.code(), issuer),
        }
    }
}

/// Parse a decimal amount ("12.5") into stroops. At most 7 decimals, strictly positive.
pub fn parse_amount(amount: &str) -> Result<i64, TransactionError> {
    let invalid = || TransactionError::InvalidAmount(amount.to_string());
    let trimmed = amount.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
        || fraction.len() > AMOUNT_DECIMALS
    {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{:0<width$}", fraction, width = AMOUNT_DECIMALS)
            .parse()
            .map_err(|_| invalid())?
    };

    let stroops = whole
        .checked_mul(STROOPS_PER_UNIT)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(invalid)?;

    if stroops <= 0 {
        return Err(invalid());
    }
    Ok(stroops)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ChangeTrust {
        asset: Asset,
        limit: i64,
    },
    Payment {
        destination: String,
        destination_key: [u8; 32],
        asset: Asset,
        amount: i64,
    },
}

impl Operation {
    /// Create (or raise to the maximum) a trustline for `asset`
    pub fn change_trust(asset: Asset) -> Self {
        Operation::ChangeTrust {
            asset,
            limit: i64::MAX,
        }
    }

    pub fn payment(destination: &str, asset: Asset, amount: &str) -> Result<Self, TransactionError> {
        let destination = destination.trim();
        let destination_key = decode_public_key(destination)
            .map_err(|_| TransactionError::InvalidAccount(destination.to_string()))?;
        let amount = parse_amount(amount)?;

        Ok(Operation::Payment {
            destination: destination.to_string(),
            destination_key,
            asset,
            amount,
        })
    }

    /// Operation without its own source account; the transaction source pays
    pub fn to_xdr(&self) -> xdr::Operation {
        let body = match self {
            Operation::ChangeTrust { asset, limit } => xdr::OperationBody::ChangeTrust(xdr::ChangeTrustOp {
                line: asset.to_change_trust_asset(),
                limit: *limit,
            }),
            Operation::Payment {
                destination_key,
                asset,
                amount,
                ..
            } => xdr::OperationBody::Payment(xdr::PaymentOp {
                destination: muxed_account(destination_key),
                asset: asset.to_xdr(),
                amount: *amount,
            }),
        };
        xdr::Operation {
            source_account: None,
            body,
        }
    }
}

/// Unix-second validity window. `max_time == 0` would mean no expiry; this
/// wallet never builds such transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeboundPolicy {
    /// Zero timeout: the client picks its default window, anchored at build time
    SubmissionWindow,
}

impl TimeboundPolicy {
    pub fn resolve(self, now: u64, default_window_secs: u64) -> TimeBounds {
        let window = match self {
            TimeboundPolicy::SubmissionWindow => default_window_secs,
        };
        TimeBounds {
            min_time: 0,
            max_time: now.saturating_add(window.max(1)),
        }
    }
}

/// A single-source transaction ready to be signed and submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source_account: String,
    source_key: [u8; 32],
    pub fee: u32,
    pub sequence: i64,
    pub time_bounds: TimeBounds,
    pub operations: Vec<Operation>,
    pub network_passphrase: String,
    pub signatures: Vec<xdr::DecoratedSignature>,
}

impl Transaction {
    /// Build on top of the account's current sequence number. The transaction
    /// consumes `current_sequence + 1`; fee is `base_fee` per operation.
    pub fn new(
        source_account: &str,
        current_sequence: i64,
        operations: Vec<Operation>,
        base_fee: u32,
        network_passphrase: &str,
        time_bounds: TimeBounds,
    ) -> Result<Self, TransactionError> {
        let source_key = decode_public_key(source_account)
            .map_err(|_| TransactionError::InvalidAccount(source_account.to_string()))?;
        let sequence = current_sequence
            .checked_add(1)
            .ok_or(TransactionError::SequenceOverflow)?;
        let fee = u32::try_from(operations.len())
            .ok()
            .and_then(|n| base_fee.checked_mul(n))
            .ok_or(TransactionError::FeeOverflow)?;

        Ok(Self {
            source_account: source_account.to_string(),
            source_key,
            fee,
            sequence,
            time_bounds,
            operations,
            network_passphrase: network_passphrase.to_string(),
            signatures: Vec::new(),
        })
    }

    pub fn network_id(&self) -> [u8; 32] {
        Sha256::digest(self.network_passphrase.as_bytes()).into()
    }

    pub fn to_xdr(&self) -> Result<xdr::Transaction, TransactionError> {
        let operations: Vec<xdr::Operation> = self.operations.iter().map(Operation::to_xdr).collect();
        Ok(xdr::Transaction {
            source_account: muxed_account(&self.source_key),
            fee: self.fee,
            seq_num: xdr::SequenceNumber(self.sequence),
            cond: xdr::Preconditions::Time(xdr::TimeBounds {
                min_time: xdr::TimePoint(self.time_bounds.min_time),
                max_time: xdr::TimePoint(self.time_bounds.max_time),
            }),
            memo: xdr::Memo::None,
            operations: operations.try_into().map_err(encoding)?,
            ext: xdr::TransactionExt::V0,
        })
    }

    /// Hash of the signature payload: network id plus the tagged transaction
    pub fn hash(&self) -> Result<[u8; 32], TransactionError> {
        let payload = xdr::TransactionSignaturePayload {
            network_id: xdr::Hash(self.network_id()),
            tagged_transaction: xdr::TransactionSignaturePayloadTaggedTransaction::Tx(self.to_xdr()?),
        };
        let bytes = payload.to_xdr(Limits::none()).map_err(encoding)?;
        Ok(Sha256::digest(bytes).into())
    }

    pub fn hash_hex(&self) -> Result<String, TransactionError> {
        Ok(hex::encode(self.hash()?))
    }

    pub fn sign(&mut self, keypair: &Keypair) -> Result<(), TransactionError> {
        let signature = keypair.sign(&self.hash()?);
        self.signatures.push(xdr::DecoratedSignature {
            hint: xdr::SignatureHint(keypair.signature_hint()),
            signature: xdr::Signature(signature.to_vec().try_into().map_err(encoding)?),
        });
        Ok(())
    }

    /// `TransactionEnvelope` (v1) with all collected signatures
    pub fn to_envelope(&self) -> Result<xdr::TransactionEnvelope, TransactionError> {
        Ok(xdr::TransactionEnvelope::Tx(xdr::TransactionV1Envelope {
            tx: self.to_xdr()?,
            signatures: self.signatures.clone().try_into().map_err(encoding)?,
        }))
    }

    pub fn to_envelope_base64(&self) -> Result<String, TransactionError> {
        self.to_envelope()?
            .to_xdr_base64(Limits::none())
            .map_err(encoding)
    }
}
