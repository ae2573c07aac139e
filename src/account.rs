// src/account.rs
//! Account view orchestration: keystore unlock, action dispatch and refresh,
//! with at most one mutating action in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::actions::{self, MakePaymentRequest, TrustAssetRequest};
use crate::clipboard::Clipboard;
use crate::config::NetworkConfig;
use crate::error::AccountError;
use crate::keystore;
use crate::network::{NetworkClient, SubmissionResult};
use crate::wallet::{AccountKeys, Keypair};

/// Fields collected by the trust asset modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAssetInput {
    pub asset_code: String,
    pub asset_issuer: String,
    pub pincode: String,
}

/// Fields collected by the make payment modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakePaymentInput {
    pub destination: String,
    pub amount: String,
    pub asset_code: String,
    pub asset_issuer: String,
    pub pincode: String,
}

/// Single-slot guard for mutating actions
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl InFlight {
    pub fn try_acquire(&self) -> Option<InFlightTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightTicket {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the slot when dropped, on success and failure alike
#[derive(Debug)]
pub struct InFlightTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

pub struct AccountController {
    client: Arc<dyn NetworkClient>,
    config: NetworkConfig,
    keys: AccountKeys,
    in_flight: InFlight,
}

impl AccountController {
    pub fn new(client: Arc<dyn NetworkClient>, config: NetworkConfig, keys: AccountKeys) -> Self {
        Self {
            client,
            config,
            keys,
            in_flight: InFlight::default(),
        }
    }

    pub fn keys(&self) -> &AccountKeys {
        &self.keys
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    fn keypair_from_keystore(&self, pincode: &str) -> Result<Keypair, AccountError> {
        let keystore = self.keys.keystore.as_deref().ok_or(AccountError::NoKeystore)?;
        keystore::unlock(pincode, keystore).map_err(|e| {
            log::warn!("Keystore unlock failed for {}: {}", self.keys.public_key, e);
            AccountError::from(e)
        })
    }

    pub fn handle_copy_address(&self, clipboard: &dyn Clipboard) {
        clipboard.copy(&self.keys.public_key);
    }

    pub fn handle_copy_secret(&self, pincode: &str, clipboard: &dyn Clipboard) -> Result<(), AccountError> {
        let keypair = self.keypair_from_keystore(pincode)?;
        clipboard.copy(&keypair.secret());
        Ok(())
    }

    /// Unlock, create the trustline, then call `refresh` once on success
    pub async fn handle_trust_asset(
        &self,
        input: TrustAssetInput,
        refresh: impl FnOnce(),
    ) -> Result<SubmissionResult, AccountError> {
        let _ticket = self.in_flight.try_acquire().ok_or(AccountError::Busy)?;

        let secret_key = self.keypair_from_keystore(&input.pincode)?.secret();
        let result = actions::trust_asset(
            self.client.as_ref(),
            &self.config,
            TrustAssetRequest {
                secret_key,
                asset_code: input.asset_code,
                asset_issuer: input.asset_issuer,
            },
        )
        .await?;

        refresh();
        Ok(result)
    }

    /// Unlock, send the payment, then call `refresh` once on success
    pub async fn handle_make_payment(
        &self,
        input: MakePaymentInput,
        refresh: impl FnOnce(),
    ) -> Result<SubmissionResult, AccountError> {
        let _ticket = self.in_flight.try_acquire().ok_or(AccountError::Busy)?;

        let secret_key = self.keypair_from_keystore(&input.pincode)?.secret();
        let result = actions::make_payment(
            self.client.as_ref(),
            &self.config,
            MakePaymentRequest {
                secret_key,
                destination: input.destination,
                amount: input.amount,
                asset_code: input.asset_code,
                asset_issuer: input.asset_issuer,
            },
        )
        .await?;

        refresh();
        Ok(result)
    }
}
