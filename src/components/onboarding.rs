// src/components/onboarding.rs
use dioxus::prelude::*;
use crate::components::common::FormInput;
use crate::components::WalletServices;
use crate::error::ValidationError;
use crate::keystore;
use crate::storage;
use crate::wallet::AccountKeys;

/// Both pincode entries must be present and equal
fn validate_new_pincode(pincode: &str, confirmation: &str) -> Result<String, ValidationError> {
    if pincode.trim().is_empty() {
        return Err(ValidationError::MissingField("Pincode"));
    }
    if confirmation.trim().is_empty() {
        return Err(ValidationError::MissingField("Pincode confirmation"));
    }
    if pincode != confirmation {
        return Err(ValidationError::PincodeMismatch);
    }
    Ok(pincode.to_string())
}

/// First-run screen: lock a new keypair under a pincode, save it, fund it on testnet
#[component]
pub fn Onboarding(on_created: EventHandler<AccountKeys>) -> Element {
    let services = use_context::<WalletServices>();

    let mut pincode = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut error_message = use_signal(|| None as Option<String>);
    let mut creating = use_signal(|| false);

    let create_account = move |_: MouseEvent| {
        let pin = match validate_new_pincode(&pincode(), &confirmation()) {
            Ok(pin) => pin,
            Err(e) => {
                error_message.set(Some(e.to_string()));
                return;
            }
        };

        creating.set(true);
        error_message.set(None);
        let client = services.client.clone();

        spawn(async move {
            let keys = match keystore::generate_account(&pin) {
                Ok(keys) => keys,
                Err(e) => {
                    log::error!("Failed to create keystore: {}", e);
                    error_message.set(Some(e.to_string()));
                    creating.set(false);
                    return;
                }
            };

            if let Err(e) = storage::save_account_keys(&storage::storage_dir(), &keys) {
                log::error!("Failed to save account: {}", e);
                error_message.set(Some(format!("Failed to save account: {e}")));
                creating.set(false);
                return;
            }

            // The account still works unfunded; balances load as soon as it exists
            match client.fund_account(&keys.public_key).await {
                Ok(()) => log::info!("Funded {} from friendbot", keys.public_key),
                Err(e) => log::warn!("Friendbot funding failed for {}: {}", keys.public_key, e),
            }

            creating.set(false);
            on_created.call(keys);
        });
    };

    rsx! {
        div {
            class: "onboarding-overlay",
            div {
                class: "onboarding-container",

                h1 { class: "onboarding-title", "Stellar Demo Wallet" }
                p {
                    class: "onboarding-description",
                    "Choose a pincode. Your new secret key is encrypted with it and never stored in the clear."
                }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }

                FormInput {
                    id: "new-pincode".to_string(),
                    label: "Pincode".to_string(),
                    input_type: "password".to_string(),
                    on_commit: move |v| pincode.set(v),
                }
                FormInput {
                    id: "confirm-pincode".to_string(),
                    label: "Confirm pincode".to_string(),
                    input_type: "password".to_string(),
                    on_commit: move |v| confirmation.set(v),
                }

                button {
                    class: "modal-button primary",
                    disabled: creating(),
                    onclick: create_account,
                    if creating() { "Creating account..." } else { "Create Account" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pincode_validation() {
        assert_eq!(validate_new_pincode("1234", "1234").unwrap(), "1234");
        assert_eq!(
            validate_new_pincode("", "1234").unwrap_err(),
            ValidationError::MissingField("Pincode")
        );
        assert_eq!(
            validate_new_pincode("1234", "  ").unwrap_err(),
            ValidationError::MissingField("Pincode confirmation")
        );
        assert_eq!(
            validate_new_pincode("1234", "4321").unwrap_err(),
            ValidationError::PincodeMismatch
        );
    }
}
