use dioxus::prelude::*;
use std::sync::Arc;
use crate::components::account_view::AccountView;
use crate::components::common::short_address;
use crate::components::onboarding::Onboarding;
use crate::components::WalletServices;
use crate::network::{AccountData, NetworkClient};
use crate::storage;
use crate::wallet::AccountKeys;

/// Fetch balances and replace the view's account data in one write
async fn fetch_account_data(
    client: Arc<dyn NetworkClient>,
    public_key: String,
    mut account_data: Signal<Option<AccountData>>,
    mut load_error: Signal<Option<String>>,
) {
    match client.load_account_data(&public_key).await {
        Ok(data) => {
            log::info!("Loaded {} balances for {}", data.balances.len(), public_key);
            account_data.set(Some(data));
            load_error.set(None);
        }
        Err(e) => {
            log::error!("Failed to load account {}: {}", public_key, e);
            load_error.set(Some(e.to_string()));
        }
    }
}

#[component]
pub fn WalletView() -> Element {
    let services = use_context::<WalletServices>();

    let mut account_keys = use_signal(|| {
        match storage::load_account_keys(&storage::storage_dir()) {
            Ok(keys) => keys,
            Err(e) => {
                log::error!("Failed to read stored account: {}", e);
                None
            }
        }
    });
    let account_data = use_signal(|| None as Option<AccountData>);
    let load_error = use_signal(|| None as Option<String>);

    // Initial load, and again whenever a new account is created
    let effect_client = services.client.clone();
    use_effect(move || {
        if let Some(keys) = account_keys() {
            spawn(fetch_account_data(
                effect_client.clone(),
                keys.public_key,
                account_data,
                load_error,
            ));
        }
    });

    let refresh_client = services.client.clone();
    let refresh = move |_: ()| {
        if let Some(keys) = account_keys() {
            spawn(fetch_account_data(
                refresh_client.clone(),
                keys.public_key,
                account_data,
                load_error,
            ));
        }
    };

    let Some(keys) = account_keys() else {
        return rsx! {
            Onboarding {
                on_created: move |keys: AccountKeys| account_keys.set(Some(keys)),
            }
        };
    };

    let public_key = keys.public_key.clone();
    let short = short_address(&public_key);

    rsx! {
        div {
            class: "wallet-container",

            div {
                class: "wallet-header",
                h1 { class: "wallet-title", "Stellar Demo Wallet" }
                div { class: "wallet-subtitle", "{short}" }
            }

            if let Some(error) = load_error() {
                div { class: "error-message", "Could not load account: {error}" }
            }

            AccountView {
                key: "{public_key}",
                account_keys: keys,
                account_data: account_data(),
                on_refresh: refresh,
            }
        }
    }
}
