use dioxus::prelude::*;
use std::rc::Rc;
use crate::account::{AccountController, MakePaymentInput, TrustAssetInput};
use crate::clipboard::SystemClipboard;
use crate::components::forms::{MakePaymentForm, ModalState, PincodeForm, TrustAssetForm};
use crate::components::modals::{EnterPincodeModal, MakePaymentModal, TrustAssetModal};
use crate::components::WalletServices;
use crate::network::AccountData;
use crate::wallet::AccountKeys;

#[derive(Clone, Debug, PartialEq)]
enum Notice {
    Success(String),
    Error(String),
}

/// Balances, copy affordances and the trust / payment actions for one account
#[component]
pub fn AccountView(
    account_keys: AccountKeys,
    account_data: Option<AccountData>,
    on_refresh: EventHandler<()>,
) -> Element {
    let services = use_context::<WalletServices>();
    let controller = use_hook(|| {
        Rc::new(AccountController::new(
            services.client.clone(),
            services.config.clone(),
            account_keys.clone(),
        ))
    });

    let mut is_ui_updating = use_signal(|| false);
    let mut notice = use_signal(|| None as Option<Notice>);

    let mut pin_modal = use_signal(ModalState::<PincodeForm>::default);
    let mut trust_asset_modal = use_signal(ModalState::<TrustAssetForm>::default);
    let mut make_payment_modal = use_signal(ModalState::<MakePaymentForm>::default);

    let handle_copy_address = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            controller.handle_copy_address(&SystemClipboard);
            notice.set(Some(Notice::Success("Address copied".to_string())));
        }
    };

    let handle_copy_secret = {
        let controller = controller.clone();
        move |pincode: String| match controller.handle_copy_secret(&pincode, &SystemClipboard) {
            Ok(()) => notice.set(Some(Notice::Success("Secret key copied".to_string()))),
            Err(e) => notice.set(Some(Notice::Error(e.to_string()))),
        }
    };

    let handle_trust_asset = {
        let controller = controller.clone();
        move |input: TrustAssetInput| {
            let controller = controller.clone();
            is_ui_updating.set(true);
            notice.set(None);
            spawn(async move {
                let asset_code = input.asset_code.clone();
                match controller.handle_trust_asset(input, || on_refresh.call(())).await {
                    Ok(result) => notice.set(Some(Notice::Success(format!(
                        "Trustline to {} created in transaction {}",
                        asset_code, result.hash
                    )))),
                    Err(e) => notice.set(Some(Notice::Error(e.to_string()))),
                }
                // A rejected second dispatch must not clear the first one's flag
                is_ui_updating.set(controller.is_busy());
            });
        }
    };

    let handle_make_payment = {
        let controller = controller.clone();
        move |input: MakePaymentInput| {
            let controller = controller.clone();
            is_ui_updating.set(true);
            notice.set(None);
            spawn(async move {
                match controller.handle_make_payment(input, || on_refresh.call(())).await {
                    Ok(result) => notice.set(Some(Notice::Success(format!(
                        "Payment sent in transaction {}",
                        result.hash
                    )))),
                    Err(e) => notice.set(Some(Notice::Error(e.to_string()))),
                }
                is_ui_updating.set(controller.is_busy());
            });
        }
    };

    let public_key = controller.keys().public_key.clone();
    let balances = account_data.map(|d| d.balances).unwrap_or_default();
    let busy = is_ui_updating();

    rsx! {
        div {
            class: "account",

            h3 { "Your account address" }
            div { class: "wallet-address-display", "{public_key}" }

            div {
                class: "account-copy-links",
                button { class: "text-link", onclick: handle_copy_address, "Copy Address" }
                button { class: "text-link", onclick: move |_| pin_modal.write().open(), "Copy Secret" }
            }

            match notice() {
                Some(Notice::Success(msg)) => rsx! { div { class: "success-message", "{msg}" } },
                Some(Notice::Error(msg)) => rsx! { div { class: "error-message", "{msg}" } },
                None => rsx! {},
            }

            h3 { "Balances" }
            table {
                class: "balances",
                tbody {
                    for b in balances {
                        tr {
                            key: "{b.key()}",
                            td { "{b.asset_code}" }
                            td { "{b.balance}" }
                        }
                    }
                }
            }

            div {
                class: "account-buttons",
                button {
                    class: "modal-button",
                    onclick: move |_| on_refresh.call(()),
                    disabled: busy,
                    if busy { "Loading..." } else { "Refresh Account" }
                }
                button {
                    class: "modal-button",
                    onclick: move |_| trust_asset_modal.write().open(),
                    disabled: busy,
                    if busy { "Loading..." } else { "Trust Asset" }
                }
                button {
                    class: "modal-button",
                    onclick: move |_| make_payment_modal.write().open(),
                    disabled: busy,
                    if busy { "Loading..." } else { "Make Payment" }
                }
            }

            EnterPincodeModal { modal: pin_modal, on_done: handle_copy_secret }
            TrustAssetModal { modal: trust_asset_modal, on_done: handle_trust_asset }
            MakePaymentModal { modal: make_payment_modal, on_done: handle_make_payment }
        }
    }
}
