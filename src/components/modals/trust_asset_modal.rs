use dioxus::prelude::*;
use crate::account::TrustAssetInput;
use crate::components::common::FormInput;
use crate::components::forms::{ModalState, TrustAssetField, TrustAssetForm};

#[component]
pub fn TrustAssetModal(
    modal: Signal<ModalState<TrustAssetForm>>,
    on_done: EventHandler<TrustAssetInput>,
) -> Element {
    let mut modal = modal;
    let mut error_message = use_signal(|| None as Option<String>);

    if !modal.read().is_visible() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| {
                error_message.set(None);
                modal.write().cancel();
            },

            div {
                class: "modal-content",
                onclick: move |e| e.stop_propagation(),

                h2 { class: "modal-title", "Trust Asset" }
                p { "Create a trustline to an asset." }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }

                FormInput {
                    id: "assetCode".to_string(),
                    label: "Enter asset code".to_string(),
                    on_commit: move |v| modal.write().commit(TrustAssetField::AssetCode, v),
                }
                FormInput {
                    id: "assetIssuer".to_string(),
                    label: "Enter asset issuer".to_string(),
                    on_commit: move |v| modal.write().commit(TrustAssetField::AssetIssuer, v),
                }
                FormInput {
                    id: "pincode".to_string(),
                    label: "Enter your keystore pincode".to_string(),
                    input_type: "password".to_string(),
                    note: Some("Pincode is needed to get the secret key from the keystore".to_string()),
                    on_commit: move |v| modal.write().commit(TrustAssetField::Pincode, v),
                }

                div { class: "modal-buttons",
                    button {
                        class: "modal-button cancel",
                        onclick: move |_| {
                            error_message.set(None);
                            modal.write().cancel();
                        },
                        "Cancel"
                    }
                    button {
                        class: "modal-button primary",
                        onclick: move |_| {
                            let confirmed = modal.write().confirm();
                            match confirmed {
                                Ok(input) => {
                                    error_message.set(None);
                                    on_done.call(input);
                                }
                                Err(e) => error_message.set(Some(e.to_string())),
                            }
                        },
                        "Continue"
                    }
                }
            }
        }
    }
}
