use dioxus::prelude::*;
use crate::account::MakePaymentInput;
use crate::components::common::FormInput;
use crate::components::forms::{MakePaymentField, MakePaymentForm, ModalState};

#[component]
pub fn MakePaymentModal(
    modal: Signal<ModalState<MakePaymentForm>>,
    on_done: EventHandler<MakePaymentInput>,
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

                h2 { class: "modal-title", "Make Payment" }
                p { "Send an asset to another account. Use XLM / native for lumens." }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }

                FormInput {
                    id: "destination".to_string(),
                    label: "Destination address".to_string(),
                    on_commit: move |v| modal.write().commit(MakePaymentField::Destination, v),
                }
                FormInput {
                    id: "amount".to_string(),
                    label: "Amount".to_string(),
                    on_commit: move |v| modal.write().commit(MakePaymentField::Amount, v),
                }
                FormInput {
                    id: "assetCode".to_string(),
                    label: "Asset code".to_string(),
                    on_commit: move |v| modal.write().commit(MakePaymentField::AssetCode, v),
                }
                FormInput {
                    id: "assetIssuer".to_string(),
                    label: "Asset issuer".to_string(),
                    on_commit: move |v| modal.write().commit(MakePaymentField::AssetIssuer, v),
                }
                FormInput {
                    id: "pincode".to_string(),
                    label: "Enter your keystore pincode".to_string(),
                    input_type: "password".to_string(),
                    note: Some("Pincode is needed to get the secret key from the keystore".to_string()),
                    on_commit: move |v| modal.write().commit(MakePaymentField::Pincode, v),
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
