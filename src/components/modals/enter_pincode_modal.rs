use dioxus::prelude::*;
use crate::components::common::FormInput;
use crate::components::forms::{ModalState, PincodeField, PincodeForm};

/// Asks for the keystore pincode before a secret-revealing action
#[component]
pub fn EnterPincodeModal(
    modal: Signal<ModalState<PincodeForm>>,
    on_done: EventHandler<String>,
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

                h2 { class: "modal-title", "Enter Pincode" }

                if let Some(error) = error_message() {
                    div { class: "error-message", "{error}" }
                }

                FormInput {
                    id: "pincode".to_string(),
                    label: "Enter your keystore pincode".to_string(),
                    input_type: "password".to_string(),
                    on_commit: move |v| modal.write().commit(PincodeField, v),
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
                                Ok(pincode) => {
                                    error_message.set(None);
                                    on_done.call(pincode);
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
