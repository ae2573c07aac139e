use dioxus::prelude::*;

/// Labelled text input that reports its value when it loses focus
#[component]
pub fn FormInput(
    id: String,
    label: String,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] note: Option<String>,
    on_commit: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "wallet-field",
            label { r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                r#type: "{input_type}",
                autocomplete: "off",
                // `change` fires for text inputs once focus leaves the field
                onchange: move |e: FormEvent| on_commit.call(e.value()),
            }
            if let Some(note) = note {
                div { class: "field-note", "{note}" }
            }
        }
    }
}

/// Shorten a `G...` address for display: `GABCD…WXYZ`
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 6..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        assert_eq!(short_address("GSHORT"), "GSHORT");
        let addr = "GAAZI4TCR3TY5OJHCTJC2A4QSY6CJWJH5IAJTGKIN2ER7LBNVKOCCWN7";
        assert_eq!(short_address(addr), "GAAZI4…OCCWN7");
    }
}
