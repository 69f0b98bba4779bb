use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(extends = GlobalAttributes)]
    #[props(extends = input)]
    attributes: Vec<Attribute>,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        input {
            class: "input",
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
            ..attributes,
        }
    }
}

#[component]
pub fn Textarea(
    #[props(extends = GlobalAttributes)]
    #[props(extends = textarea)]
    attributes: Vec<Attribute>,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            class: "input",
            rows: 3,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
            ..attributes,
        }
    }
}

/// A `<select>` over `(value, label)` pairs.
#[component]
pub fn Select(
    #[props(default)] id: String,
    #[props(default)] class: String,
    value: String,
    options: Vec<(String, String)>,
    /// Shown as an empty first option when set.
    #[props(default)]
    placeholder: Option<String>,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            id: "{id}",
            class: "input {class}",
            value: "{value}",
            onchange: move |evt| onchange.call(evt.value()),
            if let Some(placeholder) = placeholder {
                option { value: "", "{placeholder}" }
            }
            for (key, label) in options {
                option {
                    key: "{key}",
                    value: "{key}",
                    selected: key == value,
                    "{label}"
                }
            }
        }
    }
}
