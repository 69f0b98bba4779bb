use dioxus::prelude::*;
use dioxus_primitives::label;

#[component]
pub fn Label(
    html_for: String,
    #[props(default)] required: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    rsx! {
        label::Label {
            class: "label",
            html_for: html_for,
            ..attributes,
            {children}
            if required {
                span { class: "label__required", " *" }
            }
        }
    }
}

/// Inline validation message under a field or form.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            p { class: "field-error", role: "alert", "{message}" }
        },
        None => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_label_points_at_field() {
        let html = dioxus_ssr::render_element(rsx! {
            Label { html_for: "surat-perihal", required: true, "Perihal" }
        });
        assert!(html.contains(r#"for="surat-perihal""#));
        assert!(html.contains("Perihal"));
        assert!(html.contains("label__required"));
    }

    #[test]
    fn test_field_error_hidden_without_message() {
        let html = dioxus_ssr::render_element(rsx! { FieldError { message: None } });
        assert!(!html.contains("field-error"));
    }
}
