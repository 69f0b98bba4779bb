use dioxus::prelude::*;

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant};

/// "Are you sure?" dialog shown between a delete click and the request.
#[component]
pub fn DeleteConfirmDialog(
    title: String,
    message: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            div {
                class: "modal-body",
                h2 { class: "modal-title", "{title}" }
                p { class: "modal-text", "{message}" }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Batal"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Menghapus..." } else { "Hapus" }
                    }
                }
            }
        }
    }
}
