//! Transient notifications in the corner of the screen.
//!
//! Wrap the app in [`ToastProvider`] and call [`use_toast`] anywhere below it.
//! Toasts and their dismiss timers live in the provider, so a form may toast
//! and close in the same handler.

use dioxus::prelude::*;
use dioxus_primitives::toast;

pub use dioxus_primitives::toast::{use_toast, ToastOptions};

#[component]
pub fn ToastProvider(children: Element) -> Element {
    rsx! {
        toast::ToastProvider {
            {children}
        }
    }
}
