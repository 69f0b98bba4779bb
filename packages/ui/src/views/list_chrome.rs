//! Search box, pagination bar and load-failure banner shared by every table.

use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input};
use crate::icons::{FaChevronLeft, FaChevronRight, FaMagnifyingGlass, FaRotateRight};
use crate::Icon;

#[component]
pub fn ListToolbar(
    query: String,
    #[props(default = "Cari...".to_string())] placeholder: String,
    on_query: EventHandler<String>,
    /// Filter selects and page-level actions.
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "list-toolbar",
            div {
                class: "list-toolbar__search",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                Input {
                    r#type: "search",
                    placeholder: placeholder,
                    value: query,
                    oninput: move |evt: FormEvent| on_query.call(evt.value()),
                }
            }
            div { class: "list-toolbar__actions", {children} }
        }
    }
}

#[component]
pub fn PaginationBar(
    page: usize,
    page_count: usize,
    total: usize,
    on_page: EventHandler<usize>,
) -> Element {
    if total == 0 {
        return rsx! {};
    }
    let shown = page + 1;
    rsx! {
        div {
            class: "pagination",
            span { class: "pagination__info", "{total} data · halaman {shown} dari {page_count}" }
            Button {
                variant: ButtonVariant::Ghost,
                disabled: page == 0,
                onclick: move |_| on_page.call(page.saturating_sub(1)),
                Icon { icon: FaChevronLeft, width: 12, height: 12 }
            }
            Button {
                variant: ButtonVariant::Ghost,
                disabled: page + 1 >= page_count,
                onclick: move |_| on_page.call(page + 1),
                Icon { icon: FaChevronRight, width: 12, height: 12 }
            }
        }
    }
}

/// Page-level fetch failure with a retry button.
#[component]
pub fn LoadError(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "load-error",
            role: "alert",
            p { "{message}" }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| on_retry.call(()),
                Icon { icon: FaRotateRight, width: 12, height: 12 }
                " Coba lagi"
            }
        }
    }
}
