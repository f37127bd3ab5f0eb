use dioxus::prelude::*;
use geotrack_shared::status;

#[component]
pub fn StatusBar(id: String, text: Signal<String>) -> Element {
    let current = text.read().clone();
    let class = if status::is_error(&current) {
        "status status-error"
    } else {
        "status"
    };

    rsx! {
        div {
            id: "{id}",
            class: "{class}",
            role: "status",
            "aria-live": "polite",
            "{current}"
        }
    }
}
