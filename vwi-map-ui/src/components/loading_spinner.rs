//! Loading spinner component.

use dioxus::prelude::*;

/// Overlay shown while a backend request is outstanding.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "position: absolute; inset: 0; z-index: 1000; display: flex; justify-content: center; align-items: center; background: rgba(255, 255, 255, 0.5); color: #424242; pointer-events: none;",
            div {
                style: "padding: 12px 20px; background: #FFFFFF; border-radius: 4px; border: 1px solid #E0E0E0; font-weight: bold;",
                "Loading index data..."
            }
        }
    }
}
