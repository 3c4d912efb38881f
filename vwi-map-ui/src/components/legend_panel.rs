//! Legend, color ramp and value range of the most recent overlay.

use crate::state::AppState;
use dioxus::prelude::*;
use vwi_utils::format::format_value;

#[component]
pub fn LegendPanel() -> Element {
    let state = use_context::<AppState>();
    let session = state.session.read();
    let overlays = &session.overlays;
    let Some(key) = overlays.legend_key else {
        return rsx! {};
    };

    let entries = overlays.legend.entries().to_vec();
    let gradient = if overlays.palette.len() > 1 {
        Some(format!(
            "height: 12px; margin: 6px 0; border-radius: 2px; background: linear-gradient(to right, {});",
            overlays.palette.join(", ")
        ))
    } else {
        None
    };
    let range = overlays
        .range
        .map(|r| format!("{} to {}", format_value(r.min), format_value(r.max)));

    rsx! {
        div {
            style: "margin: 8px 0; padding: 8px 12px; background: #F5F5F5; border-radius: 4px; border: 1px solid #E0E0E0; font-size: 12px;",
            strong { "Legend ({key})" }
            for entry in entries {
                div {
                    key: "{entry.color}",
                    style: "display: flex; gap: 6px; align-items: center; margin-top: 4px;",
                    span {
                        style: "display: inline-block; width: 14px; height: 14px; border: 1px solid #9E9E9E; background: {entry.color};",
                    }
                    "{entry.description}"
                }
            }
            if let Some(style) = gradient {
                div { style: "{style}" }
            }
            if let Some(range) = range {
                div { "Range: {range}" }
            }
        }
    }
}
