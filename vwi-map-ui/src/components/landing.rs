//! Welcome panel shown before the map.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn Landing() -> Element {
    let mut state = use_context::<AppState>();

    rsx! {
        div {
            style: "max-width: 640px; margin: 48px auto; padding: 24px; background: #F5F5F5; border-radius: 6px; border: 1px solid #E0E0E0;",
            h2 { style: "margin-top: 0;", "Welcome to the Vegetation Index Analysis Tool" }
            p {
                "Look up a place or draw an area on the map, pick a date range and an index, "
                "and the index computed from satellite imagery is drawn over the map."
            }
            ul {
                li { "NDVI: vegetation health" }
                li { "EVI: vegetation in dense canopy" }
                li { "NDWI: open water" }
                li { "MNDWI: water in built-up areas" }
            }
            p { "Click anywhere on the map to read the index value at that point." }
            button {
                onclick: move |_| state.started.set(true),
                "Open the map"
            }
        }
    }
}
