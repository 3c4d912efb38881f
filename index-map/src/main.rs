//! Vegetation and Water Index Map
//!
//! Leaflet map over satellite imagery where the user selects an area, a date
//! range and an index (NDVI, EVI, NDWI or MNDWI), and the backend returns a
//! tile layer for the index computed over that area.
//!
//! Data flow:
//! 1. Form inputs and map events call `MapSession` operations.
//! 2. Each operation returns map commands and at most one backend request.
//! 3. `run_effects` sends the commands to Leaflet and spawns the request.
//! 4. The response is resolved back into the session, which renders the
//!    overlay and notifies the user.
//!
//! The backend base URL is taken from `VWI_API_BASE` at build time.

use dioxus::prelude::*;
use futures::StreamExt;
use vwi_core::config::ClientConfig;
use vwi_map_ui::components::{
    DrawModalDialog, Landing, LegendPanel, MapContainer, MapControls, NotificationStack,
};
use vwi_map_ui::dispatch::run_effects;
use vwi_map_ui::js_bridge;
use vwi_map_ui::state::AppState;
use vwi_session::MapEvent;

/// Map container DOM element ID used by Leaflet to render into.
const MAP_ID: &str = "index-map";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("index-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| {
        AppState::new(ClientConfig::default().with_api_base(option_env!("VWI_API_BASE")))
    });

    // Map events arrive from JS outside the Dioxus runtime; funnel them
    // through a channel and handle them here.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<MapEvent>| async move {
        while let Some(event) = rx.next().await {
            log::debug!("map event: {:?}", event);
            let effects = state.session.write().handle_map_event(event);
            run_effects(state, effects);
        }
    });

    // Initialize the map once the landing panel is dismissed
    use_effect(move || {
        if !(state.started)() {
            return;
        }
        js_bridge::register_event_handler(move |json: String| {
            match MapEvent::from_json(&json) {
                Ok(event) => events.send(event),
                Err(e) => log::warn!("Ignoring malformed map event {}: {}", json, e),
            }
        });
        js_bridge::init_map(MAP_ID, &*state.config.peek());
    });

    let loading = state.session.read().is_loading();

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            NotificationStack {}

            if !(state.started)() {
                Landing {}
            } else {
                h2 {
                    style: "margin: 0 0 8px 0;",
                    "Vegetation and Water Index Map"
                }
                MapControls {}
                LegendPanel {}
                MapContainer {
                    id: MAP_ID.to_string(),
                    loading,
                }
                div {
                    style: "margin-top: 12px; padding: 8px 12px; background: #F5F5F5; border-radius: 4px; font-size: 12px; color: #616161; border: 1px solid #E0E0E0;",
                    "Draw a polygon or rectangle to query an area, or click the map to read the index at a point. Index data computed with Google Earth Engine."
                }
                DrawModalDialog {}
            }
        }
    }
}
