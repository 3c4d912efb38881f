//! Runs session effects: map commands go to the Leaflet bridge, requests
//! are spawned on the Dioxus runtime and resolved back into the session.

use dioxus::prelude::*;
use vwi_core::error::QueryError;
use vwi_session::{Effects, PendingRequest, RequestKind, Resolved};

use crate::js_bridge;
use crate::state::AppState;

/// Execute the effects of one session operation.
///
/// Must be called from inside the Dioxus runtime (event handler, effect or
/// coroutine) because requests are spawned as tasks.
pub fn run_effects(state: AppState, effects: Effects) {
    js_bridge::apply_commands(&effects.commands);
    if let Some(request) = effects.request {
        spawn_request(state, request);
    }
}

fn spawn_request(mut state: AppState, request: PendingRequest) {
    let client = state.client.read().clone();
    spawn(async move {
        let outcome = match client {
            Some(client) => match &request.kind {
                RequestKind::Query(query) => client.send(query).await.map(Resolved::Query),
                RequestKind::Geocode { place } => {
                    client.geocode(place).await.map(Resolved::Geocode)
                }
            },
            None => Err(QueryError::Transport("HTTP client unavailable".to_string())),
        };
        let effects = state.session.write().resolve(request.id, outcome);
        // resolutions never dispatch follow-up requests
        js_bridge::apply_commands(&effects.commands);
    });
}
