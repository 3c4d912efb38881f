//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! Everything about the map view lives in the single `session` signal; the
//! other signals hold UI-only input and the HTTP client.

use dioxus::prelude::*;
use vwi_core::client::IndexClient;
use vwi_core::config::ClientConfig;
use vwi_session::MapSession;

/// Shared application state for the index map app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Selection, overlays, popup, notifications and loading state
    pub session: Signal<MapSession>,
    /// Contents of the place name input
    pub place: Signal<String>,
    /// Endpoints and initial map view
    pub config: Signal<ClientConfig>,
    /// HTTP client (None if it could not be built)
    pub client: Signal<Option<IndexClient>>,
    /// Whether the user has left the landing panel
    pub started: Signal<bool>,
}

impl AppState {
    /// Create a new AppState for the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        let client = match IndexClient::new(config.clone()) {
            Ok(client) => Some(client),
            Err(e) => {
                log::error!("Failed to build HTTP client: {}", e);
                None
            }
        };
        Self {
            session: Signal::new(MapSession::new()),
            place: Signal::new(String::new()),
            config: Signal::new(config),
            client: Signal::new(client),
            started: Signal::new(false),
        }
    }
}
