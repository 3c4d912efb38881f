//! Events reported by the Leaflet bridge.

use serde::Deserialize;
use vwi_core::shape::{DrawEvent, LatLng};

use crate::session::{Effects, MapSession};

/// JSON payload posted by the map script, tagged by `event`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MapEvent {
    ShapeDrawn { shape: DrawEvent },
    Click { lat: f64, lng: f64 },
    PopupClosed,
}

impl MapEvent {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl MapSession {
    /// Route a map event to the matching session operation.
    pub fn handle_map_event(&mut self, event: MapEvent) -> Effects {
        match event {
            MapEvent::ShapeDrawn { shape } => self.shape_drawn(shape),
            MapEvent::Click { lat, lng } => self.map_clicked(LatLng::new(lat, lng)),
            MapEvent::PopupClosed => {
                // Leaflet already closed it
                self.popup = None;
                Effects::default()
            }
        }
    }
}
