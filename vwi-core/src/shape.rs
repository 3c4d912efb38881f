//! Shapes drawn on the map.
//!
//! The draw toolbar reports a raw `DrawEvent` per created layer. It is
//! resolved once into a `DrawnShape`, which is what the rest of the
//! application works with.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Parses `lat,lng`.
impl FromStr for LatLng {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidCoordinate(s.to_string());
        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid());
        }
        Ok(LatLng { lat, lng })
    }
}

/// Layer created by the draw toolbar, as reported by the JS bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "layerType", rename_all = "lowercase")]
pub enum DrawEvent {
    Polygon { latlngs: Vec<LatLng> },
    Rectangle { latlngs: Vec<LatLng> },
    Marker { latlng: LatLng },
    Circle { latlng: LatLng, radius: f64 },
    Circlemarker { latlng: LatLng },
}

/// The user's selected area.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawnShape {
    Polygon(Vec<LatLng>),
    Point(LatLng),
}

impl DrawnShape {
    /// Build a polygon, requiring at least three vertices.
    pub fn polygon(vertices: Vec<LatLng>) -> Result<Self, ValidationError> {
        if vertices.len() < 3 {
            return Err(ValidationError::TooFewVertices(vertices.len()));
        }
        Ok(DrawnShape::Polygon(vertices))
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            DrawnShape::Polygon(vertices) => vertices.len(),
            DrawnShape::Point(_) => 1,
        }
    }
}

impl TryFrom<DrawEvent> for DrawnShape {
    type Error = ValidationError;

    fn try_from(event: DrawEvent) -> Result<Self, Self::Error> {
        match event {
            DrawEvent::Polygon { latlngs } | DrawEvent::Rectangle { latlngs } => {
                DrawnShape::polygon(latlngs)
            }
            DrawEvent::Marker { latlng }
            | DrawEvent::Circle { latlng, .. }
            | DrawEvent::Circlemarker { latlng } => Ok(DrawnShape::Point(latlng)),
        }
    }
}
