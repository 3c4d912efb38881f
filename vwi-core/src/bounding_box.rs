use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// A rectangular lon/lat extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// `[lonMin, latMin, lonMax, latMax]`, the order the backend expects.
    pub fn coordinates(&self) -> [f64; 4] {
        [self.lon_min, self.lat_min, self.lon_max, self.lat_max]
    }

    /// `[[south, west], [north, east]]` for Leaflet's `fitBounds`.
    pub fn leaflet_bounds(&self) -> [[f64; 2]; 2] {
        [[self.lat_min, self.lon_min], [self.lat_max, self.lon_max]]
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }
}

/// Parses `lonMin,latMin,lonMax,latMax`.
impl FromStr for BoundingBox {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::InvalidCoordinate(part.trim().to_string()))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        match values.as_slice() {
            [lon_min, lat_min, lon_max, lat_max] => Ok(BoundingBox {
                lon_min: *lon_min,
                lat_min: *lat_min,
                lon_max: *lon_max,
                lat_max: *lat_max,
            }),
            _ => Err(ValidationError::InvalidCoordinate(s.to_string())),
        }
    }
}

/// The four read-only bounding box inputs. Any of them may be blank.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBoxFields {
    pub lon_min: Option<f64>,
    pub lat_min: Option<f64>,
    pub lon_max: Option<f64>,
    pub lat_max: Option<f64>,
}

impl BoundingBoxFields {
    /// A complete box only when all four fields are populated.
    pub fn complete(&self) -> Option<BoundingBox> {
        Some(BoundingBox {
            lon_min: self.lon_min?,
            lat_min: self.lat_min?,
            lon_max: self.lon_max?,
            lat_max: self.lat_max?,
        })
    }

    pub fn is_blank(&self) -> bool {
        *self == BoundingBoxFields::default()
    }
}

impl From<BoundingBox> for BoundingBoxFields {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            lon_min: Some(bbox.lon_min),
            lat_min: Some(bbox.lat_min),
            lon_max: Some(bbox.lon_max),
            lat_max: Some(bbox.lat_max),
        }
    }
}
