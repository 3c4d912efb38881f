//! Nominatim search result decoding.

use serde::Deserialize;

use crate::bounding_box::BoundingBox;
use crate::error::QueryError;

/// One entry of a Nominatim `/search?format=json` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub display_name: String,
    /// `[latMin, latMax, lonMin, lonMax]` as decimal strings
    pub boundingbox: Vec<String>,
}

impl Place {
    pub fn bounding_box(&self) -> Result<BoundingBox, QueryError> {
        let values = self
            .boundingbox
            .iter()
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| QueryError::Decode(format!("bad boundingbox value `{}`", s)))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        match values.as_slice() {
            [lat_min, lat_max, lon_min, lon_max] => Ok(BoundingBox {
                lon_min: *lon_min,
                lat_min: *lat_min,
                lon_max: *lon_max,
                lat_max: *lat_max,
            }),
            _ => Err(QueryError::Decode(format!(
                "boundingbox has {} values, expected 4",
                values.len()
            ))),
        }
    }
}

/// Bounding box of the first search result; `None` when nothing matched.
pub fn first_bounding_box(body: &str) -> Result<Option<BoundingBox>, QueryError> {
    let places: Vec<Place> = serde_json::from_str(body)?;
    places.first().map(Place::bounding_box).transpose()
}
