//! Overlay slots, legends and index ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::index_type::IndexType;

/// Default attribution for overlay tiles when the backend omits one.
pub const DEFAULT_ATTRIBUTION: &str = "Google Earth Engine";

/// One overlay position on the map.
///
/// Bounding-box queries fill the `Query` slot. Polygon-area queries fill the
/// slot of the requested index, so different indices can be shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum OverlayKey {
    Query,
    Index(IndexType),
}

impl OverlayKey {
    pub const ALL: [OverlayKey; 5] = [
        OverlayKey::Query,
        OverlayKey::Index(IndexType::Ndvi),
        OverlayKey::Index(IndexType::Evi),
        OverlayKey::Index(IndexType::Ndwi),
        OverlayKey::Index(IndexType::Mndwi),
    ];

    /// Stable id used for the Leaflet layer registry.
    pub fn layer_id(&self) -> String {
        match self {
            OverlayKey::Query => "query".to_string(),
            OverlayKey::Index(index) => index.field_prefix().to_string(),
        }
    }
}

impl fmt::Display for OverlayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayKey::Query => f.write_str("Query result"),
            OverlayKey::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Lifecycle of a single overlay slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverlaySlot {
    #[default]
    Absent,
    /// A request is in flight; `previous` stays on the map until it resolves.
    Loading { previous: Option<String> },
    Displayed { url: String },
}

impl OverlaySlot {
    /// The tile URL that should currently be on the map for this slot.
    pub fn visible_url(&self) -> Option<&str> {
        match self {
            OverlaySlot::Absent => None,
            OverlaySlot::Loading { previous } => previous.as_deref(),
            OverlaySlot::Displayed { url } => Some(url),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, OverlaySlot::Loading { .. })
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, OverlaySlot::Absent)
    }

    pub fn loading(&self) -> OverlaySlot {
        OverlaySlot::Loading {
            previous: self.visible_url().map(str::to_string),
        }
    }

    /// Revert a failed load to whatever was displayed before it.
    pub fn reverted(&self) -> OverlaySlot {
        match self {
            OverlaySlot::Loading {
                previous: Some(url),
            } => OverlaySlot::Displayed { url: url.clone() },
            OverlaySlot::Loading { previous: None } => OverlaySlot::Absent,
            other => other.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub color: String,
    pub description: String,
}

/// Color swatches with their descriptions, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Legend(pub Vec<LegendEntry>);

impl Legend {
    /// Build a legend from a `{color: description}` JSON object.
    pub fn from_json_object(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        Legend(
            map.iter()
                .map(|(color, description)| LegendEntry {
                    color: color.clone(),
                    description: match description {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                })
                .collect(),
        )
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Observed min/max of the index for a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexRange {
    pub min: f64,
    pub max: f64,
}

/// Everything the map needs to show one query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexOverlay {
    pub tile_url: String,
    pub legend: Legend,
    pub range: Option<IndexRange>,
    pub palette: Vec<String>,
    pub attribution: String,
}
