//! Request and response bodies exchanged with the index backend.
//!
//! Responses are decoded leniently from `serde_json::Value` because the field
//! names depend on the requested index (`ndvi_tile_url`, `legend.NDVI`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::bounding_box::BoundingBox;
use crate::config::ClientConfig;
use crate::date_range::DateRange;
use crate::error::QueryError;
use crate::index_type::IndexType;
use crate::overlay::{IndexOverlay, IndexRange, Legend, DEFAULT_ATTRIBUTION};
use crate::shape::LatLng;

/// Body of `POST /get-ndvi`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BboxQueryRequest {
    /// `[lonMin, latMin, lonMax, latMax]`
    pub coordinates: [f64; 4],
    pub start_date: String,
    pub end_date: String,
    pub index: IndexType,
}

impl BboxQueryRequest {
    pub fn new(bbox: &BoundingBox, range: &DateRange, index: IndexType) -> Self {
        Self {
            coordinates: bbox.coordinates(),
            start_date: range.start_str(),
            end_date: range.end_str(),
            index,
        }
    }
}

/// Body of `POST /get-ndvi-for-area`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaQueryRequest {
    /// `[[lat, lng], ...]`
    pub coordinates: Vec<[f64; 2]>,
    pub start_date: String,
    pub end_date: String,
    pub index: IndexType,
}

impl AreaQueryRequest {
    pub fn new(vertices: &[LatLng], range: &DateRange, index: IndexType) -> Self {
        Self {
            coordinates: vertices.iter().map(LatLng::as_pair).collect(),
            start_date: range.start_str(),
            end_date: range.end_str(),
            index,
        }
    }
}

/// Body of `POST /get-index-values`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointQueryRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: String,
    pub end_date: String,
}

impl PointQueryRequest {
    pub fn new(at: LatLng, range: &DateRange) -> Self {
        Self {
            latitude: at.lat,
            longitude: at.lng,
            start_date: range.start_str(),
            end_date: range.end_str(),
        }
    }
}

/// Response of `POST /get-ndvi`.
#[derive(Debug, Clone, Deserialize)]
pub struct BboxQueryResponse {
    pub tile_url: String,
    #[serde(default)]
    pub legend: Option<Value>,
    #[serde(default)]
    pub index_range: Option<Value>,
    #[serde(default)]
    pub palette: Option<Value>,
    #[serde(default)]
    pub attribution: Option<String>,
}

impl BboxQueryResponse {
    pub fn into_overlay(self, index: IndexType) -> IndexOverlay {
        IndexOverlay {
            tile_url: self.tile_url,
            legend: legend_for(self.legend.as_ref(), index),
            range: range_for(self.index_range.as_ref(), index),
            palette: palette_for(self.palette.as_ref(), index),
            attribution: self
                .attribution
                .unwrap_or_else(|| DEFAULT_ATTRIBUTION.to_string()),
        }
    }
}

/// Response of `POST /get-ndvi-for-area`; keys depend on the index.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaQueryResponse(pub Map<String, Value>);

impl AreaQueryResponse {
    pub fn into_overlay(self, index: IndexType) -> Result<IndexOverlay, QueryError> {
        let field = index.tile_url_field();
        let tile_url = self
            .0
            .get(&field)
            .and_then(Value::as_str)
            .ok_or(QueryError::MissingField(field))?
            .to_string();
        Ok(IndexOverlay {
            tile_url,
            legend: legend_for(self.0.get("legend"), index),
            range: range_for(self.0.get("index_range"), index),
            palette: palette_for(self.0.get("palette"), index),
            attribution: self
                .0
                .get("attribution")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_ATTRIBUTION)
                .to_string(),
        })
    }
}

/// Response of `POST /get-index-values`.
#[derive(Debug, Clone, Deserialize)]
pub struct PointQueryResponse(pub Map<String, Value>);

impl PointQueryResponse {
    /// `<index>_value`, if present and numeric.
    pub fn value_for(&self, index: IndexType) -> Option<f64> {
        self.0.get(&index.value_field()).and_then(Value::as_f64)
    }
}

/// Select the per-index sub-object if the value is keyed by index name.
fn keyed<'a>(value: &'a Value, index: IndexType) -> &'a Value {
    match value.get(index.as_str()) {
        Some(inner) if inner.is_object() || inner.is_array() => inner,
        _ => value,
    }
}

fn legend_for(value: Option<&Value>, index: IndexType) -> Legend {
    value
        .map(|v| keyed(v, index))
        .and_then(Value::as_object)
        .map(Legend::from_json_object)
        .unwrap_or_default()
}

/// Accepts `{min, max}` or `{<INDEX>_min, <INDEX>_max}`.
fn range_for(value: Option<&Value>, index: IndexType) -> Option<IndexRange> {
    let obj = keyed(value?, index).as_object()?;
    let lookup = |suffix: &str| {
        obj.get(suffix)
            .or_else(|| obj.get(&format!("{}_{}", index.as_str(), suffix)))
            .and_then(Value::as_f64)
    };
    Some(IndexRange {
        min: lookup("min")?,
        max: lookup("max")?,
    })
}

fn palette_for(value: Option<&Value>, index: IndexType) -> Vec<String> {
    value
        .map(|v| keyed(v, index))
        .and_then(Value::as_array)
        .map(|colors| {
            colors
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// A backend request ready to send, with the index needed to decode its response.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryRequest {
    Bbox(BboxQueryRequest),
    Area(AreaQueryRequest),
    Point {
        body: PointQueryRequest,
        index: IndexType,
    },
}

/// Decoded backend response.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Overlay(IndexOverlay),
    PointValue(Option<f64>),
}

impl QueryRequest {
    pub fn index(&self) -> IndexType {
        match self {
            QueryRequest::Bbox(body) => body.index,
            QueryRequest::Area(body) => body.index,
            QueryRequest::Point { index, .. } => *index,
        }
    }

    /// Endpoint URL for this request under the configured API base.
    pub fn url(&self, config: &ClientConfig) -> String {
        let path = match self {
            QueryRequest::Bbox(_) => &config.bbox_path,
            QueryRequest::Area(_) => &config.area_path,
            QueryRequest::Point { .. } => &config.point_path,
        };
        config.endpoint(path)
    }

    pub fn body(&self) -> Result<Value, QueryError> {
        let value = match self {
            QueryRequest::Bbox(body) => serde_json::to_value(body)?,
            QueryRequest::Area(body) => serde_json::to_value(body)?,
            QueryRequest::Point { body, .. } => serde_json::to_value(body)?,
        };
        Ok(value)
    }

    /// Decode a successful response body.
    pub fn decode(&self, body: &str) -> Result<QueryOutcome, QueryError> {
        match self {
            QueryRequest::Bbox(req) => {
                let response: BboxQueryResponse = serde_json::from_str(body)?;
                Ok(QueryOutcome::Overlay(response.into_overlay(req.index)))
            }
            QueryRequest::Area(req) => {
                let response: AreaQueryResponse = serde_json::from_str(body)?;
                Ok(QueryOutcome::Overlay(response.into_overlay(req.index)?))
            }
            QueryRequest::Point { index, .. } => {
                let response: PointQueryResponse = serde_json::from_str(body)?;
                Ok(QueryOutcome::PointValue(response.value_for(*index)))
            }
        }
    }
}
