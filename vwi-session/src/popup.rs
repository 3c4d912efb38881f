//! Point query popup.

use vwi_core::index_type::IndexType;
use vwi_core::shape::LatLng;
use vwi_utils::format::format_value;

use crate::loading::RequestId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupContent {
    Loading,
    Value(f64),
    NoData,
}

/// A clicked location and its index value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointQueryResult {
    pub lat: f64,
    pub lng: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointPopup {
    pub request: RequestId,
    pub at: LatLng,
    pub index: IndexType,
    pub content: PopupContent,
}

impl PointPopup {
    pub fn text(&self) -> String {
        match self.content {
            PopupContent::Loading => "Loading...".to_string(),
            PopupContent::Value(value) => format!("{}: {}", self.index, format_value(value)),
            PopupContent::NoData => format!("{}: No data", self.index),
        }
    }

    pub fn result(&self) -> Option<PointQueryResult> {
        match self.content {
            PopupContent::Value(value) => Some(PointQueryResult {
                lat: self.at.lat,
                lng: self.at.lng,
                value,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup(content: PopupContent) -> PointPopup {
        PointPopup {
            request: RequestId(1),
            at: LatLng::new(-1.3, 36.8),
            index: IndexType::Ndvi,
            content,
        }
    }

    #[test]
    fn test_popup_text() {
        assert_eq!(popup(PopupContent::Loading).text(), "Loading...");
        assert_eq!(popup(PopupContent::Value(0.4567)).text(), "NDVI: 0.46");
        assert_eq!(popup(PopupContent::NoData).text(), "NDVI: No data");
    }

    #[test]
    fn test_result_only_with_value() {
        assert!(popup(PopupContent::Loading).result().is_none());
        let result = popup(PopupContent::Value(0.5)).result().unwrap();
        assert_eq!((result.lat, result.lng, result.value), (-1.3, 36.8, 0.5));
    }
}
