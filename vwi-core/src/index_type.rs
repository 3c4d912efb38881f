use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The remote-sensing index computed by the backend.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexType {
    #[default]
    Ndvi,
    Evi,
    Ndwi,
    Mndwi,
}

impl IndexType {
    pub const ALL: [IndexType; 4] = [
        IndexType::Ndvi,
        IndexType::Evi,
        IndexType::Ndwi,
        IndexType::Mndwi,
    ];

    /// Upper-case name as sent in requests and used as legend/range keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexType::Ndvi => "NDVI",
            IndexType::Evi => "EVI",
            IndexType::Ndwi => "NDWI",
            IndexType::Mndwi => "MNDWI",
        }
    }

    /// Lower-case prefix of per-index response fields (`ndvi_tile_url`, `ndvi_value`).
    pub fn field_prefix(&self) -> &'static str {
        match self {
            IndexType::Ndvi => "ndvi",
            IndexType::Evi => "evi",
            IndexType::Ndwi => "ndwi",
            IndexType::Mndwi => "mndwi",
        }
    }

    pub fn tile_url_field(&self) -> String {
        format!("{}_tile_url", self.field_prefix())
    }

    pub fn value_field(&self) -> String {
        format!("{}_value", self.field_prefix())
    }

    /// Human readable description for selectors.
    pub fn description(&self) -> &'static str {
        match self {
            IndexType::Ndvi => "Normalized Difference Vegetation Index",
            IndexType::Evi => "Enhanced Vegetation Index",
            IndexType::Ndwi => "Normalized Difference Water Index",
            IndexType::Mndwi => "Modified Normalized Difference Water Index",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexType::ALL
            .into_iter()
            .find(|index| index.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownIndex(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::IndexType;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ndvi".parse::<IndexType>().unwrap(), IndexType::Ndvi);
        assert_eq!("MNDWI".parse::<IndexType>().unwrap(), IndexType::Mndwi);
        assert_eq!(" Evi ".parse::<IndexType>().unwrap(), IndexType::Evi);
        assert!("savi".parse::<IndexType>().is_err());
    }

    #[test]
    fn test_response_field_names() {
        assert_eq!(IndexType::Ndwi.tile_url_field(), "ndwi_tile_url");
        assert_eq!(IndexType::Mndwi.value_field(), "mndwi_value");
    }

    #[test]
    fn test_serializes_upper_case() {
        let json = serde_json::to_string(&IndexType::Evi).unwrap();
        assert_eq!(json, "\"EVI\"");
    }
}
