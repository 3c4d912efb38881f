//! Endpoint and map configuration shared by the web app and the CLI.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_GEOCODER_BASE: &str = "https://nominatim.openstreetmap.org";
/// Satellite imagery base layer.
pub const DEFAULT_BASE_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
pub const DEFAULT_BASE_ATTRIBUTION: &str = "Tiles &copy; Esri";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the index backend, without a trailing slash.
    pub api_base: String,
    pub bbox_path: String,
    pub area_path: String,
    pub point_path: String,
    pub geocoder_base: String,
    pub base_tile_url: String,
    pub base_attribution: String,
    /// Initial map center as `[lat, lng]`.
    pub map_center: [f64; 2],
    pub map_zoom: u8,
    /// Request timeout for native clients. Browsers use their own default.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            bbox_path: "/get-ndvi".to_string(),
            area_path: "/get-ndvi-for-area".to_string(),
            point_path: "/get-index-values".to_string(),
            geocoder_base: DEFAULT_GEOCODER_BASE.to_string(),
            base_tile_url: DEFAULT_BASE_TILE_URL.to_string(),
            base_attribution: DEFAULT_BASE_ATTRIBUTION.to_string(),
            map_center: [-1.0, 37.0],
            map_zoom: 10,
            timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Default config with `api_base` replaced, if given.
    pub fn with_api_base(mut self, api_base: Option<&str>) -> Self {
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        self
    }

    /// Join a backend path onto `api_base`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Parse a JSON config file body. Missing keys fall back to defaults.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::ClientConfig;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = ClientConfig::default().with_api_base(Some("https://api.example.org/"));
        assert_eq!(config.api_base, "https://api.example.org");
        assert_eq!(
            config.endpoint(&config.area_path),
            "https://api.example.org/get-ndvi-for-area"
        );
    }

    #[test]
    fn test_blank_override_keeps_default() {
        let config = ClientConfig::default().with_api_base(Some("  "));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ClientConfig::from_json(r#"{"point_path": "/values"}"#).unwrap();
        assert_eq!(config.point_path, "/values");
        assert_eq!(config.bbox_path, "/get-ndvi");
        assert_eq!(config.map_zoom, 10);
    }
}
