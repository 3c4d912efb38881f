//! HTTP client for the index backend and the geocoder.
//!
//! Works natively and on `wasm32` (reqwest uses `fetch` there). Each call is a
//! single attempt; nothing is retried.

use log::{debug, error, info};
use reqwest::Client;

use crate::bounding_box::BoundingBox;
use crate::config::ClientConfig;
use crate::error::{QueryError, Result};
use crate::geocode::first_bounding_box;
use crate::wire::{QueryOutcome, QueryRequest};

#[derive(Clone, Debug)]
pub struct IndexClient {
    client: Client,
    config: ClientConfig,
}

fn transport(err: reqwest::Error) -> QueryError {
    QueryError::Transport(err.to_string())
}

impl IndexClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("vwi/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        #[cfg(target_arch = "wasm32")]
        let client = Client::new();

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send one backend request and decode its response.
    pub async fn send(&self, request: &QueryRequest) -> Result<QueryOutcome> {
        let url = request.url(&self.config);
        let body = request.body()?;
        info!("POST {} ({})", url, request.index());
        debug!("request body: {}", body);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = QueryError::from_status(status.as_u16());
            if err.is_not_found() {
                info!("{} returned 404, no imagery in range", url);
            } else {
                error!("{} returned {}", url, status);
            }
            return Err(err);
        }

        let text = response.text().await.map_err(transport)?;
        request.decode(&text)
    }

    /// Resolve a place name to the bounding box of the first match.
    pub async fn geocode(&self, place: &str) -> Result<Option<BoundingBox>> {
        let url = format!(
            "{}/search",
            self.config.geocoder_base.trim_end_matches('/')
        );
        info!("Geocoding `{}`", place);

        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("format", "json"), ("polygon_geojson", "1")])
            .send()
            .await
            .map_err(|e| {
                error!("Geocoding request failed: {}", e);
                transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Geocoder returned {}", status);
            return Err(QueryError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(transport)?;
        first_bounding_box(&text)
    }
}
