//! Query implementations: geocoding and the three backend queries.

use anyhow::{anyhow, bail};
use log::info;
use vwi_core::bounding_box::BoundingBox;
use vwi_core::client::IndexClient;
use vwi_core::config::ClientConfig;
use vwi_core::date_range::DateRange;
use vwi_core::error::ValidationError;
use vwi_core::index_type::IndexType;
use vwi_core::overlay::IndexOverlay;
use vwi_core::shape::LatLng;
use vwi_core::wire::{
    AreaQueryRequest, BboxQueryRequest, PointQueryRequest, QueryOutcome, QueryRequest,
};
use vwi_utils::format::format_value;

/// Geocode `place` and print its bounding box as `lonMin,latMin,lonMax,latMax`.
pub async fn run_geocode(config: ClientConfig, place: &str) -> anyhow::Result<()> {
    let client = IndexClient::new(config)?;
    let bbox = geocode(&client, place).await?;
    println!(
        "{},{},{},{}",
        bbox.lon_min, bbox.lat_min, bbox.lon_max, bbox.lat_max
    );
    Ok(())
}

/// Query the index over a bounding box and print the overlay as JSON.
pub async fn run_bbox(
    config: ClientConfig,
    place: Option<&str>,
    bounds: Option<BoundingBox>,
    start: &str,
    end: &str,
    index: IndexType,
) -> anyhow::Result<()> {
    let range = DateRange::parse(start, end)?;
    let client = IndexClient::new(config)?;
    let bbox = match (bounds, place) {
        (Some(bbox), _) => bbox,
        (None, Some(place)) => geocode(&client, place).await?,
        (None, None) => bail!(ValidationError::IncompleteBoundingBox),
    };

    info!(
        "Querying {} over {:?} from {} to {}",
        index,
        bbox.coordinates(),
        range.start_str(),
        range.end_str()
    );
    let request = QueryRequest::Bbox(BboxQueryRequest::new(&bbox, &range, index));
    print_overlay(client.send(&request).await?)
}

/// Query the index over a polygon and print the overlay as JSON.
pub async fn run_area(
    config: ClientConfig,
    vertices: Vec<LatLng>,
    start: &str,
    end: &str,
    index: IndexType,
) -> anyhow::Result<()> {
    let range = DateRange::parse(start, end)?;
    if vertices.len() < 3 {
        bail!(ValidationError::TooFewVertices(vertices.len()));
    }
    let client = IndexClient::new(config)?;

    info!(
        "Querying {} over a {}-vertex polygon from {} to {}",
        index,
        vertices.len(),
        range.start_str(),
        range.end_str()
    );
    let request = QueryRequest::Area(AreaQueryRequest::new(&vertices, &range, index));
    print_overlay(client.send(&request).await?)
}

/// Read the index value at a point and print it.
pub async fn run_point(
    config: ClientConfig,
    at: LatLng,
    start: &str,
    end: &str,
    index: IndexType,
) -> anyhow::Result<()> {
    let range = DateRange::parse(start, end)?;
    let client = IndexClient::new(config)?;

    info!("Querying {} at {}, {}", index, at.lat, at.lng);
    let request = QueryRequest::Point {
        body: PointQueryRequest::new(at, &range),
        index,
    };
    match client.send(&request).await? {
        QueryOutcome::PointValue(value) => {
            println!("{}", point_line(index, value));
            Ok(())
        }
        QueryOutcome::Overlay(_) => Err(anyhow!("Expected a point value, got an overlay")),
    }
}

async fn geocode(client: &IndexClient, place: &str) -> anyhow::Result<BoundingBox> {
    let place = place.trim();
    if place.is_empty() {
        bail!(ValidationError::EmptyPlace);
    }
    client
        .geocode(place)
        .await?
        .ok_or_else(|| anyhow!("Place not found: {}", place))
}

fn print_overlay(outcome: QueryOutcome) -> anyhow::Result<()> {
    match outcome {
        QueryOutcome::Overlay(overlay) => {
            println!("{}", overlay_json(&overlay)?);
            Ok(())
        }
        QueryOutcome::PointValue(_) => Err(anyhow!("Expected an overlay, got a point value")),
    }
}

fn overlay_json(overlay: &IndexOverlay) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(overlay)?)
}

fn point_line(index: IndexType, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}: {}", index, format_value(v)),
        None => format!("{}: No data", index),
    }
}
