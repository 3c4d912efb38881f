//! Command implementations for the VWI CLI.
//!
//! Provides subcommands for geocoding a place and querying the index
//! backend by bounding box, drawn area or single point.

use clap::Subcommand;
use vwi_core::bounding_box::BoundingBox;
use vwi_core::config::ClientConfig;
use vwi_core::index_type::IndexType;
use vwi_core::shape::LatLng;

pub mod config;
pub mod query;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a place name and print its bounding box
    Geocode {
        /// Place name, e.g. "Nairobi"
        place: String,
    },

    /// Query an index over a bounding box (from a place name or explicit bounds)
    Bbox {
        /// Place name to geocode into the bounding box
        #[arg(short, long, conflicts_with = "bounds", required_unless_present = "bounds")]
        place: Option<String>,

        /// Explicit bounds as lonMin,latMin,lonMax,latMax
        #[arg(short, long, allow_hyphen_values = true)]
        bounds: Option<BoundingBox>,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// End date (YYYY-MM-DD), after the start date
        #[arg(short, long)]
        end: String,

        /// NDVI, EVI, NDWI or MNDWI
        #[arg(short, long, default_value = "NDVI")]
        index: IndexType,
    },

    /// Query an index over a polygon given as three or more vertices
    Area {
        /// Polygon vertex as lat,lng (repeat for each vertex)
        #[arg(short, long = "vertex", allow_hyphen_values = true, required = true)]
        vertices: Vec<LatLng>,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        #[arg(short, long, default_value = "NDVI")]
        index: IndexType,
    },

    /// Read the index value at a single point
    Point {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[arg(short, long)]
        start: String,

        #[arg(short, long)]
        end: String,

        #[arg(short, long, default_value = "NDVI")]
        index: IndexType,
    },
}

pub async fn run(command: Command, config: ClientConfig) -> anyhow::Result<()> {
    match command {
        Command::Geocode { place } => query::run_geocode(config, &place).await,
        Command::Bbox {
            place,
            bounds,
            start,
            end,
            index,
        } => query::run_bbox(config, place.as_deref(), bounds, &start, &end, index).await,
        Command::Area {
            vertices,
            start,
            end,
            index,
        } => query::run_area(config, vertices, &start, &end, index).await,
        Command::Point {
            lat,
            lng,
            start,
            end,
            index,
        } => query::run_point(config, LatLng::new(lat, lng), &start, &end, index).await,
    }
}
