//! Core types for the vegetation/water index map.
//!
//! This crate provides:
//! - domain types: bounding boxes, drawn shapes, date ranges, index types
//! - overlay slot state and legend data
//! - `wire`: request/response bodies exchanged with the index backend
//! - `geocode`: Nominatim result decoding
//! - `client` (feature `api`): reqwest-based HTTP client for both

pub mod bounding_box;
pub mod config;
pub mod date_range;
pub mod error;
pub mod geocode;
pub mod index_type;
pub mod overlay;
pub mod shape;
pub mod wire;

#[cfg(feature = "api")]
pub mod client;
