//! Shared Dioxus components and Leaflet bridge for the index map.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Leaflet map script via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `dispatch`: runs session effects (map commands, HTTP requests)
//! - `components`: Reusable RSX components (inputs, modal, legend, toasts)

pub mod components;
pub mod dispatch;
pub mod js_bridge;
pub mod state;
