//! Map container component with loading state.

use dioxus::prelude::*;

use super::LoadingSpinner;

/// Props for MapContainer
#[derive(Props, Clone, PartialEq)]
pub struct MapContainerProps {
    /// The DOM id for the map container (Leaflet will render into this)
    pub id: String,
    /// Whether a request is outstanding
    #[props(default = false)]
    pub loading: bool,
    /// Optional height in pixels
    #[props(default = 560)]
    pub height: u32,
}

/// A container div for the Leaflet map with loading overlay.
#[component]
pub fn MapContainer(props: MapContainerProps) -> Element {
    let style = format!("height: {}px; position: relative; width: 100%;", props.height);

    rsx! {
        div {
            style: "{style}",
            if props.loading {
                LoadingSpinner {}
            }
            div {
                id: "{props.id}",
                style: "width: 100%; height: 100%;",
            }
        }
    }
}
