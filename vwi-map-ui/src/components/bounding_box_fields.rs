//! Read-only view of the bounding box filled by geocoding.

use crate::state::AppState;
use dioxus::prelude::*;
use vwi_utils::format::format_coordinate;

#[component]
pub fn BoundingBoxFieldsView() -> Element {
    let state = use_context::<AppState>();
    let bbox = state.session.read().bbox;
    let fields = [
        ("Lon min", bbox.lon_min),
        ("Lat min", bbox.lat_min),
        ("Lon max", bbox.lon_max),
        ("Lat max", bbox.lat_max),
    ];

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
            for (label, value) in fields {
                label {
                    key: "{label}",
                    style: "font-size: 13px;",
                    "{label}: "
                    input {
                        r#type: "text",
                        readonly: true,
                        style: "width: 110px;",
                        value: "{format_coordinate(value)}",
                    }
                }
            }
        }
    }
}
