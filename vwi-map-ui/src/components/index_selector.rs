//! Index type selector.

use dioxus::prelude::*;
use vwi_core::index_type::IndexType;

#[derive(Props, Clone, PartialEq)]
pub struct IndexSelectorProps {
    pub value: IndexType,
    pub onchange: EventHandler<IndexType>,
}

/// Dropdown selector for NDVI, EVI, NDWI or MNDWI.
#[component]
pub fn IndexSelector(props: IndexSelectorProps) -> Element {
    let current = props.value;
    let onchange = props.onchange;

    let on_select = move |evt: Event<FormData>| match evt.value().parse::<IndexType>() {
        Ok(index) => onchange.call(index),
        Err(e) => log::warn!("{}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Index: "
                select {
                    onchange: on_select,
                    for index in IndexType::ALL {
                        option {
                            key: "{index}",
                            value: "{index}",
                            selected: index == current,
                            "{index}"
                        }
                    }
                }
            }
            span {
                style: "font-size: 12px; color: #616161;",
                "{current.description()}"
            }
        }
    }
}
