//! Query form: place, bounding box, dates, index and the map actions.

use super::{BoundingBoxFieldsView, DateRangePicker, IndexSelector, PlaceSearch};
use crate::dispatch::run_effects;
use crate::state::AppState;
use dioxus::prelude::*;
use vwi_core::index_type::IndexType;

#[component]
pub fn MapControls() -> Element {
    let mut state = use_context::<AppState>();
    let (dates, index, popup_open) = {
        let session = state.session.read();
        (session.dates.clone(), session.index, session.popup.is_some())
    };

    let submit = move |_| {
        let effects = state.session.write().submit_bbox_query();
        run_effects(state, effects);
    };
    let clear = move |_| {
        let effects = state.session.write().clear_map();
        state.place.set(String::new());
        run_effects(state, effects);
    };
    let close_popup = move |_| {
        let effects = state.session.write().close_popup();
        run_effects(state, effects);
    };

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            PlaceSearch {}
            BoundingBoxFieldsView {}
            DateRangePicker {
                start: dates.start.clone(),
                end: dates.end.clone(),
                revision: dates.rejected_edits(),
                on_start: move |value: String| state.session.write().set_start_date(&value),
                on_end: move |value: String| state.session.write().set_end_date(&value),
            }
            IndexSelector {
                value: index,
                onchange: move |index: IndexType| state.session.write().set_index(index),
            }
            div {
                style: "margin: 8px 0; display: flex; gap: 8px;",
                button { onclick: submit, "Get Index Data" }
                button { onclick: clear, "Clear Map" }
                if popup_open {
                    button { onclick: close_popup, "Close popup" }
                }
            }
        }
    }
}
