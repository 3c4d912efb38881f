//! Modal asking for dates and index after a shape is drawn.

use super::{DateRangePicker, IndexSelector};
use crate::dispatch::run_effects;
use crate::state::AppState;
use dioxus::prelude::*;
use vwi_core::index_type::IndexType;

/// Rendered only while the session has an open modal.
#[component]
pub fn DrawModalDialog() -> Element {
    let mut state = use_context::<AppState>();
    let Some(modal) = state.session.read().modal.clone() else {
        return rsx! {};
    };
    let ready = modal.dates.is_complete();

    let confirm = move |_| {
        let effects = state.session.write().confirm_modal();
        run_effects(state, effects);
    };
    let cancel = move |_| {
        let effects = state.session.write().cancel_modal();
        run_effects(state, effects);
    };

    rsx! {
        div {
            style: "position: fixed; inset: 0; z-index: 2000; display: flex; justify-content: center; align-items: center; background: rgba(0, 0, 0, 0.4);",
            div {
                style: "min-width: 320px; padding: 16px 20px; background: #FFFFFF; border-radius: 6px; box-shadow: 0 4px 16px rgba(0, 0, 0, 0.3);",
                h3 { style: "margin: 0 0 8px 0;", "Query drawn area" }
                DateRangePicker {
                    start: modal.dates.start.clone(),
                    end: modal.dates.end.clone(),
                revision: modal.dates.rejected_edits(),
                    on_start: move |value: String| state.session.write().modal_set_start(&value),
                    on_end: move |value: String| state.session.write().modal_set_end(&value),
                }
                IndexSelector {
                    value: modal.index,
                    onchange: move |index: IndexType| state.session.write().modal_set_index(index),
                }
                div {
                    style: "margin-top: 12px; display: flex; gap: 8px; justify-content: flex-end;",
                    button { onclick: cancel, "Cancel" }
                    button { disabled: !ready, onclick: confirm, "Confirm" }
                }
            }
        }
    }
}
