//! Place name input that geocodes into the bounding box fields.

use crate::dispatch::run_effects;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn PlaceSearch() -> Element {
    let mut state = use_context::<AppState>();
    let place = (state.place)();

    let on_input = move |evt: Event<FormData>| {
        state.place.set(evt.value());
    };

    let lookup = move |_| {
        let place = state.place.read().clone();
        let effects = state.session.write().lookup_place(&place);
        run_effects(state, effects);
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 8px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Place: "
                input {
                    r#type: "text",
                    placeholder: "e.g. Nairobi",
                    value: "{place}",
                    oninput: on_input,
                }
            }
            button {
                onclick: lookup,
                "Get Coordinates"
            }
        }
    }
}
