//! Date range picker with start and end date inputs.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DateRangePickerProps {
    /// Current start date (`YYYY-MM-DD` or empty)
    pub start: String,
    /// Current end date (`YYYY-MM-DD` or empty)
    pub end: String,
    /// Rejected edit count of the draft; a change rebuilds the inputs
    pub revision: u64,
    pub on_start: EventHandler<String>,
    pub on_end: EventHandler<String>,
}

/// Start and end date inputs. Ordering is enforced by the session, which
/// discards an edit that would put the end on or before the start.
#[component]
pub fn DateRangePicker(props: DateRangePickerProps) -> Element {
    let on_start = props.on_start;
    let on_end = props.on_end;

    // A discarded edit leaves `value` unchanged, so the vdom would not touch
    // the input. Keying on the revision remounts it with the stored value.
    rsx! {
        for revision in std::iter::once(props.revision) {
            div {
                key: "{revision}",
                style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
                label {
                    style: "font-weight: bold;",
                    "Start: "
                    input {
                        r#type: "date",
                        value: "{props.start}",
                        max: "{props.end}",
                        onchange: move |evt: Event<FormData>| on_start.call(evt.value()),
                    }
                }
                label {
                    style: "font-weight: bold;",
                    "End: "
                    input {
                        r#type: "date",
                        value: "{props.end}",
                        min: "{props.start}",
                        onchange: move |evt: Event<FormData>| on_end.call(evt.value()),
                    }
                }
            }
        }
    }
}
