//! Toast notifications.

use crate::js_bridge::sleep_ms;
use crate::state::AppState;
use dioxus::prelude::*;
use vwi_session::{Level, Notification};

/// How long a toast stays up before dismissing itself.
const TOAST_MS: i32 = 5000;

/// Stack of toasts in the corner of the page.
#[component]
pub fn NotificationStack() -> Element {
    let state = use_context::<AppState>();
    let items = state.session.read().notifications.items().to_vec();

    rsx! {
        div {
            style: "position: fixed; top: 16px; right: 16px; z-index: 3000; display: flex; flex-direction: column; gap: 8px; max-width: 360px;",
            for notification in items {
                Toast { key: "{notification.id}", notification }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ToastProps {
    pub notification: Notification,
}

/// A single toast; click to dismiss.
#[component]
fn Toast(props: ToastProps) -> Element {
    let mut state = use_context::<AppState>();
    let id = props.notification.id;

    use_future(move || async move {
        sleep_ms(TOAST_MS).await;
        state.session.write().dismiss_notification(id);
    });

    let (background, color, border) = match props.notification.level {
        Level::Info => ("#E3F2FD", "#1565C0", "#90CAF9"),
        Level::Success => ("#E8F5E9", "#2E7D32", "#A5D6A7"),
        Level::Warning => ("#FFF8E1", "#EF6C00", "#FFE082"),
        Level::Error => ("#FFEBEE", "#C62828", "#EF9A9A"),
    };
    let style = format!(
        "padding: 12px 16px; background: {}; color: {}; border-radius: 4px; border: 1px solid {}; cursor: pointer;",
        background, color, border
    );

    rsx! {
        div {
            style: "{style}",
            onclick: move |_| state.session.write().dismiss_notification(id),
            "{props.notification.message}"
        }
    }
}
