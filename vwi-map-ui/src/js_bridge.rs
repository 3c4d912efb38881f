//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet map script lives in `assets/js/index-map.js` and is evaluated
//! as globals (no ES modules) once Leaflet and Leaflet.draw have loaded.
//! This module provides safe Rust wrappers that serialize map commands and
//! call those globals, plus the callback the script uses to report events.

use vwi_core::config::ClientConfig;
use vwi_session::MapCommand;
use wasm_bindgen::prelude::*;

// Embed the map script at compile time
static INDEX_MAP_JS: &str = include_str!("../assets/js/index-map.js");

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_DRAW_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet.draw/1.0.4/leaflet.draw.css";
const LEAFLET_DRAW_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet.draw/1.0.4/leaflet.draw.js";

/// Name of the global the map script calls with event JSON.
const EVENT_HANDLER: &str = "__vwiOnMapEvent";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('VWI JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Add the Leaflet and Leaflet.draw stylesheets and scripts to `<head>`.
///
/// Leaflet.draw must load after Leaflet, so it is chained on Leaflet's onload.
pub fn load_leaflet() {
    call_js(&format!(
        r#"
        (function() {{
            if (window.__vwiLeafletRequested) return;
            window.__vwiLeafletRequested = true;
            function css(href) {{
                var l = document.createElement('link');
                l.rel = 'stylesheet'; l.href = href;
                document.head.appendChild(l);
            }}
            function js(src, onload) {{
                var s = document.createElement('script');
                s.src = src; s.onload = onload;
                document.head.appendChild(s);
            }}
            css({leaflet_css});
            css({draw_css});
            if (typeof L === 'undefined') {{
                js({leaflet_js}, function() {{ js({draw_js}); }});
            }} else if (typeof L.Control.Draw === 'undefined') {{
                js({draw_js});
            }}
        }})();
        "#,
        leaflet_css = js_string(LEAFLET_CSS),
        draw_css = js_string(LEAFLET_DRAW_CSS),
        leaflet_js = js_string(LEAFLET_JS),
        draw_js = js_string(LEAFLET_DRAW_JS),
    ));
}

/// Initialize the map with a wait-for-Leaflet polling loop.
///
/// The map script defines functions like `applyMapCommands(...)` via
/// `function` declarations. To ensure they become globally accessible
/// (not block-scoped inside the setInterval callback), we evaluate them
/// at global scope via indirect eval once Leaflet.draw is ready, then
/// explicitly promote each function to `window.*`.
pub fn init_map(container_id: &str, config: &ClientConfig) {
    load_leaflet();

    let store_js = format!("window.__vwiMapScript = {};", js_string(INDEX_MAP_JS));
    let _ = js_sys::eval(&store_js);

    let config_json = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof L !== 'undefined' &&
                    typeof L.Control !== 'undefined' &&
                    typeof L.Control.Draw !== 'undefined' &&
                    document.getElementById({container})) {{
                    clearInterval(poll);
                    if (window.__vwiMapScript) {{
                        (0, eval)(window.__vwiMapScript);
                        delete window.__vwiMapScript;
                        window.initIndexMap = initIndexMap;
                        window.applyMapCommands = applyMapCommands;
                    }}
                    try {{
                        window.initIndexMap({container}, {config});
                    }} catch(e) {{ console.error('[VWI] initIndexMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        container = js_string(container_id),
        config = config_json,
    ));
}

/// Send map commands to the Leaflet script. Commands issued before the map
/// is ready are queued on `window` and replayed by `initIndexMap`.
pub fn apply_commands(commands: &[MapCommand]) {
    if commands.is_empty() {
        return;
    }
    let json = match serde_json::to_string(commands) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize map commands: {}", e);
            return;
        }
    };
    log::debug!("map commands: {}", json);
    call_js(&format!(
        r#"
        if (typeof window.applyMapCommands === 'function') {{
            window.applyMapCommands({json});
        }} else {{
            window.__vwiPendingCommands = (window.__vwiPendingCommands || []).concat(JSON.parse({json}));
        }}
        "#,
        json = js_string(&json),
    ));
}

/// Register the callback the map script invokes with event JSON.
///
/// The closure is leaked; it lives as long as the page.
pub fn register_event_handler(handler: impl FnMut(String) + 'static) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, map events disabled");
        return;
    };
    let closure = Closure::<dyn FnMut(String)>::new(handler);
    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str(EVENT_HANDLER),
        closure.as_ref(),
    ) {
        log::error!("Failed to register map event handler: {:?}", e);
    }
    closure.forget();
}

/// Resolve after `ms` milliseconds using `setTimeout`.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
