//! Browser helpers, each with an inert native fallback so components and
//! hooks render under the native test harness.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions, UrlSearchParams};

/// Whether the page was loaded with `?debug` in the query string.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn debug_requested() -> bool {
    let Some(search) = web_sys::window().and_then(|win| win.location().search().ok()) else {
        return false;
    };
    UrlSearchParams::new_with_str(&search).is_ok_and(|params| params.has("debug"))
}

/// No query string off the browser; debug mode stays off.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub const fn debug_requested() -> bool {
    false
}

/// Move keyboard focus to the element with the given id, if it exists.
#[cfg(target_arch = "wasm32")]
pub fn focus_element(id: &str) {
    if let Some(document) = web_sys::window().and_then(|win| win.document())
        && let Some(element) = document.get_element_by_id(id)
        && let Ok(element) = element.dyn_into::<HtmlElement>()
    {
        let _ = element.focus();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn focus_element(_id: &str) {}

/// Smooth-scroll the window back to the top, as after a page transition.
#[cfg(target_arch = "wasm32")]
pub fn scroll_to_top() {
    if let Some(win) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_to_top() {}

/// Current time as an ISO-8601 string from the browser clock.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn now_iso() -> String {
    String::from(js_sys::Date::new_0().to_iso_string())
}

/// Off the browser the harnesses supply their own timestamps.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn now_iso() -> String {
    String::new()
}

/// A session seed drawn from the browser clock.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn clock_entropy() -> u64 {
    js_sys::Date::now().to_bits()
}

#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn clock_entropy() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}
