mod quiz;
mod session;

use crate::app::state::AppState;
use charis_engine::Response;
use yew::prelude::*;

pub use quiz::{build_answer, build_next, build_prev, build_submit};
pub use session::{build_restart, build_start};

/// Per-page gate message. Deliberately carries no count; the global gate
/// message is the one that does.
pub const PAGE_GATE_NOTICE: &str = "Please answer every question on this page before continuing.";

/// Shown when start is pressed before the feeds have landed.
pub const STILL_LOADING_NOTICE: &str =
    "The assessment data is still loading. Please try again in a moment.";

/// Global gate message with the exact remaining count.
#[must_use]
pub fn global_gate_notice(remaining: usize) -> String {
    format!("Please answer all questions before viewing your results ({remaining} remaining).")
}

#[derive(Clone)]
pub struct AppHandlers {
    pub start: Callback<()>,
    pub answer: Callback<(AttrValue, Response)>,
    pub prev: Callback<()>,
    pub next: Callback<()>,
    pub submit: Callback<()>,
    pub restart: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            start: build_start(state),
            answer: build_answer(state),
            prev: build_prev(state),
            next: build_next(state),
            submit: build_submit(state),
            restart: build_restart(state),
        }
    }
}
