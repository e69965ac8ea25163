#[cfg(any(target_arch = "wasm32", test))]
use charis_engine::{AssessmentData, SessionFlow};
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
const QUESTIONS_URL: &str = "/static/assets/data/questions.json";
#[cfg(target_arch = "wasm32")]
const GIFTS_URL: &str = "/static/assets/data/gifts.json";

/// The single user-facing load failure message. Start stays rejected for
/// as long as this state holds; there is no retry.
pub const LOAD_ERROR: &str =
    "Error loading assessment data. Please check that the data files are present.";

#[cfg(target_arch = "wasm32")]
async fn fetch_feed(url: &str) -> Result<String, String> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|err| format!("{url}: {err}"))?;
    if response.status() != 200 {
        return Err(format!("{url}: status {}", response.status()));
    }
    response.text().await.map_err(|err| format!("{url}: {err}"))
}

/// Fetch both feeds with the requests in flight together, then parse and
/// validate them as one unit.
#[cfg(target_arch = "wasm32")]
async fn load_feeds() -> Result<AssessmentData, String> {
    let (questions, gifts) = futures::join!(fetch_feed(QUESTIONS_URL), fetch_feed(GIFTS_URL));
    AssessmentData::from_json(&questions?, &gifts?).map_err(|err| err.to_string())
}

/// Fold a fetch outcome into the flow: feeds install as ready, any
/// failure collapses to the one static user-facing message.
#[cfg(any(target_arch = "wasm32", test))]
fn apply(flow: &mut SessionFlow, outcome: Result<AssessmentData, String>) {
    match outcome {
        Ok(data) => flow.set_data(data),
        Err(err) => {
            log::error!("feed load failed: {err}");
            flow.mark_unavailable(LOAD_ERROR);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn install(flow_handle: &UseStateHandle<SessionFlow>, outcome: Result<AssessmentData, String>) {
    let mut flow = (**flow_handle).clone();
    apply(&mut flow, outcome);
    flow_handle.set(flow);
}

/// One-shot startup effect: kick off the concurrent feed fetch and
/// install the result. A fetch that never resolves leaves the app in its
/// loading state indefinitely; start actions keep failing closed.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &crate::app::state::AppState) {
    let flow = app_state.flow.clone();
    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = load_feeds().await;
            install(&flow, outcome);
        });
        || {}
    });
}
