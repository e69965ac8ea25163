pub mod bootstrap;
pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);
    view::render_app(&app_state)
}
