use charis_engine::SessionFlow;
use yew::prelude::*;

/// The single authoritative app state: the engine's flow plus the two
/// bits of view-only chrome (the quiz notice line and debug mode). All
/// render dispatch derives from `flow`.
#[derive(Clone)]
pub struct AppState {
    pub flow: UseStateHandle<SessionFlow>,
    pub notice: UseStateHandle<Option<AttrValue>>,
    pub debug: UseStateHandle<bool>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        flow: use_state(SessionFlow::new),
        notice: use_state(|| None),
        debug: use_state(crate::dom::debug_requested),
    }
}

impl AppState {
    #[must_use]
    pub fn data_ready(&self) -> bool {
        self.flow.data_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[function_component(StateHarness)]
    fn state_harness() -> Html {
        let state = use_app_state();
        // the debug initializer must not reach for browser globals here
        assert!(!*state.debug);
        assert!(!state.data_ready());
        assert!(state.notice.is_none());
        Html::default()
    }

    #[test]
    fn fresh_state_renders_clean_off_the_browser() {
        let _ = block_on(LocalServerRenderer::<StateHarness>::new().render());
    }
}
