use yew::prelude::*;

/// Fixed corner banner shown when the page is loaded with `?debug`.
/// Debug mode also auto-fills answers at start time.
#[function_component(DebugBanner)]
pub fn debug_banner() -> Html {
    html! {
        <div class="debug-banner" role="status">
            { "DEBUG MODE" }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn debug_banner_renders_its_label() {
        let html = block_on(LocalServerRenderer::<DebugBanner>::new().render());
        assert!(html.contains("DEBUG MODE"), "{html}");
    }
}
