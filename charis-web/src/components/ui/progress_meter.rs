use yew::prelude::*;

#[derive(Properties, Clone, Copy, PartialEq, Eq)]
pub struct Props {
    pub value: usize,
    pub max: usize,
}

/// Completion meter: a progressbar role with the "X / N answered" line
/// the original widget paired with it.
#[function_component(ProgressMeter)]
pub fn progress_meter(p: &Props) -> Html {
    let max = p.max.max(1);
    let percentage = (p.value as f64 / max as f64 * 100.0).min(100.0);

    html! {
        <div
            id="progress-bar"
            class="progress-meter"
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax={max.to_string()}
            aria-valuenow={p.value.to_string()}
        >
            <div class="progress-outer" aria-hidden="true">
                <div class="progress-inner" style={format!("width:{percentage}%;")}></div>
            </div>
            <p id="progress-text" class="progress-text">
                { format!("{} / {} answered", p.value, p.max) }
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn progress_meter_announces_value_and_text() {
        let props = Props { value: 7, max: 28 };
        let html = block_on(LocalServerRenderer::<ProgressMeter>::with_props(props).render());
        assert!(html.contains("aria-valuenow=\"7\""), "{html}");
        assert!(html.contains("aria-valuemax=\"28\""), "{html}");
        assert!(html.contains("7 / 28 answered"), "{html}");
        assert!(html.contains("width:25%;"), "{html}");
    }

    #[test]
    fn progress_meter_survives_an_empty_assessment() {
        let props = Props { value: 0, max: 0 };
        let html = block_on(LocalServerRenderer::<ProgressMeter>::with_props(props).render());
        assert!(html.contains("0 / 0 answered"), "{html}");
        assert!(html.contains("width:0%;"), "{html}");
    }
}
