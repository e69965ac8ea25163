use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct StartPageProps {
    pub data_ready: bool,
    #[prop_or_default]
    pub load_error: Option<AttrValue>,
    #[prop_or_default]
    pub notice: Option<AttrValue>,
    pub on_start: Callback<()>,
}

#[function_component(StartPage)]
pub fn start_page(props: &StartPageProps) -> Html {
    let on_click = {
        let on_start = props.on_start.clone();
        Callback::from(move |_: MouseEvent| on_start.emit(()))
    };

    html! {
        <section id="start-page" class="page start-page">
            <h2>{ "Discover your strongest gift areas" }</h2>
            <p>
                { "You will rate a series of statements on how true each one is of you. \
                   There are no right or wrong answers; respond with your first honest \
                   reaction rather than how you wish you were." }
            </p>
            <p class="muted">
                { "The statements come in pages of ten. You can move back at any time, \
                   and nothing is submitted until every statement has an answer." }
            </p>
            <button id="start-btn" class="primary-btn" onclick={on_click}>
                { "Start the assessment" }
            </button>
            if !props.data_ready && props.load_error.is_none() {
                <p class="muted loading-hint">{ "Loading assessment data…" }</p>
            }
            if let Some(error) = &props.load_error {
                <p class="error-line" role="alert">{ error.clone() }</p>
            }
            if let Some(notice) = &props.notice {
                <p class="notice-line" role="alert">{ notice.clone() }</p>
            }
        </section>
    }
}
