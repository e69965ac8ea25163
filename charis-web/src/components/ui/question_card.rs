use charis_engine::{Question, Response};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub question: Question,
    /// 1-based display number across the whole working order.
    pub sequence: usize,
    #[prop_or_default]
    pub value: Option<Response>,
    pub on_change: Callback<(AttrValue, Response)>,
}

/// One Likert item: sequence badge, the statement, and five labelled
/// radio options. The radio ids follow `q-<id>-<value>` so the first
/// option of a flagged question can be focused from outside.
#[function_component(QuestionCard)]
pub fn question_card(props: &Props) -> Html {
    let group = format!("q-{}", props.question.id);

    let options = Response::ALL
        .iter()
        .map(|&response| {
            let input_id = format!("q-{}-{}", props.question.id, response.value());
            let on_change = {
                let cb = props.on_change.clone();
                let id = AttrValue::from(props.question.id.clone());
                Callback::from(move |_: Event| cb.emit((id.clone(), response)))
            };
            html! {
                <label class="q-option" key={input_id.clone()}>
                    <input
                        type="radio"
                        id={input_id}
                        name={group.clone()}
                        checked={props.value == Some(response)}
                        onchange={on_change}
                    />
                    <span class="caption">{ response.caption() }</span>
                </label>
            }
        })
        .collect::<Html>();

    html! {
        <div class="question-card" id={format!("question-{}", props.question.id)}>
            <div class="q-header-row">
                <div class="q-sequence">{ format!("Q{}", props.sequence) }</div>
            </div>
            <div class="q-text">{ &props.question.text }</div>
            <div class="q-scale-hint">
                { "Choose the option that best describes how true this is for you." }
            </div>
            <div class="q-options" role="radiogroup" aria-label={props.question.text.clone()}>
                { options }
            </div>
        </div>
    }
}
