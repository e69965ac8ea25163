use crate::components::ui::progress_meter::ProgressMeter;
use crate::components::ui::question_card::QuestionCard;
use charis_engine::{Question, Response};
use yew::prelude::*;

/// One question as the quiz page shows it: the statement, its 1-based
/// display number, and the recorded answer if any.
#[derive(Clone, PartialEq)]
pub struct QuizItem {
    pub question: Question,
    pub sequence: usize,
    pub value: Option<Response>,
}

#[derive(Properties, Clone, PartialEq)]
pub struct QuizPageProps {
    pub items: Vec<QuizItem>,
    pub page_index: usize,
    pub page_count: usize,
    pub answered_count: usize,
    pub total_questions: usize,
    pub show_next: bool,
    pub show_submit: bool,
    #[prop_or_default]
    pub notice: Option<AttrValue>,
    pub on_answer: Callback<(AttrValue, Response)>,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    pub on_submit: Callback<()>,
}

#[function_component(QuizPage)]
pub fn quiz_page(props: &QuizPageProps) -> Html {
    let on_prev = {
        let cb = props.on_prev.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_next = {
        let cb = props.on_next.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_submit = {
        let cb = props.on_submit.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <section id="quiz-page" class="page quiz-page">
            <div class="quiz-progress">
                <ProgressMeter value={props.answered_count} max={props.total_questions} />
                <p id="page-indicator" class="muted">
                    { format!("Page {} of {}", props.page_index + 1, props.page_count) }
                </p>
            </div>
            <div id="question-container" class="question-list">
                {
                    props.items.iter().map(|item| html! {
                        <QuestionCard
                            key={item.question.id.clone()}
                            question={item.question.clone()}
                            sequence={item.sequence}
                            value={item.value}
                            on_change={props.on_answer.clone()}
                        />
                    }).collect::<Html>()
                }
            </div>
            <p id="quiz-error" class="error-line" role="alert" aria-live="polite">
                { props.notice.clone().unwrap_or_default() }
            </p>
            <div class="quiz-nav">
                <button
                    id="prev-btn"
                    class="secondary-btn"
                    disabled={props.page_index == 0}
                    onclick={on_prev}
                >
                    { "Back" }
                </button>
                if props.show_next {
                    <button id="next-btn" class="primary-btn" onclick={on_next}>
                        { "Next" }
                    </button>
                }
                if props.show_submit {
                    <button id="submit-btn" class="primary-btn" onclick={on_submit}>
                        { "See my results" }
                    </button>
                }
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn items(n: usize) -> Vec<QuizItem> {
        (1..=n)
            .map(|i| QuizItem {
                question: Question {
                    id: format!("q{i}"),
                    text: format!("Statement {i}"),
                },
                sequence: i,
                value: None,
            })
            .collect()
    }

    fn base_props() -> QuizPageProps {
        QuizPageProps {
            items: items(3),
            page_index: 0,
            page_count: 3,
            answered_count: 0,
            total_questions: 28,
            show_next: true,
            show_submit: false,
            notice: None,
            on_answer: Callback::noop(),
            on_prev: Callback::noop(),
            on_next: Callback::noop(),
            on_submit: Callback::noop(),
        }
    }

    #[test]
    fn quiz_page_shows_indicator_questions_and_next() {
        let html = block_on(LocalServerRenderer::<QuizPage>::with_props(base_props()).render());
        assert!(html.contains("Page 1 of 3"), "{html}");
        assert!(html.contains("Statement 2"), "{html}");
        assert!(html.contains("next-btn"), "{html}");
        assert!(!html.contains("submit-btn"), "{html}");
        assert!(html.contains("disabled"), "first-page back control: {html}");
    }

    #[test]
    fn quiz_page_swaps_next_for_submit_on_the_last_page() {
        let props = QuizPageProps {
            page_index: 2,
            show_next: false,
            show_submit: true,
            ..base_props()
        };
        let html = block_on(LocalServerRenderer::<QuizPage>::with_props(props).render());
        assert!(html.contains("submit-btn"), "{html}");
        assert!(!html.contains("next-btn"), "{html}");
        assert!(!html.contains("disabled"), "{html}");
    }

    #[test]
    fn quiz_page_can_offer_submit_alongside_next() {
        // everything answered while not on the last page
        let props = QuizPageProps {
            answered_count: 28,
            show_submit: true,
            ..base_props()
        };
        let html = block_on(LocalServerRenderer::<QuizPage>::with_props(props).render());
        assert!(html.contains("next-btn"), "{html}");
        assert!(html.contains("submit-btn"), "{html}");
    }

    #[test]
    fn quiz_page_renders_the_notice_line() {
        let props = QuizPageProps {
            notice: Some(AttrValue::from("Please answer every question on this page.")),
            ..base_props()
        };
        let html = block_on(LocalServerRenderer::<QuizPage>::with_props(props).render());
        assert!(html.contains("Please answer every question"), "{html}");
    }
}
