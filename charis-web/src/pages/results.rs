use crate::components::ui::gift_breakdown::GiftBreakdown;
use charis_engine::CompletionReport;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ResultsPageProps {
    pub report: CompletionReport,
    pub on_restart: Callback<()>,
}

#[function_component(ResultsPage)]
pub fn results_page(props: &ResultsPageProps) -> Html {
    let on_restart = {
        let cb = props.on_restart.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let top_three = props.report.top_gifts(3);

    html! {
        <section id="results-page" class="page results-page">
            <h2>{ "Your results" }</h2>
            <div id="score-summary" class="score-summary">
                if top_three.is_empty() {
                    <p>{ "No responses recorded." }</p>
                } else {
                    <p>{ "Your strongest gift areas appear to be:" }</p>
                    <ul>
                        {
                            top_three.iter().map(|gift| html! {
                                <li key={gift.key.clone()}>
                                    <strong>{ &gift.name }</strong>
                                    { format!(" \u{2013} score {}", gift.total) }
                                </li>
                            }).collect::<Html>()
                        }
                    </ul>
                }
            </div>
            <GiftBreakdown scores={props.report.gift_scores.clone()} />
            <button id="restart-btn" class="secondary-btn" onclick={on_restart}>
                { "Start over" }
            </button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charis_engine::{AnswerStore, GiftScore, Response};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn score(key: &str, total: u32) -> GiftScore {
        GiftScore {
            key: key.to_string(),
            name: key.to_uppercase(),
            total,
            description: format!("About {key}"),
        }
    }

    fn report(scores: Vec<GiftScore>) -> CompletionReport {
        let mut answers = AnswerStore::new();
        answers.set("q1", Response::Often);
        CompletionReport::new("2026-08-23T10:00:00.000Z", &answers, scores)
    }

    #[test]
    fn results_page_lists_the_top_three() {
        let props = ResultsPageProps {
            report: report(vec![
                score("mercy", 18),
                score("teaching", 15),
                score("giving", 12),
                score("serving", 9),
            ]),
            on_restart: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ResultsPage>::with_props(props).render());
        assert!(html.contains("strongest gift areas"), "{html}");
        assert!(html.contains("MERCY"), "{html}");
        assert!(html.contains("score 18"), "{html}");
        assert!(!html.contains("score 9"), "summary stops at three: {html}");
        assert!(html.contains("restart-btn"), "{html}");
    }

    #[test]
    fn results_page_handles_an_empty_score_list() {
        let props = ResultsPageProps {
            report: report(Vec::new()),
            on_restart: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ResultsPage>::with_props(props).render());
        assert!(html.contains("No responses recorded."), "{html}");
    }
}
