use charis_engine::GiftScore;
use yew::prelude::*;

/// How many of the ranked gifts start expanded.
const OPEN_COUNT: usize = 3;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    /// Ranked scores, highest first, as the scoring engine produced them.
    pub scores: Vec<GiftScore>,
}

/// The ranked results list: one native details/summary block per gift,
/// with the top three open.
#[function_component(GiftBreakdown)]
pub fn gift_breakdown(props: &Props) -> Html {
    html! {
        <div id="result-descriptions" class="gift-breakdown">
            {
                props.scores.iter().enumerate().map(|(rank, gift)| html! {
                    <details
                        key={gift.key.clone()}
                        class="gift-item"
                        data-gift-id={gift.key.clone()}
                        open={rank < OPEN_COUNT}
                    >
                        <summary class="gift-header">
                            <div class="gift-header-content">
                                <h4 class="gift-name">{ &gift.name }</h4>
                                <span class="gift-score">{ gift.total }</span>
                            </div>
                        </summary>
                        <div class="gift-description">
                            <p>{ &gift.description }</p>
                        </div>
                    </details>
                }).collect::<Html>()
            }
        </div>
    }
}
