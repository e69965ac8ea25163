use crate::answers::AnswerStore;
use crate::data::GiftCategory;
use serde::{Deserialize, Serialize};

/// One gift category's computed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftScore {
    pub key: String,
    pub name: String,
    pub total: u32,
    pub description: String,
}

/// Compute every gift's total and rank them highest first.
///
/// A gift's total is the sum of the stored values over its items; items
/// without an answer contribute zero. The sort is stable, so gifts with
/// equal totals keep the order of the `gifts` feed - callers may rely on
/// that tie behavior. Pure: inputs are never mutated and identical inputs
/// always produce identical output.
#[must_use]
pub fn score_gifts(answers: &AnswerStore, gifts: &[GiftCategory]) -> Vec<GiftScore> {
    let mut scores: Vec<GiftScore> = gifts
        .iter()
        .map(|gift| GiftScore {
            key: gift.key.clone(),
            name: gift.name.clone(),
            total: gift
                .items
                .iter()
                .filter_map(|id| answers.get(id))
                .map(|response| u32::from(response.value()))
                .sum(),
            description: gift.description.clone(),
        })
        .collect();
    scores.sort_by(|a, b| b.total.cmp(&a.total));
    scores
}
