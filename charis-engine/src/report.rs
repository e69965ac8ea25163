use crate::answers::AnswerStore;
use crate::score::GiftScore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The completion payload: timestamp, a copy of every answer, and the
/// ranked gift scores.
///
/// `completed_at` is an ISO-8601 timestamp supplied by the caller; the
/// engine itself never reads a clock, so the same code path serves the
/// browser (`js_sys::Date`) and native harnesses (`chrono`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub completed_at: String,
    pub answers: BTreeMap<String, u8>,
    pub gift_scores: Vec<GiftScore>,
}

impl CompletionReport {
    /// Assemble the payload from a finished session's answers and scores.
    #[must_use]
    pub fn new(
        completed_at: impl Into<String>,
        answers: &AnswerStore,
        gift_scores: Vec<GiftScore>,
    ) -> Self {
        Self {
            completed_at: completed_at.into(),
            answers: answers.snapshot(),
            gift_scores,
        }
    }

    /// The `count` highest-ranked gifts (fewer if the feed is smaller).
    #[must_use]
    pub fn top_gifts(&self, count: usize) -> &[GiftScore] {
        &self.gift_scores[..usize::min(count, self.gift_scores.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Response;

    fn sample_report() -> CompletionReport {
        let mut answers = AnswerStore::new();
        answers.set("q2", Response::Often);
        answers.set("q1", Response::AlmostAlways);
        let scores = vec![
            GiftScore {
                key: "mercy".to_string(),
                name: "Mercy".to_string(),
                total: 9,
                description: "Feels and meets needs".to_string(),
            },
            GiftScore {
                key: "giving".to_string(),
                name: "Giving".to_string(),
                total: 4,
                description: String::new(),
            },
        ];
        CompletionReport::new("2024-03-01T10:15:00.000Z", &answers, scores)
    }

    #[test]
    fn payload_copies_answers_in_key_order() {
        let report = sample_report();
        assert_eq!(report.completed_at, "2024-03-01T10:15:00.000Z");
        let keys: Vec<&String> = report.answers.keys().collect();
        assert_eq!(keys, ["q1", "q2"]);
        assert_eq!(report.answers["q1"], 5);
    }

    #[test]
    fn payload_uses_camel_case_keys_on_the_wire() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        assert!(json.contains("\"completedAt\""));
        assert!(json.contains("\"giftScores\""));
        let back: CompletionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_report());
    }

    #[test]
    fn top_gifts_clamps_to_available_scores() {
        let report = sample_report();
        assert_eq!(report.top_gifts(1).len(), 1);
        assert_eq!(report.top_gifts(1)[0].key, "mercy");
        assert_eq!(report.top_gifts(10).len(), 2);
    }
}
