use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single assessment statement, rated on the five-point scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
}

/// A gift category: display metadata plus the question ids whose answers
/// feed its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCategory {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Container for both feeds once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssessmentData {
    pub questions: Vec<Question>,
    pub gifts: Vec<GiftCategory>,
}

/// Errors raised while parsing or validating the two feeds.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate question id '{0}'")]
    DuplicateQuestion(String),
    #[error("duplicate gift key '{0}'")]
    DuplicateGift(String),
    #[error("gift '{gift}' references unknown question '{item}'")]
    UnknownItem { gift: String, item: String },
}

impl AssessmentData {
    /// Create empty assessment data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            questions: Vec::new(),
            gifts: Vec::new(),
        }
    }

    /// Create assessment data from pre-parsed feeds. The result is not
    /// validated; call [`AssessmentData::validate`] before use.
    #[must_use]
    pub const fn from_parts(questions: Vec<Question>, gifts: Vec<GiftCategory>) -> Self {
        Self { questions, gifts }
    }

    /// Parse and validate both feeds from their JSON payloads.
    ///
    /// # Errors
    ///
    /// Returns an error if either payload is not valid JSON or if the
    /// combined feeds fail [`AssessmentData::validate`].
    pub fn from_json(questions_json: &str, gifts_json: &str) -> Result<Self, DataError> {
        let questions: Vec<Question> = serde_json::from_str(questions_json)?;
        let gifts: Vec<GiftCategory> = serde_json::from_str(gifts_json)?;
        let data = Self::from_parts(questions, gifts);
        data.validate()?;
        Ok(data)
    }

    /// Check feed integrity: question ids unique, gift keys unique, and
    /// every gift item resolvable to a question. Questions no gift
    /// references are allowed, as is the same question feeding more than
    /// one gift.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), DataError> {
        let mut ids = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !ids.insert(question.id.as_str()) {
                return Err(DataError::DuplicateQuestion(question.id.clone()));
            }
        }
        let mut keys = HashSet::with_capacity(self.gifts.len());
        for gift in &self.gifts {
            if !keys.insert(gift.key.as_str()) {
                return Err(DataError::DuplicateGift(gift.key.clone()));
            }
            for item in &gift.items {
                if !ids.contains(item.as_str()) {
                    return Err(DataError::UnknownItem {
                        gift: gift.key.clone(),
                        item: item.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of questions in the feed.
    #[must_use]
    pub const fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Whether the question feed is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Statement {id}"),
        }
    }

    fn gift(key: &str, items: &[&str]) -> GiftCategory {
        GiftCategory {
            key: key.to_string(),
            name: key.to_uppercase(),
            description: String::new(),
            items: items.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn from_json_parses_both_feeds() {
        let questions = r#"[
            {"id": "q1", "text": "I enjoy explaining things."},
            {"id": "q2", "text": "I notice practical needs."}
        ]"#;
        let gifts = r#"[
            {"key": "teaching", "name": "Teaching", "description": "Explains truth clearly.", "items": ["q1"]},
            {"key": "serving", "name": "Serving", "items": ["q2"]}
        ]"#;

        let data = AssessmentData::from_json(questions, gifts).unwrap();
        assert_eq!(data.question_count(), 2);
        assert_eq!(data.gifts.len(), 2);
        assert_eq!(data.gifts[1].description, "");
        assert_eq!(data.question("q2").unwrap().text, "I notice practical needs.");
    }

    #[test]
    fn duplicate_question_id_is_rejected() {
        let data = AssessmentData::from_parts(vec![question("q1"), question("q1")], vec![]);
        assert!(matches!(
            data.validate(),
            Err(DataError::DuplicateQuestion(id)) if id == "q1"
        ));
    }

    #[test]
    fn duplicate_gift_key_is_rejected() {
        let data = AssessmentData::from_parts(
            vec![question("q1")],
            vec![gift("mercy", &["q1"]), gift("mercy", &["q1"])],
        );
        assert!(matches!(
            data.validate(),
            Err(DataError::DuplicateGift(key)) if key == "mercy"
        ));
    }

    #[test]
    fn dangling_item_reference_is_rejected() {
        let data =
            AssessmentData::from_parts(vec![question("q1")], vec![gift("mercy", &["q1", "q9"])]);
        match data.validate() {
            Err(DataError::UnknownItem { gift, item }) => {
                assert_eq!(gift, "mercy");
                assert_eq!(item, "q9");
            }
            other => panic!("expected UnknownItem, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_items_and_uncovered_questions_are_allowed() {
        let data = AssessmentData::from_parts(
            vec![question("q1"), question("q2"), question("q3")],
            vec![gift("mercy", &["q1", "q2"]), gift("giving", &["q2"])],
        );
        assert!(data.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = AssessmentData::from_json("not json", "[]").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
