use crate::data::Question;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// One point on the five-step agreement scale.
///
/// Serialization uses the integer value (1-5), which is also the wire
/// format of the completion payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Response {
    AlmostNever,
    Occasionally,
    Sometimes,
    Often,
    AlmostAlways,
}

/// Raised when a raw value falls outside the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("response value {0} is outside the 1-5 scale")]
pub struct ResponseOutOfRange(pub u8);

impl Response {
    /// All scale points in ascending order.
    pub const ALL: [Self; 5] = [
        Self::AlmostNever,
        Self::Occasionally,
        Self::Sometimes,
        Self::Often,
        Self::AlmostAlways,
    ];

    /// Numeric value of the scale point (1-5).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::AlmostNever => 1,
            Self::Occasionally => 2,
            Self::Sometimes => 3,
            Self::Often => 4,
            Self::AlmostAlways => 5,
        }
    }

    /// Scale point for a numeric value, if it is on the scale.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::AlmostNever),
            2 => Some(Self::Occasionally),
            3 => Some(Self::Sometimes),
            4 => Some(Self::Often),
            5 => Some(Self::AlmostAlways),
            _ => None,
        }
    }

    /// Respondent-facing caption for the scale point.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::AlmostNever => "Almost never true of me",
            Self::Occasionally => "Occasionally true of me",
            Self::Sometimes => "Sometimes true of me",
            Self::Often => "Often true of me",
            Self::AlmostAlways => "Almost always true of me",
        }
    }
}

impl TryFrom<u8> for Response {
    type Error = ResponseOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value).ok_or(ResponseOutOfRange(value))
    }
}

impl From<Response> for u8 {
    fn from(response: Response) -> Self {
        response.value()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

/// Mutable store of answers keyed by question id. A missing entry means
/// the question is unanswered; values are on the 1-5 scale by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnswerStore {
    answers: HashMap<String, Response>,
}

impl AnswerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, overwriting any previous value for the id.
    pub fn set(&mut self, id: impl Into<String>, response: Response) {
        self.answers.insert(id.into(), response);
    }

    /// Stored answer for a question id, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Response> {
        self.answers.get(id).copied()
    }

    /// Whether the question has an answer.
    #[must_use]
    pub fn is_answered(&self, id: &str) -> bool {
        self.answers.contains_key(id)
    }

    /// Count of answered questions within the given universe.
    #[must_use]
    pub fn answered_in(&self, questions: &[Question]) -> usize {
        questions
            .iter()
            .filter(|q| self.is_answered(&q.id))
            .count()
    }

    /// Total number of stored answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether no answers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Discard every stored answer.
    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Ordered copy of the stored answers as raw values, the shape the
    /// completion payload carries.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, u8> {
        self.answers
            .iter()
            .map(|(id, response)| (id.clone(), response.value()))
            .collect()
    }
}
