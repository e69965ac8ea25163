//! Completeness gates: the per-page check that guards navigation and the
//! independent full-order scan that guards submission.

use crate::answers::AnswerStore;
use crate::data::Question;
use crate::paging;

/// Whether every question on the page has an answer. This is the sole
/// precondition for advancing past, or submitting from, the visible page.
#[must_use]
pub fn page_complete(page: &[Question], answers: &AnswerStore) -> bool {
    page.iter().all(|q| answers.is_answered(&q.id))
}

/// First unanswered question on the page, in display order. This is the
/// control to flag when the per-page gate refuses.
#[must_use]
pub fn first_unanswered<'a>(page: &'a [Question], answers: &AnswerStore) -> Option<&'a Question> {
    page.iter().find(|q| !answers.is_answered(&q.id))
}

/// Location of the first gap found by a full-order scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    pub position: usize,
    pub page_index: usize,
    pub question_id: String,
}

/// Result of scanning the whole working order for unanswered questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapScan {
    pub remaining: usize,
    pub first: Option<Gap>,
}

impl GapScan {
    /// Whether the scan found no gaps.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Scan the entire working order. Runs independently of the per-page gate
/// so a submit path that skipped page validation is still caught.
#[must_use]
pub fn scan_gaps(order: &[Question], answers: &AnswerStore) -> GapScan {
    let mut remaining = 0;
    let mut first = None;
    for (position, question) in order.iter().enumerate() {
        if answers.is_answered(&question.id) {
            continue;
        }
        remaining += 1;
        if first.is_none() {
            first = Some(Gap {
                position,
                page_index: paging::page_of(position),
                question_id: question.id.clone(),
            });
        }
    }
    GapScan { remaining, first }
}
