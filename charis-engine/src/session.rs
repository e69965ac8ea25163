use crate::answers::{AnswerStore, Response};
use crate::data::{AssessmentData, Question};
use crate::gate;
use crate::paging::{self, PAGE_SIZE};
use crate::score::{self, GiftScore};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Errors raised by in-progress session operations. All of them leave the
/// session usable; `IncompleteSubmission` additionally moves the page
/// index to the first gap's page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("question '{0}' is not part of this assessment")]
    UnknownQuestion(String),
    #[error("the current page still has unanswered questions")]
    PageIncomplete { first_unanswered: String },
    #[error("{remaining} unanswered question(s) remain")]
    IncompleteSubmission {
        remaining: usize,
        redirected_to: usize,
    },
    #[error("already on the last page")]
    LastPage,
}

/// One respondent's run through the assessment: the shuffled working
/// order, the answers so far, and the visible page.
///
/// The working order is fixed at construction and never reshuffled; a new
/// run means a new session. The rng is seeded from `seed`, so a given
/// seed always reproduces the same order (and the same debug autofill).
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    data: AssessmentData,
    seed: u64,
    rng: ChaCha20Rng,
    order: Vec<Question>,
    answers: AnswerStore,
    page_index: usize,
}

impl AssessmentSession {
    /// Start a fresh session over the loaded data.
    #[must_use]
    pub fn new(data: AssessmentData, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let order = paging::shuffle(&data.questions, &mut rng);
        Self {
            data,
            seed,
            rng,
            order,
            answers: AnswerStore::new(),
            page_index: 0,
        }
    }

    /// Seed this session was built from, for reproduction.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The loaded feeds backing this session.
    #[must_use]
    pub const fn data(&self) -> &AssessmentData {
        &self.data
    }

    /// The session's full working order.
    #[must_use]
    pub fn order(&self) -> &[Question] {
        &self.order
    }

    /// Answers recorded so far.
    #[must_use]
    pub const fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Zero-based index of the visible page.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Total number of pages for this session.
    #[must_use]
    pub fn page_count(&self) -> usize {
        paging::page_count(self.order.len())
    }

    /// Questions on the visible page, in working order.
    #[must_use]
    pub fn current_page(&self) -> &[Question] {
        paging::page_slice(&self.order, self.page_index)
    }

    /// Zero-based position of the visible page's first question, the
    /// offset display numbering starts from.
    #[must_use]
    pub const fn sequence_base(&self) -> usize {
        self.page_index * PAGE_SIZE
    }

    /// Number of questions in the working order.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.order.len()
    }

    /// Number of working-order questions answered so far.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.answered_in(&self.order)
    }

    /// Whether every question in the working order has an answer.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        gate::scan_gaps(&self.order, &self.answers).is_complete()
    }

    /// Whether the visible page is the last one.
    #[must_use]
    pub fn on_last_page(&self) -> bool {
        self.page_index + 1 >= self.page_count()
    }

    /// Whether the submit control should be offered: on the last page, or
    /// once everything is answered. This is an affordance rule only;
    /// [`AssessmentSession::submit`] runs its own gates regardless.
    #[must_use]
    pub fn submit_visible(&self) -> bool {
        self.on_last_page() || self.all_answered()
    }

    /// Record an answer. Repeated answers overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownQuestion`] for ids outside the
    /// working order; nothing is stored in that case.
    pub fn set_answer(&mut self, id: &str, response: Response) -> Result<(), SessionError> {
        if self.data.question(id).is_none() {
            return Err(SessionError::UnknownQuestion(id.to_string()));
        }
        self.answers.set(id, response);
        Ok(())
    }

    /// Move back one page. Ungated; returns false (and stays put) on the
    /// first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page_index == 0 {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Advance to the next page, gated on the visible page being complete.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PageIncomplete`] naming the first gap when
    /// the gate refuses, or [`SessionError::LastPage`] when there is no
    /// next page. The page index is unchanged on error.
    pub fn next_page(&mut self) -> Result<(), SessionError> {
        if let Some(question) = gate::first_unanswered(self.current_page(), &self.answers) {
            return Err(SessionError::PageIncomplete {
                first_unanswered: question.id.clone(),
            });
        }
        if self.on_last_page() {
            return Err(SessionError::LastPage);
        }
        self.page_index += 1;
        Ok(())
    }

    /// Finish the run: apply the per-page gate, then the independent
    /// full-order scan, then compute the ranked scores.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PageIncomplete`] when the visible page has
    /// gaps. Returns [`SessionError::IncompleteSubmission`] when any other
    /// page does; the page index is then moved to the first gap's page so
    /// the respondent lands where the work is.
    pub fn submit(&mut self) -> Result<Vec<GiftScore>, SessionError> {
        if let Some(question) = gate::first_unanswered(self.current_page(), &self.answers) {
            return Err(SessionError::PageIncomplete {
                first_unanswered: question.id.clone(),
            });
        }
        let scan = gate::scan_gaps(&self.order, &self.answers);
        if let Some(gap) = scan.first {
            self.page_index = gap.page_index;
            return Err(SessionError::IncompleteSubmission {
                remaining: scan.remaining,
                redirected_to: gap.page_index,
            });
        }
        Ok(score::score_gifts(&self.answers, &self.data.gifts))
    }

    /// Fill every unanswered question with a random scale point from the
    /// session rng. Debug affordance; existing answers are kept.
    pub fn autofill(&mut self) {
        let unanswered: Vec<String> = self
            .order
            .iter()
            .filter(|q| !self.answers.is_answered(&q.id))
            .map(|q| q.id.clone())
            .collect();
        for id in unanswered {
            let response = Response::ALL[self.rng.gen_range(0..Response::ALL.len())];
            self.answers.set(id, response);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(n: usize) -> AssessmentData {
        let questions = (1..=n)
            .map(|i| Question {
                id: format!("q{i}"),
                text: format!("Statement {i}"),
            })
            .collect();
        let gifts = vec![crate::data::GiftCategory {
            key: "mercy".to_string(),
            name: "Mercy".to_string(),
            description: String::new(),
            items: (1..=n).map(|i| format!("q{i}")).collect(),
        }];
        AssessmentData::from_parts(questions, gifts)
    }

    fn answer_page(session: &mut AssessmentSession, response: Response) {
        let ids: Vec<String> = session.current_page().iter().map(|q| q.id.clone()).collect();
        for id in ids {
            session.set_answer(&id, response).unwrap();
        }
    }

    #[test]
    fn construction_shuffles_deterministically() {
        let a = AssessmentSession::new(data(28), 1337);
        let b = AssessmentSession::new(data(28), 1337);
        assert_eq!(a.order(), b.order());
        assert_eq!(a.page_count(), 3);
        assert_eq!(a.page_index(), 0);
        assert_eq!(a.seed(), 1337);
        assert!(a.answers().is_empty());
    }

    #[test]
    fn unknown_question_ids_are_rejected() {
        let mut session = AssessmentSession::new(data(5), 1);
        let err = session.set_answer("q99", Response::Often).unwrap_err();
        assert_eq!(err, SessionError::UnknownQuestion("q99".to_string()));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn next_page_refuses_while_the_page_has_gaps() {
        let mut session = AssessmentSession::new(data(28), 7);
        let skipped = session.current_page()[3].id.clone();
        let ids: Vec<String> = session.current_page().iter().map(|q| q.id.clone()).collect();
        for id in ids.iter().filter(|id| **id != skipped) {
            session.set_answer(id, Response::Often).unwrap();
        }

        let err = session.next_page().unwrap_err();
        assert_eq!(
            err,
            SessionError::PageIncomplete {
                first_unanswered: skipped.clone()
            }
        );
        assert_eq!(session.page_index(), 0);

        session.set_answer(&skipped, Response::Often).unwrap();
        session.next_page().unwrap();
        assert_eq!(session.page_index(), 1);
    }

    #[test]
    fn next_page_stops_at_the_last_page() {
        let mut session = AssessmentSession::new(data(15), 7);
        answer_page(&mut session, Response::Sometimes);
        session.next_page().unwrap();
        answer_page(&mut session, Response::Sometimes);
        assert_eq!(session.next_page().unwrap_err(), SessionError::LastPage);
        assert_eq!(session.page_index(), 1);
    }

    #[test]
    fn prev_page_is_ungated_and_stops_at_zero() {
        let mut session = AssessmentSession::new(data(15), 7);
        assert!(!session.prev_page());
        answer_page(&mut session, Response::Sometimes);
        session.next_page().unwrap();
        assert!(session.prev_page());
        assert_eq!(session.page_index(), 0);
    }

    #[test]
    fn submit_affordance_is_last_page_or_all_answered() {
        let mut session = AssessmentSession::new(data(28), 21);
        assert!(!session.submit_visible());

        // all answered while still on the first page
        let ids: Vec<String> = session.order().iter().map(|q| q.id.clone()).collect();
        for id in &ids {
            session.set_answer(id, Response::Often).unwrap();
        }
        assert_eq!(session.page_index(), 0);
        assert!(session.all_answered());
        assert!(session.submit_visible());

        // last page with gaps would also show it
        let mut other = AssessmentSession::new(data(8), 21);
        assert!(other.on_last_page());
        assert!(other.submit_visible());
        assert!(!other.all_answered());
    }

    #[test]
    fn submit_applies_the_page_gate_first() {
        let mut session = AssessmentSession::new(data(8), 3);
        let first = session.current_page()[0].id.clone();
        let err = session.submit().unwrap_err();
        assert_eq!(
            err,
            SessionError::PageIncomplete {
                first_unanswered: first
            }
        );
    }

    #[test]
    fn submit_with_a_later_gap_redirects_to_its_page() {
        let mut session = AssessmentSession::new(data(28), 11);
        answer_page(&mut session, Response::Often);
        session.next_page().unwrap();
        answer_page(&mut session, Response::Often);
        // stay on page 1; page 2 is untouched
        let err = session.submit().unwrap_err();
        assert_eq!(
            err,
            SessionError::IncompleteSubmission {
                remaining: 8,
                redirected_to: 2
            }
        );
        assert_eq!(session.page_index(), 2);
    }

    #[test]
    fn complete_submit_returns_ranked_scores() {
        let mut session = AssessmentSession::new(data(8), 5);
        answer_page(&mut session, Response::AlmostAlways);
        let scores = session.submit().unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].total, 40);
    }

    #[test]
    fn autofill_completes_the_run_and_keeps_existing_answers() {
        let mut session = AssessmentSession::new(data(28), 13);
        let pinned = session.order()[0].id.clone();
        session.set_answer(&pinned, Response::AlmostNever).unwrap();

        session.autofill();
        assert!(session.all_answered());
        assert_eq!(session.answers().get(&pinned), Some(Response::AlmostNever));
        for question in session.order() {
            let value = session.answers().get(&question.id).unwrap().value();
            assert!((1..=5).contains(&value));
        }
    }

    #[test]
    fn autofill_is_deterministic_per_seed() {
        let mut a = AssessmentSession::new(data(28), 77);
        let mut b = AssessmentSession::new(data(28), 77);
        a.autofill();
        b.autofill();
        assert_eq!(a.answers(), b.answers());
    }

    #[test]
    fn empty_feed_still_has_one_page() {
        let session = AssessmentSession::new(AssessmentData::empty(), 1);
        assert_eq!(session.page_count(), 1);
        assert!(session.current_page().is_empty());
        assert!(session.on_last_page());
    }
}
