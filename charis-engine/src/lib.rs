//! Charis Assessment Engine
//!
//! Platform-agnostic core logic for the Charis spiritual gifts assessment.
//! This crate provides shuffling, paging, completeness gating, and scoring
//! without UI or platform-specific dependencies.

pub mod answers;
pub mod data;
pub mod flow;
pub mod gate;
pub mod paging;
pub mod report;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use answers::{AnswerStore, Response, ResponseOutOfRange};
pub use data::{AssessmentData, DataError, GiftCategory, Question};
pub use flow::{DataState, FlowError, FlowState, SessionFlow};
pub use gate::{Gap, GapScan, first_unanswered, page_complete, scan_gaps};
pub use paging::{PAGE_SIZE, page_count, page_of, page_slice, shuffle};
pub use report::CompletionReport;
pub use score::{GiftScore, score_gifts};
pub use session::{AssessmentSession, SessionError};

/// Trait for abstracting how the question and gift feeds are fetched.
/// Platform-specific implementations should provide this.
pub trait DataFeed {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the raw questions feed as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be fetched.
    fn load_questions(&self) -> Result<String, Self::Error>;

    /// Load the raw gifts feed as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be fetched.
    fn load_gifts(&self) -> Result<String, Self::Error>;
}

/// Trait for abstracting where finished reports go.
/// Platform-specific implementations should provide this.
pub trait ResultSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Hand off a completed report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be delivered.
    fn deliver(&self, report: &CompletionReport) -> Result<(), Self::Error>;
}

/// Main engine wiring a data feed and a result sink around the flow.
pub struct AssessmentEngine<F, S>
where
    F: DataFeed,
    S: ResultSink,
{
    feed: F,
    sink: S,
}

impl<F, S> AssessmentEngine<F, S>
where
    F: DataFeed,
    S: ResultSink,
{
    /// Create a new engine with the provided feed and sink.
    pub const fn new(feed: F, sink: S) -> Self {
        Self { feed, sink }
    }

    /// Fetch both feeds and parse them into validated assessment data.
    ///
    /// # Errors
    ///
    /// Returns an error if either payload cannot be fetched, parsed, or
    /// validated.
    pub fn load(&self) -> Result<AssessmentData, anyhow::Error>
    where
        F::Error: Into<anyhow::Error>,
    {
        let questions = self.feed.load_questions().map_err(Into::into)?;
        let gifts = self.feed.load_gifts().map_err(Into::into)?;
        Ok(AssessmentData::from_json(&questions, &gifts)?)
    }

    /// Build a flow with the feeds already installed, ready to start.
    ///
    /// # Errors
    ///
    /// Returns an error if the feeds cannot be loaded.
    pub fn new_flow(&self) -> Result<SessionFlow, anyhow::Error>
    where
        F::Error: Into<anyhow::Error>,
    {
        let mut flow = SessionFlow::new();
        flow.set_data(self.load()?);
        Ok(flow)
    }

    /// Load the feeds and start a standalone session with the given seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the feeds cannot be loaded.
    pub fn start_session(&self, seed: u64) -> Result<AssessmentSession, anyhow::Error>
    where
        F::Error: Into<anyhow::Error>,
    {
        Ok(AssessmentSession::new(self.load()?, seed))
    }

    /// Hand a finished report to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink refuses the report.
    pub fn deliver(&self, report: &CompletionReport) -> Result<(), S::Error> {
        self.sink.deliver(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    const QUESTIONS_JSON: &str = r#"[
        {"id": "q1", "text": "I enjoy explaining things clearly."},
        {"id": "q2", "text": "I notice needs before others do."},
        {"id": "q3", "text": "I gravitate toward organizing people."}
    ]"#;

    const GIFTS_JSON: &str = r#"[
        {"key": "teaching", "name": "Teaching", "items": ["q1"]},
        {"key": "serving", "name": "Serving", "items": ["q2", "q3"]}
    ]"#;

    #[derive(Clone, Copy, Default)]
    struct FixtureFeed;

    impl DataFeed for FixtureFeed {
        type Error = Infallible;

        fn load_questions(&self) -> Result<String, Self::Error> {
            Ok(QUESTIONS_JSON.to_string())
        }

        fn load_gifts(&self) -> Result<String, Self::Error> {
            Ok(GIFTS_JSON.to_string())
        }
    }

    #[derive(Clone, Copy, Default)]
    struct MissingFeed;

    impl DataFeed for MissingFeed {
        type Error = std::io::Error;

        fn load_questions(&self) -> Result<String, Self::Error> {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "questions.json not found",
            ))
        }

        fn load_gifts(&self) -> Result<String, Self::Error> {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "gifts.json not found",
            ))
        }
    }

    #[derive(Clone, Default)]
    struct MemorySink {
        delivered: Rc<RefCell<Vec<CompletionReport>>>,
    }

    impl ResultSink for MemorySink {
        type Error = Infallible;

        fn deliver(&self, report: &CompletionReport) -> Result<(), Self::Error> {
            self.delivered.borrow_mut().push(report.clone());
            Ok(())
        }
    }

    #[test]
    fn engine_loads_validated_data() {
        let engine = AssessmentEngine::new(FixtureFeed, MemorySink::default());
        let data = engine.load().unwrap();
        assert_eq!(data.question_count(), 3);
        assert_eq!(data.gifts.len(), 2);
    }

    #[test]
    fn engine_surfaces_feed_failures() {
        let engine = AssessmentEngine::new(MissingFeed, MemorySink::default());
        let err = engine.load().unwrap_err();
        assert!(err.to_string().contains("questions.json"));
    }

    #[test]
    fn engine_runs_a_full_assessment_and_delivers() {
        let sink = MemorySink::default();
        let engine = AssessmentEngine::new(FixtureFeed, sink.clone());

        let mut flow = engine.new_flow().unwrap();
        flow.start(42).unwrap();
        flow.answer("q1", Response::AlmostAlways).unwrap();
        flow.answer("q2", Response::Sometimes).unwrap();
        flow.answer("q3", Response::Often).unwrap();
        flow.submit("2026-08-23T10:00:00.000Z").unwrap();

        let report = flow.report().unwrap();
        engine.deliver(report).unwrap();

        let delivered = sink.delivered.borrow();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].gift_scores[0].key, "serving");
        assert_eq!(delivered[0].gift_scores[0].total, 7);
        assert_eq!(delivered[0].gift_scores[1].total, 5);
    }

    #[test]
    fn standalone_sessions_reproduce_per_seed() {
        let engine = AssessmentEngine::new(FixtureFeed, MemorySink::default());
        let a = engine.start_session(0xABCD).unwrap();
        let b = engine.start_session(0xABCD).unwrap();
        assert_eq!(a.order(), b.order());
    }
}
