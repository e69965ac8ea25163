//! Data feed and result sink implementations for headless runs.

use charis_engine::{CompletionReport, DataFeed, ResultSink};
use std::cell::Cell;
use std::convert::Infallible;
use std::path::PathBuf;

const EMBEDDED_QUESTIONS: &str = include_str!("../../charis-web/static/assets/data/questions.json");
const EMBEDDED_GIFTS: &str = include_str!("../../charis-web/static/assets/data/gifts.json");

/// Feed compiled in from the web crate's static data, so the tester runs
/// from any working directory without flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedFeed;

impl DataFeed for EmbeddedFeed {
    type Error = Infallible;

    fn load_questions(&self) -> Result<String, Self::Error> {
        Ok(EMBEDDED_QUESTIONS.to_string())
    }

    fn load_gifts(&self) -> Result<String, Self::Error> {
        Ok(EMBEDDED_GIFTS.to_string())
    }
}

/// Feed over `questions.json` and `gifts.json` in a directory, for
/// exercising alternate data sets.
#[derive(Debug, Clone)]
pub struct FsDataFeed {
    dir: PathBuf,
}

impl FsDataFeed {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataFeed for FsDataFeed {
    type Error = std::io::Error;

    fn load_questions(&self) -> Result<String, Self::Error> {
        std::fs::read_to_string(self.dir.join("questions.json"))
    }

    fn load_gifts(&self) -> Result<String, Self::Error> {
        std::fs::read_to_string(self.dir.join("gifts.json"))
    }
}

/// Sink standing in for the reference no-op delivery hook: reports are
/// logged and counted, never transmitted.
#[derive(Debug, Default)]
pub struct ReportDrain {
    delivered: Cell<usize>,
}

impl ReportDrain {
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.delivered.get()
    }
}

impl ResultSink for ReportDrain {
    type Error = Infallible;

    fn deliver(&self, report: &CompletionReport) -> Result<(), Self::Error> {
        log::debug!(
            "drained report completed at {} with {} answers",
            report.completed_at,
            report.answers.len()
        );
        self.delivered.set(self.delivered.get() + 1);
        Ok(())
    }
}
