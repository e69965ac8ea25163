use crate::answers::Response;
use crate::data::AssessmentData;
use crate::report::CompletionReport;
use crate::session::{AssessmentSession, SessionError};

/// Where the data feeds stand. The flow starts in `Loading` and refuses
/// to begin a run until both feeds have landed.
#[derive(Debug, Clone, Default)]
pub enum DataState {
    #[default]
    Loading,
    Ready(AssessmentData),
    Failed(String),
}

/// Which phase of the run the respondent is in.
#[derive(Debug, Clone, Default)]
pub enum FlowState {
    #[default]
    NotStarted,
    InProgress(AssessmentSession),
    Completed(CompletionReport),
}

/// Errors raised by flow transitions. `Session` wraps the in-run errors
/// from [`SessionError`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("assessment data is still loading")]
    DataNotReady,
    #[error("assessment data failed to load: {0}")]
    DataUnavailable(String),
    #[error("a run is already underway")]
    AlreadyStarted,
    #[error("no run is in progress")]
    NotInProgress,
    #[error("no completed run to restart from")]
    NotCompleted,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// The whole assessment lifecycle: data loading on one axis, the
/// respondent's run on the other. All transitions go through methods
/// here so illegal states stay unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct SessionFlow {
    data: DataState,
    state: FlowState,
}

impl SessionFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install loaded feeds. Does not touch the run phase.
    pub fn set_data(&mut self, data: AssessmentData) {
        self.data = DataState::Ready(data);
    }

    /// Record that the feeds could not be loaded.
    pub fn mark_unavailable(&mut self, message: impl Into<String>) {
        self.data = DataState::Failed(message.into());
    }

    #[must_use]
    pub const fn data_state(&self) -> &DataState {
        &self.data
    }

    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    /// Whether the feeds are loaded and a run could start.
    #[must_use]
    pub const fn data_ready(&self) -> bool {
        matches!(self.data, DataState::Ready(_))
    }

    /// The load failure message, when there is one.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        match &self.data {
            DataState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The live session, when a run is underway.
    #[must_use]
    pub const fn session(&self) -> Option<&AssessmentSession> {
        match &self.state {
            FlowState::InProgress(session) => Some(session),
            _ => None,
        }
    }

    /// The finished report, once a run has completed.
    #[must_use]
    pub const fn report(&self) -> Option<&CompletionReport> {
        match &self.state {
            FlowState::Completed(report) => Some(report),
            _ => None,
        }
    }

    /// Begin a run with a shuffle seeded from `seed`. Fails closed while
    /// the feeds are loading or failed, and refuses to clobber a run
    /// already underway or completed.
    ///
    /// # Errors
    ///
    /// [`FlowError::DataNotReady`], [`FlowError::DataUnavailable`], or
    /// [`FlowError::AlreadyStarted`].
    pub fn start(&mut self, seed: u64) -> Result<(), FlowError> {
        let data = match &self.data {
            DataState::Loading => return Err(FlowError::DataNotReady),
            DataState::Failed(message) => {
                return Err(FlowError::DataUnavailable(message.clone()));
            }
            DataState::Ready(data) => data.clone(),
        };
        if !matches!(self.state, FlowState::NotStarted) {
            return Err(FlowError::AlreadyStarted);
        }
        self.state = FlowState::InProgress(AssessmentSession::new(data, seed));
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut AssessmentSession, FlowError> {
        match &mut self.state {
            FlowState::InProgress(session) => Ok(session),
            _ => Err(FlowError::NotInProgress),
        }
    }

    /// Record an answer in the live session.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotInProgress`] outside a run, or the session's own
    /// rejection wrapped in [`FlowError::Session`].
    pub fn answer(&mut self, id: &str, response: Response) -> Result<(), FlowError> {
        Ok(self.session_mut()?.set_answer(id, response)?)
    }

    /// Advance the live session one page.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotInProgress`] outside a run, or the gate's refusal
    /// wrapped in [`FlowError::Session`].
    pub fn next_page(&mut self) -> Result<(), FlowError> {
        Ok(self.session_mut()?.next_page()?)
    }

    /// Move the live session back one page. Returns whether it moved.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotInProgress`] outside a run.
    pub fn prev_page(&mut self) -> Result<bool, FlowError> {
        Ok(self.session_mut()?.prev_page())
    }

    /// Fill the live session's remaining answers from its seeded rng.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotInProgress`] outside a run.
    pub fn autofill(&mut self) -> Result<(), FlowError> {
        self.session_mut()?.autofill();
        Ok(())
    }

    /// Submit the live session and move to `Completed`. The caller
    /// supplies the completion timestamp so this stays clock-free; the
    /// finished report is read back through [`SessionFlow::report`].
    ///
    /// # Errors
    ///
    /// [`FlowError::NotInProgress`] outside a run, or the session's gate
    /// refusal wrapped in [`FlowError::Session`] (the run stays live).
    pub fn submit(&mut self, completed_at: impl Into<String>) -> Result<(), FlowError> {
        let session = self.session_mut()?;
        let scores = session.submit()?;
        let report = CompletionReport::new(completed_at, session.answers(), scores);
        self.state = FlowState::Completed(report);
        Ok(())
    }

    /// Drop the finished run and return to `NotStarted`. The loaded
    /// feeds are kept, so the next start needs no refetch.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotCompleted`] unless a run has finished.
    pub fn restart(&mut self) -> Result<(), FlowError> {
        if !matches!(self.state, FlowState::Completed(_)) {
            return Err(FlowError::NotCompleted);
        }
        self.state = FlowState::NotStarted;
        Ok(())
    }
}
