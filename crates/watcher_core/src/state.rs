use crate::effect::{Effect, RenderOp};
use crate::endpoints::{EndpointError, JobEndpoints};
use crate::{ErrorPayload, Labels, ProgressView};

/// Everything the caller supplies to watch one job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchRequest {
    pub job_id: String,
    pub status_url: String,
    pub log_url: String,
    pub auth_token: String,
    /// Download URL offered when the log-file lookup fails.
    pub log_file_default: String,
}

impl WatchRequest {
    pub fn new(
        job_id: impl Into<String>,
        status_url: impl Into<String>,
        log_url: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            status_url: status_url.into(),
            log_url: log_url.into(),
            ..Self::default()
        }
    }

    /// Build a request from the server's base URL and the job id.
    pub fn for_job(base: &str, job_id: &str) -> Result<Self, EndpointError> {
        let endpoints = JobEndpoints::for_job(base, job_id)?;
        Ok(Self::new(
            job_id,
            endpoints.status_url.to_string(),
            endpoints.log_url.to_string(),
        ))
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = token.into();
        self
    }

    pub fn with_log_file_default(mut self, url: impl Into<String>) -> Self {
        self.log_file_default = url.into();
        self
    }
}

/// Where the session is in its poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the next `PollDue`.
    #[default]
    WaitingForPoll,
    AwaitingStatus,
    /// Terminal state reached; waiting for the log-URL lookup.
    AwaitingLogUrl,
    /// Terminal UI rendered and callbacks notified.
    Finished,
    Cancelled,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    Succeeded,
    Failed { error: Option<ErrorPayload> },
    Cancelled,
}

/// Owned state of one watch over one job.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchSession {
    request: WatchRequest,
    labels: Labels,
    phase: Phase,
    is_initialized: bool,
    has_ended: bool,
    has_failed: bool,
    last_error: Option<ErrorPayload>,
    polls: u32,
    reschedules: u32,
    log_file_url: Option<String>,
    view: ProgressView,
}

impl WatchSession {
    pub fn new(request: WatchRequest, labels: Labels) -> Self {
        Self {
            request,
            labels,
            phase: Phase::default(),
            is_initialized: false,
            has_ended: false,
            has_failed: false,
            last_error: None,
            polls: 0,
            reschedules: 0,
            log_file_url: None,
            view: ProgressView::default(),
        }
    }

    pub fn request(&self) -> &WatchRequest {
        &self.request
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    pub fn has_ended(&self) -> bool {
        self.has_ended
    }

    pub fn has_failed(&self) -> bool {
        self.has_failed
    }

    pub fn last_error(&self) -> Option<&ErrorPayload> {
        self.last_error.as_ref()
    }

    /// Status requests issued so far.
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Times a non-terminal response scheduled another poll.
    pub fn reschedules(&self) -> u32 {
        self.reschedules
    }

    /// URL offered in the download link, once the terminal render happened.
    pub fn log_file_url(&self) -> Option<&str> {
        self.log_file_url.as_deref()
    }

    pub fn view(&self) -> &ProgressView {
        &self.view
    }

    /// `None` while the session is still running.
    pub fn outcome(&self) -> Option<WatchOutcome> {
        match self.phase {
            Phase::Finished if self.has_failed => Some(WatchOutcome::Failed {
                error: self.last_error.clone(),
            }),
            Phase::Finished => Some(WatchOutcome::Succeeded),
            Phase::Cancelled => Some(WatchOutcome::Cancelled),
            Phase::WaitingForPoll | Phase::AwaitingStatus | Phase::AwaitingLogUrl => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Finished | Phase::Cancelled)
    }

    /// Record a render op on the local view and wrap it as an effect.
    pub(crate) fn render(&mut self, op: RenderOp) -> Effect {
        self.view.apply(&op);
        Effect::Render(op)
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.is_initialized = true;
    }

    pub(crate) fn begin_poll(&mut self) {
        self.polls += 1;
        self.phase = Phase::AwaitingStatus;
    }

    pub(crate) fn reschedule(&mut self) -> Effect {
        self.reschedules += 1;
        self.phase = Phase::WaitingForPoll;
        Effect::SchedulePoll
    }

    pub(crate) fn end(&mut self, failed: bool, error: Option<ErrorPayload>) -> Effect {
        self.has_ended = true;
        self.has_failed = failed;
        self.last_error = error;
        self.phase = Phase::AwaitingLogUrl;
        Effect::RequestLogUrl
    }

    pub(crate) fn set_log_file_url(&mut self, url: String) {
        self.log_file_url = Some(url);
    }

    pub(crate) fn finish(&mut self) {
        self.phase = Phase::Finished;
    }

    pub(crate) fn cancel(&mut self) {
        self.phase = Phase::Cancelled;
    }
}
