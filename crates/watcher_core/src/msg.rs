use chrono::NaiveDateTime;

use crate::JobStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Time to poll: the session just started or the poll delay elapsed.
    PollDue,
    /// The status endpoint answered and the body was classified.
    StatusReceived(JobStatus),
    /// The status request could not be completed.
    StatusFailed { reason: String },
    /// The log-URL lookup settled. `None` means it failed.
    /// `at` is the local wall-clock time used for the download filename.
    LogUrlSettled {
        url: Option<String>,
        at: NaiveDateTime,
    },
    /// The caller asked the watch to stop.
    Cancelled,
}
