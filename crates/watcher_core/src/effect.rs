use crate::{ErrorPayload, Labels, Percent};

/// Side effects requested by `update`, executed in order by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Render(RenderOp),
    /// Issue one request to the status endpoint.
    RequestStatus,
    /// Wait one poll interval, then deliver `Msg::PollDue`.
    SchedulePoll,
    /// Resolve the downloadable log artifact URL.
    RequestLogUrl,
    NotifySuccess,
    NotifyFailure { error: Option<ErrorPayload> },
}

/// One mutation of the render target.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOp {
    /// Replace the whole region with the progress bar and collapsible log
    /// panel. The panel's disclosure toggle is wired from the labels.
    InjectSkeleton(Labels),
    /// Show the bar at `percent`. `label` replaces the step counter when set.
    ShowProgress {
        percent: Percent,
        label: Option<String>,
    },
    HideProgress,
    /// Width back to zero, step counter back to `0`.
    ResetProgress,
    SetLog(String),
    ScrollLogToBottom,
    AppendDownloadLink(DownloadLink),
    PrependBanner(Banner),
    /// Make the region visible after the terminal render.
    Reveal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Success { title: String },
    /// Body text comes from the caller's error-message callback.
    Failure { error: Option<ErrorPayload> },
}

impl Banner {
    pub fn kind(&self) -> BannerKind {
        match self {
            Banner::Success { .. } => BannerKind::Success,
            Banner::Failure { .. } => BannerKind::Failure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub filename: String,
    pub label: String,
}
