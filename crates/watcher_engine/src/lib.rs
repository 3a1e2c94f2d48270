//! Watcher engine: status polling IO and effect execution.
mod client;
mod render;
mod types;
mod watcher;

pub use client::{ClientSettings, ReqwestStatusSource, StatusSource};
pub use render::{describe_error, Callbacks, LogCallbacks, RenderTarget};
pub use types::{FailureKind, TransportError};
pub use watcher::{ProgressWatcher, WatchReport, WatchSettings};

pub use tokio_util::sync::CancellationToken;
pub use watcher_core::{
    BannerKind, DownloadLink, EndpointError, ErrorPayload, JobStatus, Labels, Language, Percent,
    ProgressView, WatchOutcome, WatchRequest,
};
