//! Watcher core: pure poll state machine and render operations.
mod effect;
mod endpoints;
mod filename;
mod locale;
mod msg;
mod percent;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::{Banner, BannerKind, DownloadLink, Effect, RenderOp};
pub use endpoints::{EndpointError, JobEndpoints};
pub use filename::log_download_filename;
pub use locale::{Labels, Language};
pub use msg::Msg;
pub use percent::Percent;
pub use state::{Phase, WatchOutcome, WatchRequest, WatchSession};
pub use status::{ErrorPayload, JobStatus, StatusResponse};
pub use update::update;
pub use view_model::ProgressView;
