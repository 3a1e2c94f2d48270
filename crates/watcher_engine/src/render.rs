use watch_logging::{watch_error, watch_info};
use watcher_core::{Banner, BannerKind, DownloadLink, ErrorPayload, Labels, Percent, RenderOp};

/// The UI region a watch session owns and rewrites.
///
/// Implementations only draw; all decisions are made by the session.
pub trait RenderTarget: Send {
    /// Replace the region with the progress bar and the log panel.
    /// The panel heading reads `labels.disclosure(expanded)` for its current
    /// state; targets that let the user expand or collapse it switch between
    /// the two texts.
    fn inject_skeleton(&mut self, labels: &Labels);

    /// `label` replaces the step counter when present.
    fn show_progress(&mut self, percent: Percent, label: Option<&str>);

    fn hide_progress(&mut self);

    fn reset_progress(&mut self);

    fn set_log(&mut self, text: &str);

    fn scroll_log_to_bottom(&mut self) {}

    fn append_download_link(&mut self, link: &DownloadLink);

    fn prepend_banner(&mut self, kind: BannerKind, body: &str);

    fn reveal(&mut self) {}
}

/// The caller's hooks into a session's end.
pub trait Callbacks: Send + Sync {
    /// Body of the failure banner. `None` when the server gave no details.
    fn on_error_message(&self, error: Option<&ErrorPayload>) -> String {
        describe_error(error)
    }

    fn on_success(&self) {
        watch_info!("job finished successfully");
    }

    fn on_failure(&self, error: Option<&ErrorPayload>) {
        watch_error!("job failed: {}", describe_error(error));
    }
}

/// Callbacks that only log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCallbacks;

impl Callbacks for LogCallbacks {}

/// Plain-text rendering of an error payload; empty when there is none.
pub fn describe_error(error: Option<&ErrorPayload>) -> String {
    match error {
        None | Some(ErrorPayload::Null) => String::new(),
        Some(ErrorPayload::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

pub(crate) fn apply_render(target: &mut dyn RenderTarget, callbacks: &dyn Callbacks, op: RenderOp) {
    match op {
        RenderOp::InjectSkeleton(labels) => target.inject_skeleton(&labels),
        RenderOp::ShowProgress { percent, label } => {
            target.show_progress(percent, label.as_deref())
        }
        RenderOp::HideProgress => target.hide_progress(),
        RenderOp::ResetProgress => target.reset_progress(),
        RenderOp::SetLog(text) => target.set_log(&text),
        RenderOp::ScrollLogToBottom => target.scroll_log_to_bottom(),
        RenderOp::AppendDownloadLink(link) => target.append_download_link(&link),
        RenderOp::PrependBanner(Banner::Success { title }) => {
            target.prepend_banner(BannerKind::Success, &title)
        }
        RenderOp::PrependBanner(Banner::Failure { error }) => {
            let body = callbacks.on_error_message(error.as_ref());
            target.prepend_banner(BannerKind::Failure, &body);
        }
        RenderOp::Reveal => target.reveal(),
    }
}
