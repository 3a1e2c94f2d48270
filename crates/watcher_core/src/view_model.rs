use crate::{BannerKind, DownloadLink, Percent, RenderOp};

/// What the render target currently shows, mirrored from the emitted ops.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub skeleton_injected: bool,
    pub bar_visible: bool,
    pub percent: Percent,
    pub step_label: String,
    pub log_text: String,
    pub banner: Option<BannerKind>,
    pub download: Option<DownloadLink>,
    pub revealed: bool,
}

impl ProgressView {
    pub(crate) fn apply(&mut self, op: &RenderOp) {
        match op {
            RenderOp::InjectSkeleton(_) => {
                *self = ProgressView {
                    skeleton_injected: true,
                    step_label: "0".to_string(),
                    ..ProgressView::default()
                };
            }
            RenderOp::ShowProgress { percent, label } => {
                self.bar_visible = true;
                self.percent = *percent;
                if let Some(label) = label {
                    self.step_label = label.clone();
                }
            }
            RenderOp::HideProgress => self.bar_visible = false,
            RenderOp::ResetProgress => {
                self.percent = Percent::ZERO;
                self.step_label = "0".to_string();
            }
            RenderOp::SetLog(text) => self.log_text = text.clone(),
            RenderOp::ScrollLogToBottom => {}
            RenderOp::AppendDownloadLink(link) => self.download = Some(link.clone()),
            RenderOp::PrependBanner(banner) => self.banner = Some(banner.kind()),
            RenderOp::Reveal => self.revealed = true,
        }
    }
}
