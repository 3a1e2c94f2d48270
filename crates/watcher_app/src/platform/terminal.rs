//! Terminal rendering of a watch session.

use std::io::{self, Write};

use watch_logging::watch_warn;
use watcher_engine::{BannerKind, DownloadLink, Labels, Percent, RenderTarget};

const BAR_WIDTH: u64 = 30;

pub struct TerminalTarget<W: Write + Send> {
    out: W,
    logs_expanded: bool,
    last_progress_line: Option<String>,
    log_text: String,
    /// Set after the first failed write; later failures are not logged again.
    write_failed: bool,
}

impl<W: Write + Send> TerminalTarget<W> {
    pub fn new(out: W, logs_expanded: bool) -> Self {
        Self {
            out,
            logs_expanded,
            last_progress_line: None,
            log_text: String::new(),
            write_failed: false,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let result = writeln!(self.out, "{text}");
        self.check(result);
    }

    fn flush(&mut self) {
        let result = self.out.flush();
        self.check(result);
    }

    fn check(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            if !self.write_failed {
                watch_warn!("Terminal output failed, further output is lost: {}", err);
                self.write_failed = true;
            }
        }
    }
}

impl<W: Write + Send> RenderTarget for TerminalTarget<W> {
    fn inject_skeleton(&mut self, labels: &Labels) {
        self.last_progress_line = None;
        self.log_text.clear();
        let marker = if self.logs_expanded { '▾' } else { '▸' };
        let heading = format!("{marker} {}", labels.disclosure(self.logs_expanded));
        self.line(&heading);
    }

    fn show_progress(&mut self, percent: Percent, label: Option<&str>) {
        let mut text = format!("{} {:>6}%", bar(percent), percent.to_string());
        if let Some(label) = label {
            text.push_str(&format!("  step {label}"));
        }
        // Repeated polls with no change would otherwise flood the terminal.
        if self.last_progress_line.as_deref() == Some(text.as_str()) {
            return;
        }
        self.line(&text);
        self.last_progress_line = Some(text);
    }

    fn hide_progress(&mut self) {
        self.last_progress_line = None;
    }

    fn reset_progress(&mut self) {
        self.last_progress_line = None;
    }

    fn set_log(&mut self, text: &str) {
        if self.logs_expanded {
            let fresh = text.strip_prefix(self.log_text.as_str()).unwrap_or(text);
            let fresh = fresh.trim_start_matches('\n');
            if !fresh.is_empty() {
                let echoed = fresh.trim_end_matches('\n').to_string();
                self.line(&echoed);
            }
        }
        self.log_text = text.to_string();
    }

    fn scroll_log_to_bottom(&mut self) {
        self.flush();
    }

    fn append_download_link(&mut self, link: &DownloadLink) {
        let text = format!("{}: {} (save as {})", link.label, link.href, link.filename);
        self.line(&text);
    }

    fn prepend_banner(&mut self, kind: BannerKind, body: &str) {
        let marker = match kind {
            BannerKind::Success => '✔',
            BannerKind::Failure => '✖',
        };
        self.line(&format!("{marker} {body}"));
    }

    fn reveal(&mut self) {
        self.flush();
    }
}

fn bar(percent: Percent) -> String {
    let filled = percent.hundredths().min(10_000) * BAR_WIDTH / 10_000;
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        ".".repeat((BAR_WIDTH - filled) as usize)
    )
}
