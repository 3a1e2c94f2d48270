use crate::{
    log_download_filename, Banner, DownloadLink, Effect, JobStatus, Msg, Percent, Phase, RenderOp,
    WatchSession,
};

/// Pure update function: applies a message to the session and returns the
/// effects the engine must run, in order.
///
/// Messages that do not fit the current phase are ignored, which keeps the
/// terminal render to exactly one per session.
pub fn update(mut session: WatchSession, msg: Msg) -> (WatchSession, Vec<Effect>) {
    let effects = match (session.phase(), msg) {
        (Phase::WaitingForPoll, Msg::PollDue) => {
            let mut effects = Vec::with_capacity(2);
            if !session.is_initialized() {
                let labels = session.labels().clone();
                effects.push(session.render(RenderOp::InjectSkeleton(labels)));
                session.mark_initialized();
            }
            session.begin_poll();
            effects.push(Effect::RequestStatus);
            effects
        }
        (Phase::AwaitingStatus, Msg::StatusReceived(status)) => apply_status(&mut session, status),
        (Phase::AwaitingStatus, Msg::StatusFailed { .. }) => {
            // No retry: one failed poll ends the session.
            vec![session.end(true, None)]
        }
        (Phase::AwaitingLogUrl, Msg::LogUrlSettled { url, at }) => {
            let href = url.unwrap_or_else(|| session.request().log_file_default.clone());
            session.set_log_file_url(href.clone());
            let link = DownloadLink {
                href,
                filename: log_download_filename(at),
                label: session.labels().download_logs.clone(),
            };

            let mut effects = vec![session.render(RenderOp::AppendDownloadLink(link))];
            if session.has_failed() {
                let error = session.last_error().cloned();
                effects.push(session.render(RenderOp::HideProgress));
                effects.push(session.render(RenderOp::ResetProgress));
                effects.push(session.render(RenderOp::PrependBanner(Banner::Failure {
                    error: error.clone(),
                })));
                effects.push(session.render(RenderOp::Reveal));
                effects.push(session.render(RenderOp::ScrollLogToBottom));
                effects.push(Effect::NotifyFailure { error });
            } else {
                let title = session.labels().success_title.clone();
                effects.push(session.render(RenderOp::PrependBanner(Banner::Success { title })));
                effects.push(session.render(RenderOp::Reveal));
                effects.push(Effect::NotifySuccess);
            }
            session.finish();
            effects
        }
        (Phase::WaitingForPoll | Phase::AwaitingStatus, Msg::Cancelled) => {
            session.cancel();
            Vec::new()
        }
        _ => Vec::new(),
    };

    (session, effects)
}

fn apply_status(session: &mut WatchSession, status: JobStatus) -> Vec<Effect> {
    match status {
        JobStatus::Pending => {
            let placeholder = session.labels().pending.clone();
            waiting_placeholder(session, placeholder)
        }
        JobStatus::Started => {
            let placeholder = session.labels().started.clone();
            waiting_placeholder(session, placeholder)
        }
        JobStatus::InProgress {
            current_step,
            total_steps,
            log_text,
        } => vec![
            session.render(RenderOp::ShowProgress {
                percent: Percent::from_steps(current_step, total_steps),
                label: Some(current_step.to_string()),
            }),
            session.render(RenderOp::SetLog(log_text)),
            session.render(RenderOp::ScrollLogToBottom),
            session.reschedule(),
        ],
        JobStatus::Succeeded { log_text } => vec![
            session.render(RenderOp::ShowProgress {
                percent: Percent::FULL,
                label: None,
            }),
            session.render(RenderOp::HideProgress),
            session.render(RenderOp::ResetProgress),
            session.render(RenderOp::SetLog(log_text)),
            session.render(RenderOp::ScrollLogToBottom),
            session.end(false, None),
        ],
        JobStatus::Failed => vec![session.end(true, None)],
        JobStatus::Errored {
            log_text,
            error_payload,
        } => vec![
            session.render(RenderOp::SetLog(log_text)),
            session.render(RenderOp::ScrollLogToBottom),
            session.end(true, Some(error_payload)),
        ],
        JobStatus::Unknown => vec![session.reschedule()],
    }
}

fn waiting_placeholder(session: &mut WatchSession, placeholder: String) -> Vec<Effect> {
    vec![
        session.render(RenderOp::ShowProgress {
            percent: Percent::ZERO,
            label: Some("0".to_string()),
        }),
        session.render(RenderOp::SetLog(placeholder)),
        session.render(RenderOp::ScrollLogToBottom),
        session.reschedule(),
    ]
}
