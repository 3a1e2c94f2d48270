use std::collections::VecDeque;
use std::time::Duration;

use chrono::Local;
use tokio_util::sync::CancellationToken;
use watch_logging::{watch_debug, watch_info, watch_warn};
use watcher_core::{
    update, Effect, Labels, Msg, ProgressView, WatchOutcome, WatchRequest, WatchSession,
};

use crate::render::apply_render;
use crate::{Callbacks, RenderTarget, StatusSource};

#[derive(Debug, Clone)]
pub struct WatchSettings {
    /// Delay between a non-terminal answer and the next poll.
    pub poll_interval: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Summary of a finished watch.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchReport {
    pub outcome: WatchOutcome,
    pub polls: u32,
    pub reschedules: u32,
    pub log_file_url: Option<String>,
    /// Final state of the render target.
    pub view: ProgressView,
}

/// Polls a job until it reaches a terminal state and renders it.
pub struct ProgressWatcher<S> {
    source: S,
    settings: WatchSettings,
}

impl<S: StatusSource> ProgressWatcher<S> {
    pub fn new(source: S, settings: WatchSettings) -> Self {
        Self { source, settings }
    }

    /// Watch one job to its end. Runs forever if the server never reports a
    /// terminal state.
    pub async fn watch(
        &self,
        request: WatchRequest,
        labels: Labels,
        target: &mut dyn RenderTarget,
        callbacks: &dyn Callbacks,
    ) -> WatchReport {
        self.run(request, labels, target, callbacks, None).await
    }

    /// Like [`watch`](Self::watch), but stops polling once `cancel` fires.
    ///
    /// Cancellation is only observed while polling. Once the job reached a
    /// terminal state the log lookup and terminal render always complete.
    /// A cancelled watch renders nothing further and invokes no callback.
    pub async fn watch_with_cancel(
        &self,
        request: WatchRequest,
        labels: Labels,
        target: &mut dyn RenderTarget,
        callbacks: &dyn Callbacks,
        cancel: &CancellationToken,
    ) -> WatchReport {
        self.run(request, labels, target, callbacks, Some(cancel)).await
    }

    async fn run(
        &self,
        request: WatchRequest,
        labels: Labels,
        target: &mut dyn RenderTarget,
        callbacks: &dyn Callbacks,
        cancel: Option<&CancellationToken>,
    ) -> WatchReport {
        watch_info!(job = request.job_id; "watching {}", request.status_url);

        let mut session = WatchSession::new(request, labels);
        let mut inbox = VecDeque::from([Msg::PollDue]);
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(session, msg);
            session = next;
            for effect in effects {
                if let Some(msg) = self
                    .run_effect(&session, effect, target, callbacks, cancel)
                    .await
                {
                    inbox.push_back(msg);
                }
            }
        }

        // The inbox only drains once the session is finished or cancelled.
        let outcome = session.outcome().unwrap_or(WatchOutcome::Cancelled);
        watch_info!(
            job = session.request().job_id;
            "watch ended: {:?} after {} polls",
            outcome,
            session.polls()
        );
        WatchReport {
            outcome,
            polls: session.polls(),
            reschedules: session.reschedules(),
            log_file_url: session.log_file_url().map(str::to_string),
            view: session.view().clone(),
        }
    }

    async fn run_effect(
        &self,
        session: &WatchSession,
        effect: Effect,
        target: &mut dyn RenderTarget,
        callbacks: &dyn Callbacks,
        cancel: Option<&CancellationToken>,
    ) -> Option<Msg> {
        let request = session.request();
        match effect {
            Effect::Render(op) => {
                apply_render(target, callbacks, op);
                None
            }
            Effect::RequestStatus => {
                watch_debug!(job = request.job_id; "poll #{}", session.polls());
                let fetch = self
                    .source
                    .fetch_status(&request.status_url, &request.auth_token);
                let result = match cancel {
                    Some(token) => tokio::select! {
                        biased;
                        _ = token.cancelled() => return Some(Msg::Cancelled),
                        result = fetch => result,
                    },
                    None => fetch.await,
                };
                Some(match result {
                    Ok(status) => {
                        watch_debug!(job = request.job_id; "status {}", status.name());
                        if status.is_terminal() {
                            watch_info!(job = request.job_id; "job {}", status.name());
                        }
                        Msg::StatusReceived(status)
                    }
                    Err(err) => {
                        watch_warn!(job = request.job_id; "status request failed: {}", err);
                        Msg::StatusFailed {
                            reason: err.to_string(),
                        }
                    }
                })
            }
            Effect::SchedulePoll => {
                let delay = tokio::time::sleep(self.settings.poll_interval);
                match cancel {
                    Some(token) => tokio::select! {
                        biased;
                        _ = token.cancelled() => Some(Msg::Cancelled),
                        _ = delay => Some(Msg::PollDue),
                    },
                    None => {
                        delay.await;
                        Some(Msg::PollDue)
                    }
                }
            }
            Effect::RequestLogUrl => {
                let url = match self
                    .source
                    .fetch_log_url(&request.log_url, &request.auth_token)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(err) => {
                        watch_warn!(
                            job = request.job_id;
                            "log url lookup failed, offering default: {}",
                            err
                        );
                        None
                    }
                };
                Some(Msg::LogUrlSettled {
                    url,
                    at: Local::now().naive_local(),
                })
            }
            Effect::NotifySuccess => {
                callbacks.on_success();
                None
            }
            Effect::NotifyFailure { error } => {
                callbacks.on_failure(error.as_ref());
                None
            }
        }
    }
}
