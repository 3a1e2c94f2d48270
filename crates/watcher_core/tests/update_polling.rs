use std::sync::Once;

use pretty_assertions::assert_eq;
use watcher_core::{
    update, Effect, JobStatus, Language, Msg, Percent, Phase, RenderOp, WatchRequest, WatchSession,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

fn new_session() -> WatchSession {
    let request = WatchRequest::new("job-1", "http://srv/status", "http://srv/log")
        .with_auth_token("tok")
        .with_log_file_default("http://srv/default.log");
    WatchSession::new(request, Language::English.labels())
}

/// Drive one full poll: `PollDue` followed by the given status.
fn poll(session: WatchSession, status: JobStatus) -> (WatchSession, Vec<Effect>) {
    let (session, first) = update(session, Msg::PollDue);
    let (session, mut second) = update(session, Msg::StatusReceived(status));
    let mut effects = first;
    effects.append(&mut second);
    (session, effects)
}

fn shown_percents(effects: &[Effect]) -> Vec<Percent> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Render(RenderOp::ShowProgress { percent, .. }) => Some(*percent),
            _ => None,
        })
        .collect()
}

#[test]
fn first_poll_injects_skeleton_then_requests_status() {
    init_logging();
    let session = new_session();
    let (session, effects) = update(session, Msg::PollDue);

    assert_eq!(
        effects,
        vec![
            Effect::Render(RenderOp::InjectSkeleton(Language::English.labels())),
            Effect::RequestStatus,
        ]
    );
    assert!(session.is_initialized());
    assert!(session.view().skeleton_injected);
    assert_eq!(session.phase(), Phase::AwaitingStatus);
    assert_eq!(session.polls(), 1);
}

#[test]
fn skeleton_is_injected_once_per_session() {
    init_logging();
    let (session, _) = poll(new_session(), JobStatus::Pending);
    let (session, effects) = poll(session, JobStatus::Started);
    let (_session, more) = poll(session, JobStatus::Unknown);

    let injections = effects
        .iter()
        .chain(more.iter())
        .filter(|e| matches!(e, Effect::Render(RenderOp::InjectSkeleton(_))))
        .count();
    assert_eq!(injections, 0);
}

#[test]
fn pending_shows_zero_bar_and_placeholder() {
    init_logging();
    let (session, effects) = poll(new_session(), JobStatus::Pending);

    assert_eq!(
        effects[1..].to_vec(),
        vec![
            Effect::RequestStatus,
            Effect::Render(RenderOp::ShowProgress {
                percent: Percent::ZERO,
                label: Some("0".to_string()),
            }),
            Effect::Render(RenderOp::SetLog(
                "Sending task, pending response...".to_string()
            )),
            Effect::Render(RenderOp::ScrollLogToBottom),
            Effect::SchedulePoll,
        ]
    );
    assert_eq!(session.phase(), Phase::WaitingForPoll);
    assert_eq!(session.reschedules(), 1);
    assert!(session.view().bar_visible);
}

#[test]
fn started_uses_its_own_placeholder() {
    init_logging();
    let (session, _) = poll(new_session(), JobStatus::Started);
    assert_eq!(session.view().log_text, "Process started...");
    assert_eq!(session.view().percent, Percent::ZERO);
}

#[test]
fn progress_updates_bar_label_and_log() {
    init_logging();
    let (session, effects) = poll(
        new_session(),
        JobStatus::InProgress {
            current_step: 1,
            total_steps: 3,
            log_text: "line 1\nline 2".to_string(),
        },
    );

    assert_eq!(shown_percents(&effects), vec![Percent::from_steps(1, 3)]);
    let view = session.view();
    assert_eq!(view.percent.to_string(), "33.33");
    assert_eq!(view.step_label, "1");
    assert_eq!(view.log_text, "line 1\nline 2");
    assert_eq!(effects.last(), Some(&Effect::SchedulePoll));
}

#[test]
fn unknown_reschedules_without_touching_display() {
    init_logging();
    let (session, _) = poll(
        new_session(),
        JobStatus::InProgress {
            current_step: 2,
            total_steps: 4,
            log_text: "halfway".to_string(),
        },
    );
    let before = session.view().clone();

    let (session, effects) = poll(session, JobStatus::Unknown);
    assert_eq!(effects, vec![Effect::RequestStatus, Effect::SchedulePoll]);
    assert_eq!(session.view(), &before);
    assert!(!session.has_ended());
}

#[test]
fn pending_started_progress_success_reschedules_three_times() {
    init_logging();
    let mut percents = Vec::new();

    let (session, effects) = poll(new_session(), JobStatus::Pending);
    percents.extend(shown_percents(&effects));
    let (session, effects) = poll(session, JobStatus::Started);
    percents.extend(shown_percents(&effects));
    let (session, effects) = poll(
        session,
        JobStatus::InProgress {
            current_step: 50,
            total_steps: 100,
            log_text: String::new(),
        },
    );
    percents.extend(shown_percents(&effects));
    let (session, effects) = poll(
        session,
        JobStatus::Succeeded {
            log_text: "OK".to_string(),
        },
    );

    assert_eq!(session.reschedules(), 3);
    assert_eq!(session.polls(), 4);
    assert_eq!(
        percents.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["0.00", "0.00", "50.00"]
    );
    assert!(!session.view().bar_visible);
    assert_eq!(effects.last(), Some(&Effect::RequestLogUrl));
    assert!(!effects.contains(&Effect::SchedulePoll));
}

#[test]
fn poll_due_is_ignored_while_a_request_is_in_flight() {
    init_logging();
    let (session, _) = update(new_session(), Msg::PollDue);
    let (session, effects) = update(session, Msg::PollDue);

    assert!(effects.is_empty());
    assert_eq!(session.polls(), 1);
}
