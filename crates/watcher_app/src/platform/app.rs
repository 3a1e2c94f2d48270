use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use watch_logging::{watch_info, watch_warn};
use watcher_engine::{CancellationToken, ProgressWatcher, ReqwestStatusSource, WatchOutcome};

use super::callbacks::TerminalCallbacks;
use super::cli::Cli;
use super::config::{load_config, resolve, RunSettings, DEFAULT_CONFIG_FILENAME};
use super::terminal::TerminalTarget;

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path, true)?,
        None => load_config(&PathBuf::from(DEFAULT_CONFIG_FILENAME), false)?,
    };
    watch_logging::initialize(cli.log_to.into(), cli.log_level, &config.log_file());

    let RunSettings {
        request,
        language,
        labels,
        watch,
        client,
        show_logs,
    } = resolve(&cli, &config)?;

    let source = ReqwestStatusSource::new(client)?;
    let watcher = ProgressWatcher::new(source, watch);
    let callbacks = TerminalCallbacks::new(language);
    let mut target = TerminalTarget::new(io::stdout(), show_logs);

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                watch_warn!("Interrupted, stopping watch");
                on_interrupt.cancel();
            }
        });

        watcher
            .watch_with_cancel(request, labels, &mut target, &callbacks, &cancel)
            .await
    });

    watch_info!(
        "Finished after {} polls ({} reschedules)",
        report.polls,
        report.reschedules
    );
    Ok(match report.outcome {
        WatchOutcome::Succeeded => ExitCode::SUCCESS,
        WatchOutcome::Failed { .. } => ExitCode::from(1),
        WatchOutcome::Cancelled => ExitCode::from(130),
    })
}
