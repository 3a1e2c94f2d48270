use watch_logging::{watch_error, watch_info};
use watcher_engine::{describe_error, Callbacks, ErrorPayload, Language};

/// Callbacks for the CLI: banner text for failures, outcome in the log.
pub struct TerminalCallbacks {
    no_details: &'static str,
}

impl TerminalCallbacks {
    pub fn new(language: Language) -> Self {
        let no_details = match language {
            Language::Spanish => "El proceso falló sin detalles",
            Language::English => "The job failed without details",
        };
        Self { no_details }
    }
}

impl Callbacks for TerminalCallbacks {
    fn on_error_message(&self, error: Option<&ErrorPayload>) -> String {
        let described = describe_error(error);
        if described.is_empty() {
            self.no_details.to_string()
        } else {
            described
        }
    }

    fn on_success(&self) {
        watch_info!("Job completed");
    }

    fn on_failure(&self, error: Option<&ErrorPayload>) {
        watch_error!("Job failed: {}", self.on_error_message(error));
    }
}
