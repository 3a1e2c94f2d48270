use serde::Deserialize;
use serde_json::Value;

/// Opaque error details reported by the server alongside an `ERROR` state.
pub type ErrorPayload = Value;

/// Raw body of the status endpoint, before classification.
///
/// `state` is kept as raw JSON: a missing or non-string tag is not an error,
/// it classifies as `Unknown`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub state: Value,
    #[serde(default)]
    pub details: Value,
}

/// Job state reported by one poll of the status endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending,
    Started,
    InProgress {
        current_step: u64,
        total_steps: u64,
        log_text: String,
    },
    Succeeded {
        log_text: String,
    },
    /// Server reported failure without details.
    Failed,
    /// Server reported failure with a log and an error payload.
    Errored {
        log_text: String,
        error_payload: ErrorPayload,
    },
    /// Any state the watcher does not recognize; treated as still running.
    Unknown,
}

impl JobStatus {
    /// Classify a decoded status body.
    ///
    /// `step`/`total` may be whole numbers, whole floats or numeric strings.
    /// A `PROGRESS` report with anything else (fractional steps included)
    /// has no step counter to show, so it maps to `Unknown` and the display
    /// is left as is.
    pub fn from_response(response: StatusResponse) -> Self {
        let details = &response.details;
        match response.state.as_str() {
            Some("PENDING") => Self::Pending,
            Some("STARTED") => Self::Started,
            Some("PROGRESS") => progress_from_details(details).unwrap_or(Self::Unknown),
            Some("SUCCESS") => Self::Succeeded {
                log_text: logs_of(details),
            },
            Some("FAILURE") => Self::Failed,
            Some("ERROR") => Self::Errored {
                log_text: logs_of(details),
                error_payload: details.get("error").cloned().unwrap_or(Value::Null),
            },
            _ => Self::Unknown,
        }
    }

    /// Decode and classify a raw JSON body.
    ///
    /// Only bodies that are not JSON at all are errors. Valid JSON without a
    /// usable status object classifies as `Unknown`.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        let response = StatusResponse::deserialize(value).unwrap_or_default();
        Ok(Self::from_response(response))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed | Self::Errored { .. })
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Started => "started",
            Self::InProgress { .. } => "in-progress",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed => "failed",
            Self::Errored { .. } => "errored",
            Self::Unknown => "unknown",
        }
    }
}

impl From<StatusResponse> for JobStatus {
    fn from(response: StatusResponse) -> Self {
        Self::from_response(response)
    }
}

fn progress_from_details(details: &Value) -> Option<JobStatus> {
    let current_step = step_count(details.get("step")?)?;
    let total_steps = step_count(details.get("total")?)?;
    Some(JobStatus::InProgress {
        current_step,
        total_steps,
        log_text: logs_of(details),
    })
}

// Workers occasionally report whole numbers as floats (`3.0`) or strings (`"3"`).
fn step_count(value: &Value) -> Option<u64> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_number))
        }
        _ => value
            .as_u64()
            .or_else(|| value.as_f64().and_then(whole_number)),
    }
}

fn whole_number(n: f64) -> Option<u64> {
    (n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

fn logs_of(details: &Value) -> String {
    match details.get("logs") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
