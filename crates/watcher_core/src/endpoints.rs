use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid base url: {0}")]
    InvalidBase(#[from] url::ParseError),
    #[error("base url cannot carry paths: {0}")]
    OpaqueBase(String),
    #[error("job id must be non-empty and contain only letters, digits, '_' or '-': {0:?}")]
    InvalidJobId(String),
}

/// Status and log-file URLs of one job, as routed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEndpoints {
    pub status_url: Url,
    pub log_url: Url,
}

impl JobEndpoints {
    /// `{base}/get_progress/{job_id}/` and `{base}/get_task_log/{job_id}/`.
    pub fn for_job(base: &str, job_id: &str) -> Result<Self, EndpointError> {
        if job_id.is_empty()
            || !job_id
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(EndpointError::InvalidJobId(job_id.to_string()));
        }

        let mut base = Url::parse(base)?;
        if base.cannot_be_a_base() {
            return Err(EndpointError::OpaqueBase(base.to_string()));
        }
        // Without a trailing slash `join` would replace the last segment.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            status_url: base.join(&format!("get_progress/{job_id}/"))?,
            log_url: base.join(&format!("get_task_log/{job_id}/"))?,
        })
    }
}
