use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use watch_logging::watch_info;
use watcher_engine::{ClientSettings, Labels, Language, WatchRequest, WatchSettings};

use super::cli::Cli;

pub(crate) const DEFAULT_CONFIG_FILENAME: &str = "job-watch.ron";
const DEFAULT_LOG_FILENAME: &str = "job-watch.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("no endpoints: pass --base-url, or both --status-url and --log-url")]
    MissingEndpoints,
    #[error(transparent)]
    Endpoint(#[from] watcher_engine::EndpointError),
}

/// File-level settings; every field is optional and the CLI wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_body_bytes: Option<u64>,
    pub status_auth_header: Option<String>,
    pub log_auth_header: Option<String>,
    pub log_file_default: Option<String>,
    /// Where diagnostic logs are written.
    pub log_file: Option<PathBuf>,
}

impl WatchConfig {
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILENAME))
    }
}

/// Read a config file. A missing file yields defaults when `required` is false.
pub fn load_config(path: &Path, required: bool) -> Result<WatchConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(WatchConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    watch_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Everything a run needs, merged from CLI and config file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub request: WatchRequest,
    pub language: Language,
    pub labels: Labels,
    pub watch: WatchSettings,
    pub client: ClientSettings,
    pub show_logs: bool,
}

pub fn resolve(cli: &Cli, config: &WatchConfig) -> Result<RunSettings, ConfigError> {
    let base_url = cli.base_url.as_ref().or(config.base_url.as_ref());
    let mut request = match base_url {
        Some(base) => WatchRequest::for_job(base, &cli.job_id)?,
        None => WatchRequest::new(cli.job_id.clone(), String::new(), String::new()),
    };
    if let Some(url) = &cli.status_url {
        request.status_url = url.clone();
    }
    if let Some(url) = &cli.log_url {
        request.log_url = url.clone();
    }
    if request.status_url.is_empty() || request.log_url.is_empty() {
        return Err(ConfigError::MissingEndpoints);
    }

    let request = request.with_auth_token(cli.token.clone()).with_log_file_default(
        cli.log_default
            .clone()
            .or_else(|| config.log_file_default.clone())
            .unwrap_or_default(),
    );

    let language = cli
        .lang
        .as_deref()
        .or(config.language.as_deref())
        .map(Language::from_code)
        .unwrap_or_default();

    let mut watch = WatchSettings::default();
    if let Some(ms) = cli.interval_ms.or(config.poll_interval_ms) {
        watch.poll_interval = Duration::from_millis(ms);
    }

    let mut client = ClientSettings::default();
    if let Some(secs) = config.connect_timeout_secs {
        client.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = config.request_timeout_secs {
        client.request_timeout = Duration::from_secs(secs);
    }
    if let Some(bytes) = config.max_body_bytes {
        client.max_body_bytes = bytes;
    }
    if let Some(header) = &config.status_auth_header {
        client.status_auth_header = header.clone();
    }
    if let Some(header) = &config.log_auth_header {
        client.log_auth_header = header.clone();
    }

    Ok(RunSettings {
        request,
        language,
        labels: language.labels(),
        watch,
        client,
        show_logs: cli.show_logs,
    })
}
