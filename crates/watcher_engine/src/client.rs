use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderName, HeaderValue};
use watcher_core::JobStatus;

use crate::{FailureKind, TransportError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cap on a single response body; status bodies carry the whole job log.
    pub max_body_bytes: u64,
    /// Header carrying the auth token on status requests.
    pub status_auth_header: String,
    /// Header carrying the auth token on log-URL requests. The server side
    /// historically expects a different spelling here.
    pub log_auth_header: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 8 * 1024 * 1024,
            status_auth_header: "X-CSRFToken".to_string(),
            log_auth_header: "X-CSRFRToken".to_string(),
        }
    }
}

/// The two endpoints a watch session talks to.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    /// One poll of the job-status endpoint.
    async fn fetch_status(&self, url: &str, auth_token: &str) -> Result<JobStatus, TransportError>;

    /// Resolve the downloadable log artifact URL of a finished job.
    async fn fetch_log_url(&self, url: &str, auth_token: &str) -> Result<String, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestStatusSource {
    client: reqwest::Client,
    max_body_bytes: u64,
    status_auth_header: HeaderName,
    log_auth_header: HeaderName,
}

impl ReqwestStatusSource {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
            status_auth_header: header_name(&settings.status_auth_header)?,
            log_auth_header: header_name(&settings.log_auth_header)?,
        })
    }

    async fn get_body(
        &self,
        url: &str,
        auth_header: &HeaderName,
        auth_token: &str,
    ) -> Result<Vec<u8>, TransportError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let mut request = self.client.get(parsed);
        if !auth_token.is_empty() {
            let value = HeaderValue::from_str(auth_token).map_err(|err| {
                TransportError::new(FailureKind::InvalidHeader, err.to_string())
            })?;
            request = request.header(auth_header.clone(), value);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_body_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.max_body_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_body_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl StatusSource for ReqwestStatusSource {
    async fn fetch_status(&self, url: &str, auth_token: &str) -> Result<JobStatus, TransportError> {
        let body = self
            .get_body(url, &self.status_auth_header, auth_token)
            .await?;
        JobStatus::from_json(&body)
            .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))
    }

    async fn fetch_log_url(&self, url: &str, auth_token: &str) -> Result<String, TransportError> {
        let body = self.get_body(url, &self.log_auth_header, auth_token).await?;
        decode_log_url(&body)
    }
}

/// The log endpoint answers either a JSON string or the bare URL as text.
fn decode_log_url(body: &[u8]) -> Result<String, TransportError> {
    let text = std::str::from_utf8(body)
        .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))?
        .trim();

    let url = if text.starts_with('"') {
        serde_json::from_str::<String>(text)
            .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))?
    } else {
        text.to_string()
    };

    if url.trim().is_empty() {
        return Err(TransportError::new(FailureKind::Decode, "empty log url"));
    }
    Ok(url)
}

fn header_name(name: &str) -> Result<HeaderName, TransportError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|err| TransportError::new(FailureKind::InvalidHeader, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::decode_log_url;
    use crate::FailureKind;

    #[test]
    fn accepts_json_string_and_plain_text() {
        assert_eq!(
            decode_log_url(br#""https://files/a.log""#).unwrap(),
            "https://files/a.log"
        );
        assert_eq!(
            decode_log_url(b"https://files/a.log\n").unwrap(),
            "https://files/a.log"
        );
    }

    #[test]
    fn empty_body_is_a_decode_failure() {
        assert_eq!(decode_log_url(b"  ").unwrap_err().kind, FailureKind::Decode);
        assert_eq!(decode_log_url(br#""""#).unwrap_err().kind, FailureKind::Decode);
    }

    #[test]
    fn broken_json_string_is_a_decode_failure() {
        assert_eq!(
            decode_log_url(br#""https://files"#).unwrap_err().kind,
            FailureKind::Decode
        );
    }
}
