use crate::domain::{Command, CommandReply, CommandTransport, TransportError};
use crate::interface_adapters::protocol::CommandRequest;
use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ApiClientError {
    Build(reqwest::Error),
    InvalidCookie,
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::Build(err) => write!(f, "failed to build http client: {err}"),
            ApiClientError::InvalidCookie => f.write_str("session cookie is not a valid header value"),
        }
    }
}

impl std::error::Error for ApiClientError {}

// Thin reqwest client for the game command endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session_cookie: Option<&str>,
    ) -> Result<Self, ApiClientError> {
        // Every command runs under the session credential, so it rides as a default header.
        let mut headers = HeaderMap::new();
        if let Some(cookie) = session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|_| ApiClientError::InvalidCookie)?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiClientError::Build)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CommandTransport for ApiClient {
    async fn send(&self, command: &Command) -> Result<CommandReply, TransportError> {
        let request = CommandRequest::from(command);
        let url = format!("{}{}", self.base_url, request.path);

        // POST the JSON body; any HTTP status counts as a completed request.
        let response = self
            .http
            .post(url)
            .json(&request.body)
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        let status = response.status().as_u16();

        // Error bodies are plain text and shown as-is.
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;

        Ok(CommandReply { status, body })
    }
}
