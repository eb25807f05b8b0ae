//! HTTP client for the Scientia timetable API.

pub mod categories;
pub mod source;
pub mod timetables;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use timetable_core::retry::RetryPolicy;
use uuid::Uuid;

use crate::error::{ClientError, Result};

/// Public API root of the hosted Scientia instance.
pub const DEFAULT_BASE_URL: &str = "https://scientia-eu-v4-api-d1-03.azurewebsites.net/api/Public";

/// Institution identity of Dublin City University.
pub const DEFAULT_INSTITUTION_ID: Uuid = Uuid::from_u128(0xa1fdee6b_68eb_47b8_b2ac_a4c60c8e6177);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`ScientiaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub institution_id: Uuid,
    pub retry_policy: RetryPolicy,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            institution_id: DEFAULT_INSTITUTION_ID,
            retry_policy: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the Scientia timetable API.
#[derive(Debug, Clone)]
pub struct ScientiaClient {
    client: reqwest::Client,
    base_url: String,
    institution_id: Uuid,
    retry_policy: RetryPolicy,
}

impl ScientiaClient {
    /// Create a new client from the given settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Anonymous"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("TimetableSync/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            institution_id: config.institution_id,
            retry_policy: config.retry_policy,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the institution identity requests are scoped to.
    pub fn institution_id(&self) -> Uuid {
        self.institution_id
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one POST request, retrying failures per the retry policy.
    ///
    /// Returns the parsed JSON body of the first successful response. After
    /// the final failed attempt the last error is returned.
    pub async fn send(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.url(path);
        let mut retry = 0u32;

        loop {
            let error = match self.send_once(&url, params, body).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let status = error.status();
            if !error.is_transient() {
                return Err(error);
            }
            if retry >= self.retry_policy.max_retries || !self.retry_policy.should_retry(status) {
                tracing::error!(
                    path,
                    status,
                    attempts = retry + 1,
                    error = %error,
                    "Upstream request failed"
                );
                return Err(error);
            }

            retry += 1;
            let delay = self.retry_policy.delay_for(retry);
            tracing::warn!(
                path,
                status,
                retry,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Upstream request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn send_once(
        &self,
        url: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!(url, "Sending upstream request");

        let mut request = self.client.post(url).query(params);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle error responses.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(ClientError::from)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}
