//! Third-party API abstractions and implementations.
//!
//! Handlers only see the traits below; startup wires the real HTTP providers
//! and tests wire the mocks.

pub mod mock;
pub mod openai;
pub mod unsplash;
pub mod youtube;

use crate::models::ChatMessage;
use crate::services::metrics::record_upstream_call;
use async_trait::async_trait;
use reqwest::Client;
use service_core::error::AppError;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::InvalidResponse(_) => "invalid_response",
            ProviderError::EmptyCompletion => "empty_completion",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::NetworkError(_) => "network_error",
        }
    }

    /// URLs are stripped: some providers carry their key in the query string.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }

    pub(crate) fn from_decode(err: reqwest::Error) -> Self {
        ProviderError::InvalidResponse(format!(
            "Failed to parse response: {}",
            err.without_url()
        ))
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => AppError::ServiceUnavailable,
            ProviderError::Timeout(msg) => AppError::GatewayTimeout(msg),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// Sampling knobs for a completion call. `None` leaves the service default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionParams {
    pub temperature: Option<f32>,
}

impl CompletionParams {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
        }
    }
}

/// Chat-completion service (e.g. OpenAI).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send the full role-tagged conversation and return the reply text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, ProviderError>;
}

/// Image search (e.g. Unsplash).
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    /// URL of the first matching image, `None` when the search is empty.
    async fn first_image_url(&self, topic: &str) -> Result<Option<String>, ProviderError>;
}

/// Video search (e.g. YouTube Data API).
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Watch URL of the first matching video, `None` when the search is empty.
    async fn first_video_url(&self, topic: &str) -> Result<Option<String>, ProviderError>;
}

/// The single outbound HTTP client shared by every provider.
pub fn build_http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bioquest-service/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e)))
}

/// Run one upstream call and record its outcome and latency.
pub(crate) async fn observe<T, F>(provider: &'static str, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    let start = Instant::now();
    let result = call.await;
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    record_upstream_call(provider, outcome, start.elapsed());
    result
}

/// Turn a non-2xx response into a `ProviderError`, keeping the body text.
pub(crate) async fn error_for_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();

    if status.as_u16() == 429 {
        return Err(ProviderError::RateLimited);
    }

    Err(ProviderError::ApiError(format!(
        "{} API error {}: {}",
        provider, status, error_text
    )))
}
