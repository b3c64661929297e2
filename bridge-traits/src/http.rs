//! HTTP Client Abstraction
//!
//! Provides async HTTP operations. Token injection happens at the call site;
//! retry, TLS and connection pooling are the implementation's concern.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

/// HTTP method types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.into()))
    }

    /// Append percent-encoded query parameters to the URL.
    ///
    /// Uses `&` when the URL already carries a query string.
    pub fn query<K, V>(mut self, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            let separator = if self.url.contains('?') { '&' } else { '?' };
            self.url.push(separator);
            self.url.push_str(&urlencoding::encode(key.as_ref()));
            self.url.push('=');
            self.url.push_str(&urlencoding::encode(value.as_ref()));
        }
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Look up a header by name, ignoring ASCII case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Base delay between retries
    pub base_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Whether to use exponential backoff
    pub use_exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            use_exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before the given retry (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        if self.use_exponential_backoff {
            let factor = 2u32.saturating_pow(retry.saturating_sub(1));
            self.base_delay.saturating_mul(factor).min(self.max_delay)
        } else {
            self.base_delay
        }
    }
}

/// Async HTTP client trait
///
/// This trait abstracts HTTP operations to allow platform-specific implementations.
/// Implementations should handle:
/// - Automatic retry with exponential backoff
/// - TLS certificate validation
/// - Connection pooling and keep-alive
///
/// Callers never retry on their own; a failed `execute` is final.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest};
///
/// async fn fetch_me(client: &dyn HttpClient, token: &str) -> Result<String> {
///     let request = HttpRequest::get("https://graph.microsoft.com/v1.0/me")
///         .bearer_token(token);
///
///     let response = client.execute(request).await?;
///     Ok(String::from_utf8_lossy(&response.body).into_owned())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Network connection fails
    /// - TLS validation fails
    /// - Request times out
    /// - Maximum retries exceeded
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
