//! HTTP Client Implementation using Reqwest

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy},
};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("mediadrive/", env!("CARGO_PKG_VERSION"));

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - Automatic retry with exponential backoff on 429 and 5xx
/// - TLS support by default
pub struct ReqwestHttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn try_new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                BridgeError::NotAvailable(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self::with_client(client))
    }

    /// Create a new HTTP client around a preconfigured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
        }
    }

    /// Convert bridge HttpMethod to reqwest Method
    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
        }
    }

    /// Build reqwest request from bridge request
    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let method = Self::convert_method(request.method);
        let mut req = self.client.request(method, &request.url);

        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        req
    }

    /// Execute request with retry logic
    async fn execute_with_retry(&self, request: HttpRequest) -> Result<HttpResponse> {
        let policy = &self.policy;
        let mut attempt = 0;
        let mut last_error = None;

        while attempt < policy.max_attempts {
            debug!(
                attempt = attempt + 1,
                max_attempts = policy.max_attempts,
                url = %request.url,
                "Executing HTTP request"
            );

            match self.build_request(&request).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if status >= 500 || status == 429 {
                        warn!(
                            status = status,
                            attempt = attempt + 1,
                            "HTTP request failed with retryable status"
                        );
                        last_error = Some(BridgeError::OperationFailed(format!(
                            "HTTP {} error",
                            status
                        )));

                        // Final attempt: hand the response to the caller so it can
                        // inspect the status and headers (e.g. Retry-After).
                        if attempt + 1 >= policy.max_attempts {
                            return Self::into_response(response).await;
                        }
                    } else {
                        return Self::into_response(response).await;
                    }
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        attempt = attempt + 1,
                        "HTTP request failed"
                    );

                    if e.is_timeout() {
                        last_error = Some(BridgeError::OperationFailed(
                            "Request timed out".to_string(),
                        ));
                    } else if e.is_connect() {
                        last_error = Some(BridgeError::OperationFailed(format!(
                            "Connection failed: {}",
                            e
                        )));
                    } else {
                        last_error = Some(BridgeError::OperationFailed(e.to_string()));
                    }
                }
            }

            attempt += 1;

            if attempt < policy.max_attempts {
                let delay = policy.delay_for(attempt);
                debug!(delay_ms = delay.as_millis(), "Retrying after delay");
                sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            BridgeError::OperationFailed("All retry attempts exhausted".to_string())
        }))
    }

    async fn into_response(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|s| (k.to_string(), s.to_string())))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| BridgeError::OperationFailed(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.execute_with_retry(request).await
    }
}
