//! JobBoard REST API client.
//!
//! Every call:
//! - attaches the active session's bearer token and a request id
//! - runs inside an `api_request` tracing span
//! - records request metrics
//! - turns a 2xx body into a successful envelope and anything else into a
//!   [`ClientError`] carrying the server's message
//!
//! Nothing is retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jobboard_models::ApiResponse;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::metrics::record_request;
use crate::token::{NoToken, TokenProvider};

/// Header carrying the per-call request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// JobBoard REST API client.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a new client that reads bearer tokens from `tokens`.
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenProvider>) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("API base URL cannot be empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("jobboard-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Create a client that never sends a bearer token.
    pub fn anonymous(config: ClientConfig) -> ClientResult<Self> {
        Self::new(config, Arc::new(NoToken))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<ApiResponse<T>> {
        let builder = self.http.get(self.url(path)).query(query);
        self.execute(operation, Method::GET, path, builder).await
    }

    pub async fn post_json<B, T>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.post(self.url(path)).json(body);
        self.execute(operation, Method::POST, path, builder).await
    }

    /// POST without a body (toggle endpoints).
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> ClientResult<ApiResponse<T>> {
        let builder = self.http.post(self.url(path));
        self.execute(operation, Method::POST, path, builder).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        form: Form,
    ) -> ClientResult<ApiResponse<T>> {
        let builder = self.http.post(self.url(path)).multipart(form);
        self.execute(operation, Method::POST, path, builder).await
    }

    pub async fn put_json<B, T>(
        &self,
        operation: &str,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.http.put(self.url(path)).json(body);
        self.execute(operation, Method::PUT, path, builder).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<ApiResponse<T>> {
        let builder = self.http.patch(self.url(path)).query(query);
        self.execute(operation, Method::PATCH, path, builder).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
    ) -> ClientResult<ApiResponse<T>> {
        let builder = self.http.delete(self.url(path));
        self.execute(operation, Method::DELETE, path, builder).await
    }

    // =========================================================================
    // Execution
    // =========================================================================

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> ClientResult<ApiResponse<T>> {
        let request_id = Uuid::new_v4().to_string();
        let mut builder = builder.header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = self.tokens.bearer_token() {
            builder = builder.bearer_auth(token);
        }

        let span = info_span!(
            "api_request",
            operation = %operation,
            method = %method,
            path = %path,
            request_id = %request_id
        );

        let start = Instant::now();
        let result = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            debug!(status = status.as_u16(), bytes = body.len(), "API response received");

            if status.is_success() {
                parse_success(&body)
            } else {
                Err(ClientError::from_http_status(status.as_u16(), error_message(&body)))
            }
        }
        .instrument(span)
        .await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(0),
        };
        record_request(operation, status, latency_ms);

        result
    }
}

/// A 2xx body is always a successful envelope, whatever flag it carries.
fn parse_success<T: DeserializeOwned>(body: &[u8]) -> ClientResult<ApiResponse<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiResponse::ok_empty(None));
    }
    let mut envelope: ApiResponse<T> = serde_json::from_slice(body)?;
    envelope.success = true;
    Ok(envelope)
}

/// Server-provided message of an error body, or empty.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ApiResponse<IgnoredAny>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_forces_flag() {
        let envelope: ApiResponse<u32> =
            parse_success(br#"{"success":false,"data":5,"message":"m"}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(5));
    }

    #[test]
    fn test_parse_success_empty_body() {
        let envelope: ApiResponse<u32> = parse_success(b"  ").unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(br#"{"success":false,"message":"Invalid credentials","data":{"x":1}}"#),
            "Invalid credentials"
        );
        assert_eq!(error_message(b"<html>502</html>"), "");
        assert_eq!(error_message(b""), "");
    }

    #[test]
    fn test_url_joining() {
        let config = ClientConfig::with_base_url("http://api.test/api/");
        let client = ApiClient::anonymous(config).unwrap();
        assert_eq!(client.url("/jobs/open"), "http://api.test/api/jobs/open");
        assert_eq!(client.url("jobs"), "http://api.test/api/jobs");
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let config = ClientConfig {
            base_url: String::new(),
            ..ClientConfig::default()
        };
        assert!(matches!(ApiClient::anonymous(config), Err(ClientError::Config(_))));
    }
}
