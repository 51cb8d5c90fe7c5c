//! Feature services.
//!
//! Each service method returns an [`ApiResponse`] and never an error: HTTP
//! failures, network failures and malformed bodies all become a failed
//! envelope whose message is the server's or the generic fallback.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod jobs;
pub mod profile;

pub use admin::AdminService;
pub use applications::ApplicationService;
pub use auth::AuthApi;
pub use jobs::JobService;
pub use profile::ProfileService;

use jobboard_models::ApiResponse;
use serde::de::IgnoredAny;
use tracing::warn;

use crate::error::ClientResult;

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }

    pub fn previous(&self) -> Self {
        Self::new(self.page.saturating_sub(1), self.size)
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

/// Fold a client result into the envelope every caller consumes.
pub(crate) fn into_envelope<T>(
    operation: &str,
    result: ClientResult<ApiResponse<T>>,
) -> ApiResponse<T> {
    match result {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(operation = %operation, status = ?e.http_status(), "API call failed: {}", e);
            ApiResponse::failure(e.user_message())
        }
    }
}

/// Same as [`into_envelope`] for calls whose payload is ignored.
pub(crate) fn into_unit_envelope(
    operation: &str,
    result: ClientResult<ApiResponse<IgnoredAny>>,
) -> ApiResponse<()> {
    into_envelope(operation, result.map(|envelope| envelope.map(|_| ())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use jobboard_models::GENERIC_FAILURE_MESSAGE;

    #[test]
    fn test_page_request_query() {
        let page = PageRequest::new(2, 20);
        assert_eq!(
            page.query(),
            vec![("page", "2".to_string()), ("size", "20".to_string())]
        );
        assert_eq!(page.next().page, 3);
        assert_eq!(PageRequest::first(10).previous().page, 0);
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_into_envelope_uses_server_message() {
        let envelope: ApiResponse<u32> = into_envelope(
            "op",
            Err(ClientError::from_http_status(409, "Email already registered")),
        );
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error_message(), "Email already registered");
    }

    #[test]
    fn test_into_envelope_generic_fallback() {
        let envelope: ApiResponse<u32> =
            into_envelope("op", Err(ClientError::from_http_status(500, "")));
        assert_eq!(envelope.message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_into_envelope_passes_success_through() {
        let envelope = into_envelope("op", Ok(ApiResponse::ok(7u32)));
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(7));
    }
}
