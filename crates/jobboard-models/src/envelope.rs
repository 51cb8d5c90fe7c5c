//! Response envelope and paginated list shape of the remote API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Message shown when a failure carries no server-provided text.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// Uniform `{ success, data, message }` wrapper every response is normalized to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Option::<T>::default", skip_serializing_if = "Option::<T>::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Success without a payload (delete, status toggles).
    pub fn ok_empty(message: Option<String>) -> Self {
        Self {
            success: true,
            data: None,
            message,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// The message to show the user for a failed call.
    pub fn error_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
        }
    }

    /// Convert into a `Result`, using the error message on failure.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error_message().to_string())
        }
    }
}

/// One page of a server-side paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::<T>::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero-based page index; the server may send it as `number`.
    #[serde(default, alias = "number")]
    pub current_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            current_page: 0,
            total_elements: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_fallback() {
        let resp: ApiResponse<()> = ApiResponse {
            success: false,
            data: None,
            message: None,
        };
        assert_eq!(resp.error_message(), GENERIC_FAILURE_MESSAGE);

        let resp: ApiResponse<()> = ApiResponse::failure("Email already registered");
        assert_eq!(resp.error_message(), "Email already registered");

        let resp: ApiResponse<()> = ApiResponse::failure("   ");
        assert_eq!(resp.error_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_page_accepts_server_number_key() {
        let json = r#"{"content":[1,2],"totalPages":3,"number":1,"totalElements":25}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_elements, Some(25));
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_page_navigation_at_index_limit() {
        let page: Page<u32> = Page {
            total_pages: u32::MAX,
            current_page: u32::MAX,
            ..Page::default()
        };
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_envelope_without_data() {
        let resp: ApiResponse<Page<u32>> =
            serde_json::from_str(r#"{"success":true,"message":"User deleted"}"#).unwrap();
        assert!(resp.success);
        assert!(resp.data.is_none());
        assert_eq!(resp.into_result(), Ok(None));
    }
}
