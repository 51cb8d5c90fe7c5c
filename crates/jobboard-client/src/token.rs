//! Source of the bearer token attached to outgoing requests.

/// Supplies the current bearer token, if any.
///
/// Implemented by the session store so the client always sends the token of
/// the active session without holding its own copy.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Provider for anonymous calls (login, register, public job lists).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Provider that always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
