//! Authentication endpoints.

use jobboard_models::{
    ApiResponse, AuthPayload, ForgotPasswordRequest, LoginRequest, OtpVerifyRequest,
    RegisterRequest, ResetPasswordRequest,
};

use super::{into_envelope, into_unit_envelope};
use crate::client::ApiClient;

/// Raw authentication calls. Session bookkeeping lives with the caller.
#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResponse<AuthPayload> {
        let op = "login";
        into_envelope(op, self.client.post_json(op, "/auth/login", request).await)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResponse<AuthPayload> {
        let op = "register";
        into_envelope(op, self.client.post_json(op, "/auth/register", request).await)
    }

    pub async fn verify_otp(&self, request: &OtpVerifyRequest) -> ApiResponse<AuthPayload> {
        let op = "verify_otp";
        into_envelope(op, self.client.post_json(op, "/auth/verify-otp", request).await)
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> ApiResponse<()> {
        let op = "forgot_password";
        into_unit_envelope(op, self.client.post_json(op, "/auth/forgot-password", request).await)
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResponse<()> {
        let op = "reset_password";
        into_unit_envelope(op, self.client.post_json(op, "/auth/reset-password", request).await)
    }
}
