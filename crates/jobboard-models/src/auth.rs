//! Authentication request and response DTOs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};
use crate::{Role, RoleParseError, UserId, UserSummary};

/// Body of the login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require(&self.email, "Email")?;
        validation::require(&self.password, "Password")
    }
}

/// Body of the verify-otp call that completes a two-factor login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    pub email: String,
    pub otp_code: String,
}

impl OtpVerifyRequest {
    pub fn new(email: impl Into<String>, otp_code: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            otp_code: otp_code.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require(&self.email, "Email")?;
        validation::otp_code(&self.otp_code)
    }
}

/// Body of the register call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::length_between(&self.first_name, "First name", 2, 50)?;
        validation::length_between(&self.last_name, "Last name", 2, 50)?;
        validation::email(&self.email)?;
        validation::password(&self.password)
    }
}

/// Registration form as filled in by the user, including the confirmation
/// field that is checked locally and never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegisterForm {
    /// Check the form and produce the request body.
    pub fn into_request(self) -> Result<RegisterRequest, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let request = RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            role: self.role,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Body of the forgot-password call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::email(&self.email)
    }
}

/// Body of the reset-password call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.trim().is_empty() {
            return Err(ValidationError::MissingResetToken);
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        validation::password(&self.new_password)
    }
}

/// `data` of a login, register or verify-otp response.
///
/// The token is absent when a second factor or an admin approval is still
/// required; the role stays a raw string until [`AuthPayload::user_summary`]
/// checks it against the closed [`Role`] set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "requires2FA")]
    pub requires_two_factor: bool,
    #[serde(default)]
    pub requires_approval: bool,
}

impl AuthPayload {
    /// Token, if one was issued and is non-blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn user_summary(&self) -> Result<UserSummary, RoleParseError> {
        let role = self
            .role
            .as_deref()
            .ok_or_else(|| RoleParseError(String::new()))?
            .parse()?;
        Ok(UserSummary {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            role,
        })
    }
}
