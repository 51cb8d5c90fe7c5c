//! Client-side validation errors.
//!
//! Raised before any request is dispatched and shown inline next to the
//! form that caused them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email should be valid")]
    InvalidEmail,

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("Verification code must be {len} digits")]
    InvalidOtp { len: usize },

    #[error("Invalid or missing reset token. Please request a new password reset.")]
    MissingResetToken,
}

/// Minimum password length accepted by the API.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Length of the emailed two-factor code.
pub const OTP_LENGTH: usize = 6;

pub(crate) fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

pub(crate) fn length_between(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(ValidationError::Required { field });
    }
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

pub(crate) fn at_most(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

pub(crate) fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

pub(crate) fn email(value: &str) -> Result<(), ValidationError> {
    use validator::ValidateEmail;

    require(value, "Email")?;
    if !value.trim().validate_email() {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a six-digit one-time code.
pub fn otp_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidOtp { len: OTP_LENGTH });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_between_counts_trimmed_chars() {
        assert!(length_between("  Al  ", "First name", 2, 50).is_ok());
        assert_eq!(
            length_between("A", "First name", 2, 50),
            Err(ValidationError::Length {
                field: "First name",
                min: 2,
                max: 50
            })
        );
        assert_eq!(
            length_between("   ", "First name", 2, 50),
            Err(ValidationError::Required { field: "First name" })
        );
    }

    #[test]
    fn test_email() {
        assert!(email("ada@example.com").is_ok());
        assert_eq!(email("not-an-email"), Err(ValidationError::InvalidEmail));
        assert_eq!(email(""), Err(ValidationError::Required { field: "Email" }));
    }

    #[test]
    fn test_otp_code() {
        assert!(otp_code("123456").is_ok());
        assert!(otp_code("12345").is_err());
        assert!(otp_code("12a456").is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
    }
}
