//! Error types for the CRM employment sync.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when interacting with the CRM API.
#[derive(Error, Debug)]
pub enum CrmApiError {
    /// HTTP transport failed (connection refused, DNS, TLS, ...)
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// API answered with a status outside the operation's success set
    #[error("Unexpected status {status} from {operation}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded and retries exhausted
    #[error("Rate limit exceeded (retry after {retry_after:?}s)")]
    RateLimitExceeded { retry_after: Option<u64> },

    /// Input rejected before any request was sent
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Contact already exists but its ID could not be recovered
    #[error("Conflict reported but existing record ID could not be recovered: {0}")]
    ConflictUnresolved(String),

    /// Association label reported as existing but missing from the label list
    #[error("Association label '{0}' exists but its type ID was not found")]
    LabelNotFound(String),

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with CrmApiError
pub type CrmApiResult<T> = Result<T, CrmApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrmApiError::NotFound("contact".to_string());
        assert_eq!(err.to_string(), "Resource not found: contact");

        let err = ConfigError::MissingVar("HUBSPOT_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: HUBSPOT_KEY"
        );

        let err = CrmApiError::LabelNotFound("Employee".to_string());
        assert_eq!(
            err.to_string(),
            "Association label 'Employee' exists but its type ID was not found"
        );
    }

    #[test]
    fn test_api_error_variants() {
        let err = CrmApiError::ApiError {
            status: 409,
            message: "Contact already exists".to_string(),
        };
        assert!(err.to_string().contains("409"));
        assert!(err.to_string().contains("already exists"));

        let err = CrmApiError::UnexpectedStatus {
            operation: "create contact",
            status: 200,
            body: "{}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 200 from create contact: {}"
        );
    }

    #[test]
    fn test_validation_error_converts() {
        let err: CrmApiError = ValidationError::EmptyField("email").into();
        assert!(matches!(err, CrmApiError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid input: 'email' must be provided");
    }
}
