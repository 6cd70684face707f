//! Error types for the forge client.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for forge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Error kinds for categorizing forge errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgeErrorKind {
    // Configuration errors
    /// Invalid client configuration.
    InvalidConfiguration,
    /// Invalid caller-supplied parameter (e.g. a zero page size).
    InvalidParameter,
    /// A guarded operation was invoked without its capability enabled.
    CapabilityDisabled,

    // Credential and permission errors
    /// Credentials missing or rejected (401).
    Unauthorized,
    /// Authenticated but not permitted (403).
    Forbidden,

    // Request errors
    /// The server rejected the request parameters (400/422).
    ValidationFailed,

    // Resource errors
    /// Resource or page does not exist server-side (404/410).
    NotFound,
    /// Resource state conflict (409).
    Conflict,

    // Quota errors
    /// The server declined the request due to quota (429, or 403 with an
    /// exhausted rate-limit window).
    RateLimited,

    // Transport errors
    /// Connection could not be established.
    ConnectionFailed,
    /// Request timed out.
    Timeout,

    // Server errors
    /// Server-side failure (5xx).
    ServerError,
    /// Any other non-success status.
    ApiError,

    // Response errors
    /// Failed to deserialize a response body.
    Deserialization,

    // Webhook errors
    /// Webhook signature did not match the payload.
    SignatureInvalid,
    /// Webhook payload or signature header was malformed.
    PayloadInvalid,
}

impl ForgeErrorKind {
    /// Maps an HTTP status code to an error kind.
    ///
    /// 403 maps to [`Forbidden`](Self::Forbidden); callers that can see the
    /// rate-limit headers upgrade an exhausted 403 to
    /// [`RateLimited`](Self::RateLimited).
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::ValidationFailed,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 | 410 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::ApiError,
        }
    }
}

impl fmt::Display for ForgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration => write!(f, "invalid_configuration"),
            Self::InvalidParameter => write!(f, "invalid_parameter"),
            Self::CapabilityDisabled => write!(f, "capability_disabled"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::ServerError => write!(f, "server_error"),
            Self::ApiError => write!(f, "api_error"),
            Self::Deserialization => write!(f, "deserialization"),
            Self::SignatureInvalid => write!(f, "signature_invalid"),
            Self::PayloadInvalid => write!(f, "payload_invalid"),
        }
    }
}

/// Rate limit information extracted from response headers.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Time when the window resets.
    pub reset_at: DateTime<Utc>,
    /// Retry-After header value in seconds (if present).
    pub retry_after: Option<u64>,
    /// Resource category the limit applies to.
    pub resource: Option<String>,
}

/// Per-field violation reported by the server on a validation failure.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    /// Resource the violation applies to.
    pub resource: Option<String>,
    /// Offending field.
    pub field: Option<String>,
    /// Server violation code (e.g. `missing_field`).
    pub code: Option<String>,
    /// Human-readable detail.
    pub message: Option<String>,
}

/// Forge API error with detailed information.
#[derive(Error, Debug)]
pub struct ForgeError {
    /// Error kind.
    kind: ForgeErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// Server request ID.
    request_id: Option<String>,
    /// Documentation URL.
    documentation_url: Option<String>,
    /// Per-field violations on validation failures.
    field_errors: Vec<FieldError>,
    /// Rate limit info (if applicable).
    rate_limit: Option<RateLimitInfo>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        if let Some(ref id) = self.request_id {
            write!(f, " [request_id: {}]", id)?;
        }
        Ok(())
    }
}

impl ForgeError {
    /// Creates a new forge error.
    pub fn new(kind: ForgeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            request_id: None,
            documentation_url: None,
            field_errors: Vec::new(),
            rate_limit: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the server request ID.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Sets the documentation URL.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Sets the per-field violation list.
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.field_errors = errors;
        self
    }

    /// Sets the rate limit info.
    pub fn with_rate_limit(mut self, info: RateLimitInfo) -> Self {
        self.rate_limit = Some(info);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> ForgeErrorKind {
        self.kind
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the request ID.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Gets the documentation URL.
    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Gets the per-field violations (empty unless the server supplied them).
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Gets the rate limit info.
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        self.rate_limit.as_ref()
    }

    /// Returns seconds until the rate-limit window permits another request.
    pub fn retry_after(&self) -> Option<u64> {
        let info = self.rate_limit.as_ref()?;
        info.retry_after.or_else(|| {
            let now = Utc::now();
            if info.reset_at > now {
                Some((info.reset_at - now).num_seconds() as u64)
            } else {
                None
            }
        })
    }

    /// Returns true for [`ForgeErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.kind == ForgeErrorKind::NotFound
    }

    /// Returns true for [`ForgeErrorKind::RateLimited`].
    pub fn is_rate_limited(&self) -> bool {
        self.kind == ForgeErrorKind::RateLimited
    }

    /// Creates an error from an HTTP status code and server error body.
    pub fn from_response(
        status: u16,
        message: String,
        documentation_url: Option<String>,
        request_id: Option<String>,
    ) -> Self {
        let kind = ForgeErrorKind::from_status(status);
        let mut error = Self::new(kind, message).with_status(status);

        if let Some(url) = documentation_url {
            error = error.with_documentation_url(url);
        }
        if let Some(id) = request_id {
            error = error.with_request_id(id);
        }

        error
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::InvalidConfiguration, message)
    }

    /// Creates an invalid-parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::InvalidParameter, message)
    }

    /// Creates a capability-disabled error naming the missing capability.
    pub fn capability_disabled(capability: &str) -> Self {
        Self::new(
            ForgeErrorKind::CapabilityDisabled,
            format!("capability '{}' is not enabled on this client", capability),
        )
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::NotFound, message).with_status(404)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(info: RateLimitInfo) -> Self {
        Self::new(ForgeErrorKind::RateLimited, "Rate limit exceeded")
            .with_status(403)
            .with_rate_limit(info)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::Timeout, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::Deserialization, message)
    }

    /// Creates a webhook signature mismatch error.
    pub fn signature_invalid(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::SignatureInvalid, message)
    }

    /// Creates a malformed webhook payload/header error.
    pub fn payload_invalid(message: impl Into<String>) -> Self {
        Self::new(ForgeErrorKind::PayloadInvalid, message)
    }
}

impl From<reqwest::Error> for ForgeError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ForgeErrorKind::Timeout
        } else if err.is_connect() {
            ForgeErrorKind::ConnectionFailed
        } else if err.is_decode() {
            ForgeErrorKind::Deserialization
        } else {
            ForgeErrorKind::ConnectionFailed
        };
        ForgeError::new(kind, err.to_string()).with_cause(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let error = ForgeError::new(ForgeErrorKind::NotFound, "Repository not found")
            .with_status(404)
            .with_request_id("abc123");

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("Repository not found"));
        assert!(display.contains("404"));
        assert!(display.contains("abc123"));
    }

    #[test_case(400, ForgeErrorKind::ValidationFailed)]
    #[test_case(401, ForgeErrorKind::Unauthorized)]
    #[test_case(403, ForgeErrorKind::Forbidden)]
    #[test_case(404, ForgeErrorKind::NotFound)]
    #[test_case(409, ForgeErrorKind::Conflict)]
    #[test_case(422, ForgeErrorKind::ValidationFailed)]
    #[test_case(429, ForgeErrorKind::RateLimited)]
    #[test_case(500, ForgeErrorKind::ServerError)]
    #[test_case(503, ForgeErrorKind::ServerError)]
    #[test_case(418, ForgeErrorKind::ApiError)]
    fn test_kind_from_status(status: u16, expected: ForgeErrorKind) {
        assert_eq!(ForgeErrorKind::from_status(status), expected);
    }

    #[test]
    fn test_from_response() {
        let error = ForgeError::from_response(
            404,
            "Not Found".to_string(),
            Some("https://docs.example.test/rest".to_string()),
            Some("req-123".to_string()),
        );

        assert_eq!(error.kind(), ForgeErrorKind::NotFound);
        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(
            error.documentation_url(),
            Some("https://docs.example.test/rest")
        );
        assert_eq!(error.request_id(), Some("req-123"));
    }

    #[test]
    fn test_rate_limited_retry_after() {
        let info = RateLimitInfo {
            limit: 5000,
            remaining: 0,
            reset_at: Utc::now() + chrono::Duration::seconds(90),
            retry_after: None,
            resource: Some("core".to_string()),
        };
        let error = ForgeError::rate_limited(info);

        assert!(error.is_rate_limited());
        let wait = error.retry_after().unwrap();
        assert!(wait > 0 && wait <= 90);
    }

    #[test]
    fn test_field_errors_carried() {
        let error = ForgeError::new(ForgeErrorKind::ValidationFailed, "Validation Failed")
            .with_status(422)
            .with_field_errors(vec![FieldError {
                resource: Some("Issue".to_string()),
                field: Some("title".to_string()),
                code: Some("missing_field".to_string()),
                message: None,
            }]);

        assert_eq!(error.field_errors().len(), 1);
        assert_eq!(error.field_errors()[0].field.as_deref(), Some("title"));
    }
}
