use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. The rendering shell matches on
// these to pick an icon or a retry affordance, never on the message.

/// Stable error code constants.
pub mod error_code {
    pub const NETWORK_FAILURE: &str = "NETWORK_FAILURE";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DECODE_FAILED: &str = "DECODE_FAILED";
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
}

// ── AdminError ──────────────────────────────────────────────────────

/// Unified error type for the admin client core.
///
/// Errors are stored inside reactive state (`FetchState::error`), so the
/// type is `Clone` and carries rendered messages rather than source errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Request never produced a response (DNS, connect, timeout, reset).
    #[error("network: {0}")]
    Network(String),

    /// Non-2xx response not covered by a more specific variant.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Missing or expired credentials. HTTP 401.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed. HTTP 403.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Resource does not exist. HTTP 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected contract.
    #[error("decode: {0}")]
    Decode(String),

    /// Configuration file or argument is invalid.
    #[error("config: {0}")]
    Config(String),
}

impl AdminError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Network(_) => error_code::NETWORK_FAILURE,
            AdminError::Server { .. } => error_code::SERVER_ERROR,
            AdminError::Unauthorized(_) => error_code::UNAUTHENTICATED,
            AdminError::PermissionDenied(_) => error_code::PERMISSION_DENIED,
            AdminError::NotFound(_) => error_code::NOT_FOUND,
            AdminError::Decode(_) => error_code::DECODE_FAILED,
            AdminError::Config(_) => error_code::CONFIG_INVALID,
        }
    }

    /// Map an HTTP status and body to the matching variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => AdminError::Unauthorized(message),
            403 => AdminError::PermissionDenied(message),
            404 => AdminError::NotFound(message),
            _ => AdminError::Server { status, message },
        }
    }

    /// Whether repeating the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AdminError::Network(_) => true,
            AdminError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_mapping() {
        assert_eq!(AdminError::Network("x".into()).error_code(), "NETWORK_FAILURE");
        assert_eq!(
            AdminError::Server { status: 500, message: "x".into() }.error_code(),
            "SERVER_ERROR"
        );
        assert_eq!(AdminError::Unauthorized("x".into()).error_code(), "UNAUTHENTICATED");
        assert_eq!(AdminError::PermissionDenied("x".into()).error_code(), "PERMISSION_DENIED");
        assert_eq!(AdminError::NotFound("x".into()).error_code(), "NOT_FOUND");
        assert_eq!(AdminError::Decode("x".into()).error_code(), "DECODE_FAILED");
        assert_eq!(AdminError::Config("x".into()).error_code(), "CONFIG_INVALID");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(AdminError::from_status(401, "t"), AdminError::Unauthorized(_)));
        assert!(matches!(AdminError::from_status(403, "t"), AdminError::PermissionDenied(_)));
        assert!(matches!(AdminError::from_status(404, "t"), AdminError::NotFound(_)));
        assert_eq!(
            AdminError::from_status(422, "bad phone"),
            AdminError::Server { status: 422, message: "bad phone".into() }
        );
    }

    #[test]
    fn retryable_only_for_transport_and_5xx() {
        assert!(AdminError::Network("reset".into()).is_retryable());
        assert!(AdminError::from_status(503, "").is_retryable());
        assert!(!AdminError::from_status(400, "").is_retryable());
        assert!(!AdminError::Unauthorized("".into()).is_retryable());
    }

    #[test]
    fn display_includes_context() {
        assert_eq!(
            AdminError::from_status(500, "boom").to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(AdminError::Network("timed out".into()).to_string(), "network: timed out");
    }

    #[test]
    fn json_error_becomes_decode() {
        let err: AdminError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert_eq!(err.error_code(), "DECODE_FAILED");
    }
}
