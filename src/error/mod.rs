//! Error types for the Offers SDK.

use thiserror::Error;

/// Boxed error returned by caller-supplied plugins and request hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Primary error type for all SDK operations.
///
/// Status-derived variants (401, 404, ...) are raised only after the
/// transport's 401-refresh-retry dance has already run; a surviving
/// `Authentication` error means authentication truly failed.
#[derive(Error, Debug)]
pub enum OffersError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication is not configured: {0}")]
    AuthConfig(String),

    #[error("authentication request failed: {0}")]
    AuthRequest(String),

    #[error("plugin {name} failed: {message}")]
    Plugin { name: String, message: String },

    #[error("request hook {name} failed: {message}")]
    Hook { name: String, message: String },

    #[error("request execution failed: {0}")]
    Execution(String),

    #[error("unauthorized: {0}")]
    Authentication(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response payload: {0}")]
    InvalidResponse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl OffersError {
    /// HTTP status code this error was derived from, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::Timeout(_) => Some(408),
            Self::Conflict(_) => Some(409),
            Self::RateLimited(_) => Some(429),
            Self::Server { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "SDK_CONFIG_ERROR",
            Self::AuthConfig(_) => "AUTH_CONFIG_ERROR",
            Self::AuthRequest(_) => "AUTH_REQUEST",
            Self::Plugin { .. } => "PLUGIN_ERROR",
            Self::Hook { .. } => "HOOK_ERROR",
            Self::Execution(_) => "REQUEST_EXECUTION",
            Self::Authentication(_) => "AUTH_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Timeout(_) => "TIMEOUT",
            Self::Conflict(_) => "CONFLICT",
            Self::RateLimited(_) => "RATE_LIMIT",
            Self::Server { .. } => "SERVER_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::InvalidResponse(_) => "INVALID_RESPONSE",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
        }
    }

    /// Whether the transport retry policy may retry this failure.
    ///
    /// Only transport-level execution failures are transient; HTTP error
    /// statuses, plugin/hook failures, and auth failures propagate on first
    /// occurrence.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, OffersError>;
