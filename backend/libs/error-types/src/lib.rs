/// Shared error envelope for the portfolio backend
use serde::{Deserialize, Serialize};

/// JSON error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP reason phrase, e.g. "Not Found"
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// HTTP status code
    pub status: u16,

    /// Error category used by clients for routing, see [`error_types`]
    #[serde(rename = "type")]
    pub error_type: String,

    /// Stable machine code, see [`error_codes`]
    pub code: String,

    /// ISO 8601 timestamp
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub mod error_codes {
    // Accounts
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ADMIN_REQUIRED: &str = "ADMIN_REQUIRED";

    // Content and media
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const RESOURCE_CONFLICT: &str = "RESOURCE_CONFLICT";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

    // System
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

pub mod error_types {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const AUTHENTICATION_ERROR: &str = "authentication_error";
    pub const AUTHORIZATION_ERROR: &str = "authorization_error";
    pub const NOT_FOUND_ERROR: &str = "not_found_error";
    pub const CONFLICT_ERROR: &str = "conflict_error";
    pub const SERVER_ERROR: &str = "server_error";
}
