//! Authentication request and response payloads.
//!
//! Sessions themselves are cookie-based; these types only cover the JSON
//! bodies exchanged with the `auth/` endpoints.

use serde::{Deserialize, Serialize};

/// Body for `POST {base}/auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plaintext password (the transport is expected to be TLS).
    pub password: String,
}

/// Body for `POST {base}/auth/register/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired account name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Successful login response. The server may attach further fields; only
/// the display name is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Display name of the authenticated user.
    pub username: String,
}

/// Error payload returned by the backend on a failed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message, surfaced to the user verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
