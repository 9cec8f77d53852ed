//! Authentication types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Authentication configuration for a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,
    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Returns true if authentication is configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Creates a bearer token authentication.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the `Authorization` header value, if any.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Bearer { token } => Some(format!("Bearer {token}")),
        }
    }
}

/// Login body for `POST /api/User/Authentication`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account name
    pub user_name: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Creates a new credentials pair.
    #[must_use]
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Issued JWT, absent when the login was rejected
    #[serde(default)]
    pub access_token: Option<String>,
}

impl AuthResponse {
    /// Parses a login response body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedBody` if the body is not a JSON object.
    pub fn from_body(body: &str) -> DomainResult<Self> {
        serde_json::from_str(body).map_err(|e| DomainError::MalformedBody(e.to_string()))
    }

    /// Returns the access token, rejecting an absent or blank one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` when no usable token was issued.
    pub fn token(&self) -> DomainResult<&str> {
        self.access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(DomainError::MissingField("accessToken"))
    }
}
