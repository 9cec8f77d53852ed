//! Authenticate use case
//!
//! Exchanges a username/password pair for a bearer token.

use spoiler_domain::request::{RequestBody, RequestSpec};
use spoiler_domain::{AuthResponse, Credentials};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::HttpClient;

/// Login endpoint. Called without credentials.
pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";

/// Use case for logging in.
pub struct Authenticate<'a, C: HttpClient> {
    client: &'a C,
}

impl<'a, C: HttpClient> Authenticate<'a, C> {
    /// Creates a new `Authenticate` use case with the given HTTP client.
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Logs in and returns the issued access token.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Http` if the call fails in transit, and
    /// `ApplicationError::Authentication` if the service rejects the
    /// credentials or answers without a usable token.
    pub async fn execute(&self, credentials: &Credentials) -> ApplicationResult<String> {
        let request = RequestSpec::post("Authenticate", AUTHENTICATION_PATH)
            .with_body(RequestBody::json_value(credentials)?);

        tracing::info!(user = %credentials.user_name, "authenticating");
        let response = self.client.execute(&request).await?;

        if !response.is_success() {
            return Err(ApplicationError::Authentication(format!(
                "login returned {}",
                response.status_code()
            )));
        }

        let body = AuthResponse::from_body(&response.body)
            .map_err(|e| ApplicationError::Authentication(e.to_string()))?;
        let token = body
            .token()
            .map_err(|e| ApplicationError::Authentication(e.to_string()))?;

        Ok(token.to_string())
    }
}
