//! Request specification type

use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::auth::AuthConfig;
use crate::error::{DomainError, DomainResult};

/// Complete specification for an HTTP request against the service.
///
/// `path` is relative to the service base URL; the HTTP adapter resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// Human-readable name, used in logs and reports
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL (e.g. "/api/Story/All")
    pub path: String,
    /// HTTP headers
    pub headers: Headers,
    /// Request body
    pub body: RequestBody,
    /// Authentication override; `None` defers to the client's session
    pub auth: AuthConfig,
}

impl RequestSpec {
    /// Creates a request with the given method and path and no body.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.add(Header::new("Accept", "application/json"));
        Self {
            name: name.into(),
            method,
            path: path.into(),
            headers,
            body: RequestBody::none(),
            auth: AuthConfig::default(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, HttpMethod::Delete, path)
    }

    /// Sets the request body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the authentication (builder pattern).
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Resolves the request path against a base URL.
    ///
    /// The path is appended below the base's own path, so a base of
    /// `https://host/spoiler` yields `https://host/spoiler/api/...`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined onto the base.
    pub fn resolve_url(&self, base: &Url) -> DomainResult<Url> {
        let mut root = base.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        root.join(self.path.trim_start_matches('/'))
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.path)))
    }
}
