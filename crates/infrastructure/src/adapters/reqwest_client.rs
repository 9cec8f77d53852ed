//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It resolves request paths against the service base URL and turns the
//! request's `AuthConfig` into an `Authorization` header.

use std::time::{Duration, Instant};

use reqwest::{Client, Method};
use spoiler_application::ports::{HttpClient, HttpClientError, HttpFuture};
use spoiler_domain::{
    request::{HttpMethod, RequestBody, RequestSpec},
    response::ResponseSpec,
};
use url::Url;

use crate::config::SuiteConfig;

/// HTTP client implementation using reqwest.
///
/// Owns one connection pool for the lifetime of a run; dropping the client
/// releases it.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "spoiler/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("spoiler/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Creates a client from the suite configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn from_config(config: &SuiteConfig) -> Result<Self, HttpClientError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Builds the request body from domain `RequestBody`.
    fn build_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        if body.is_empty() {
            return Ok(builder);
        }

        if body
            .content_type()
            .is_some_and(|ct| ct.contains("application/json"))
        {
            let _: serde_json::Value = serde_json::from_str(&body.content)
                .map_err(|e| HttpClientError::InvalidBody(format!("Invalid JSON: {e}")))?;
        }
        Ok(builder.body(body.content.clone()))
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    #[allow(clippy::cast_possible_truncation)]
    fn map_error(error: &reqwest::Error, timeout: Duration) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            };
        }

        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(&'a self, request: &'a RequestSpec) -> HttpFuture<'a> {
        Box::pin(async move {
            let url = request
                .resolve_url(&self.base_url)
                .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

            let start = Instant::now();

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url)
                .timeout(self.timeout);

            for header in request.headers.iter() {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(value) = request.auth.header_value() {
                builder = builder.header(reqwest::header::AUTHORIZATION, value);
            }

            if let Some(content_type) = request.body.content_type()
                && !request.headers.contains("content-type")
            {
                builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
            }

            builder = Self::build_body(builder, &request.body)?;

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, self.timeout))?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?
                .to_vec();

            Ok(ResponseSpec::new(status, body, duration))
        })
    }
}
