//! Authenticated session and per-run fixture state.

use std::fmt;

use spoiler_domain::request::RequestSpec;
use spoiler_domain::response::ResponseSpec;
use spoiler_domain::{AuthConfig, StoryId};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{HttpClient, HttpClientError};

/// An HTTP client bound to a bearer token.
///
/// Created once per run after login and consumed by [`Session::close`].
/// Every request sent through the session carries the token unless the
/// request already names its own authentication.
pub struct Session<C: HttpClient> {
    client: C,
    auth: AuthConfig,
}

impl<C: HttpClient> Session<C> {
    /// Binds `client` to `token`.
    pub fn open(client: C, token: impl Into<String>) -> Self {
        tracing::info!("session opened");
        Self {
            client,
            auth: AuthConfig::bearer(token),
        }
    }

    /// Sends a request with the session's bearer credential attached.
    ///
    /// # Errors
    ///
    /// Returns the transport error if no response was received.
    pub async fn send(&self, mut request: RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        if !request.auth.is_configured() {
            request.auth = self.auth.clone();
        }
        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.client.execute(&request).await?;
        tracing::debug!(
            status = response.status,
            duration = %response.duration_display(),
            "received response"
        );
        Ok(response)
    }

    /// Releases the underlying client and its connections.
    pub fn close(self) {
        drop(self.client);
        tracing::info!("session closed");
    }
}

impl<C: HttpClient> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth", &"Bearer <redacted>")
            .finish_non_exhaustive()
    }
}

/// Mutable state shared by the ordered cases of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureState {
    story_id: Option<StoryId>,
}

impl FixtureState {
    /// Creates empty fixture state.
    #[must_use]
    pub const fn new() -> Self {
        Self { story_id: None }
    }

    /// Records the identifier of the most recently created story.
    pub fn record_story(&mut self, id: StoryId) {
        self.story_id = Some(id);
    }

    /// Returns the recorded story identifier.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::MissingFixture` if no story was created yet.
    pub fn story_id(&self) -> ApplicationResult<&StoryId> {
        self.story_id
            .as_ref()
            .ok_or(ApplicationError::MissingFixture("story id"))
    }
}
