//! Story resource types exchanged with the service.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Body of a create or edit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryPayload {
    /// Story title
    pub title: String,
    /// Story description
    pub description: String,
    /// Optional picture URL; the service accepts an empty string
    pub url: String,
}

impl StoryPayload {
    /// Creates a payload with an empty `url`.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: String::new(),
        }
    }
}

/// Server-assigned identifier of a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryId(String);

impl StoryId {
    /// Wraps a raw identifier, rejecting blank values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if `raw` is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::InvalidIdentifier(
                "story id cannot be empty".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loosely-typed response envelope: `{msg?, storyId?}`.
///
/// Fields are optional on the wire; accessors turn an absent field into a
/// descriptive error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    /// Human-readable outcome message
    #[serde(default)]
    pub msg: Option<String>,
    /// Identifier of the story the call created
    #[serde(default, rename = "storyId")]
    pub story_id: Option<String>,
}

impl ApiResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedBody` if the body is not a JSON object.
    pub fn from_body(body: &str) -> DomainResult<Self> {
        serde_json::from_str(body).map_err(|e| DomainError::MalformedBody(e.to_string()))
    }

    /// Returns the `msg` field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if the field is absent.
    pub fn message(&self) -> DomainResult<&str> {
        self.msg.as_deref().ok_or(DomainError::MissingField("msg"))
    }

    /// Returns the `storyId` field as a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` if absent, or
    /// `DomainError::InvalidIdentifier` if blank.
    pub fn story_id(&self) -> DomainResult<StoryId> {
        let raw = self
            .story_id
            .as_deref()
            .ok_or(DomainError::MissingField("storyId"))?;
        StoryId::new(raw)
    }

    /// Returns true if `body` is a JSON object with a `msg` key, whatever its
    /// value. `{"msg": null}` declares a message; `{}` does not.
    #[must_use]
    pub fn declares_message(body: &str) -> bool {
        serde_json::from_str::<serde_json::Value>(body)
            .is_ok_and(|value| value.as_object().is_some_and(|o| o.contains_key("msg")))
    }
}
