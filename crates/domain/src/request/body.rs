//! HTTP Request body types

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// The kind of request body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBodyKind {
    /// No body
    #[default]
    None,
    /// Raw text/JSON body
    Raw {
        /// The content type (e.g., "application/json")
        content_type: String,
    },
}

/// HTTP request body with content and type information.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestBody {
    /// The kind of body
    pub kind: RequestBodyKind,
    /// The body content as a string
    pub content: String,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: RequestBodyKind::None,
            content: String::new(),
        }
    }

    /// Creates a JSON body from already serialized content.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            kind: RequestBodyKind::Raw {
                content_type: "application/json".to_string(),
            },
            content: content.into(),
        }
    }

    /// Serializes `value` into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the value cannot be serialized.
    pub fn json_value<T: Serialize>(value: &T) -> DomainResult<Self> {
        serde_json::to_string(value)
            .map(Self::json)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// Returns whether the body is empty or none.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::is_empty is not const
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, RequestBodyKind::None) || self.content.is_empty()
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match &self.kind {
            RequestBodyKind::None => None,
            RequestBodyKind::Raw { content_type } => Some(content_type),
        }
    }
}
