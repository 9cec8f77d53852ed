//! Spoiler Domain - Core types for the Story Spoiler API suite
//!
//! This crate defines the data exchanged with the Story Spoiler service
//! and the assertion model used to verify its responses.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod id;
pub mod request;
pub mod response;
pub mod story;
pub mod testing;

pub use auth::{AuthConfig, AuthResponse, Credentials};
pub use error::{DomainError, DomainResult};
pub use id::generate_id;
pub use story::{ApiResponse, StoryId, StoryPayload};
pub use testing::{Assertion, AssertionResult, StatusExpectation, TestResults, TestSuite};
