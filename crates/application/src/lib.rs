//! Spoiler Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, assertion evaluation, clock)
//! - The authenticated session and per-run fixture state
//! - The ordered story cases and the suite runner

pub mod authenticate;
pub mod cases;
pub mod error;
pub mod ports;
pub mod report;
pub mod run_suite;
pub mod session;
pub mod story_data;

#[cfg(test)]
mod test_support;

pub use authenticate::{AUTHENTICATION_PATH, Authenticate};
pub use cases::StoryCase;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{AssertionEvaluator, Clock, HttpClient, HttpClientError, HttpFuture};
pub use report::{CaseOutcome, CaseReport, SuiteReport};
pub use run_suite::RunStorySuite;
pub use session::{FixtureState, Session};
