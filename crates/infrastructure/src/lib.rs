//! Spoiler Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration and logging setup.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod testing;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, SuiteConfig};
pub use logging::init_tracing;
pub use testing::TestRunner;
