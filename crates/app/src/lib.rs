//! Story Spoiler API suite
//!
//! Wires the infrastructure adapters into the suite runner.

use anyhow::Context;
use spoiler_application::{RunStorySuite, SuiteReport};
use spoiler_infrastructure::{ReqwestHttpClient, SuiteConfig, SystemClock, TestRunner};

/// Runs the whole suite once against `config.base_url`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or login fails.
/// Individual case failures are reported, not returned.
pub async fn run(config: &SuiteConfig) -> anyhow::Result<SuiteReport> {
    let client = ReqwestHttpClient::from_config(config).context("failed to build HTTP client")?;

    tracing::info!(
        base_url = %config.base_url,
        user = %config.username,
        timeout_ms = config.timeout_ms,
        "starting story suite"
    );

    RunStorySuite::new(client, TestRunner::new(), SystemClock::new(), config.credentials())
        .execute()
        .await
        .context("suite setup failed")
}
