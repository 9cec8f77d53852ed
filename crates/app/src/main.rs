//! Story Spoiler suite - Main Entry Point
//!
//! Loads configuration from the environment, runs the suite against the
//! configured service and exits non-zero unless every case passed.

use std::process::ExitCode;

use anyhow::Context;
use spoiler_infrastructure::{SuiteConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let config = SuiteConfig::from_env().context("invalid configuration")?;
    let report = spoiler::run(&config).await?;

    println!("{report}");

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
