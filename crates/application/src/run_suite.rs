//! Run Story Suite use case
//!
//! Authenticates once, runs every [`StoryCase`] in order against one
//! session, then releases the session.

use std::time::Instant;

use spoiler_domain::Credentials;

use crate::authenticate::Authenticate;
use crate::cases::StoryCase;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{AssertionEvaluator, Clock, HttpClient};
use crate::report::{CaseOutcome, CaseReport, SuiteReport};
use crate::session::{FixtureState, Session};

/// Use case for running the ordered story suite.
///
/// # Example
///
/// ```ignore
/// let suite = RunStorySuite::new(client, TestRunner::new(), SystemClock::new(), credentials);
/// let report = suite.execute().await?;
/// assert!(report.all_passed());
/// ```
pub struct RunStorySuite<C: HttpClient, E: AssertionEvaluator, K: Clock> {
    client: C,
    evaluator: E,
    clock: K,
    credentials: Credentials,
}

impl<C: HttpClient, E: AssertionEvaluator, K: Clock> RunStorySuite<C, E, K> {
    /// Creates the use case. The client is consumed by the run.
    pub const fn new(client: C, evaluator: E, clock: K, credentials: Credentials) -> Self {
        Self {
            client,
            evaluator,
            clock,
            credentials,
        }
    }

    /// Runs the suite.
    ///
    /// Case failures are recorded in the report and do not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error only if login fails; no case runs in that event.
    pub async fn execute(self) -> ApplicationResult<SuiteReport> {
        let token = Authenticate::new(&self.client)
            .execute(&self.credentials)
            .await?;
        let session = Session::open(self.client, token);

        let mut fixture = FixtureState::new();
        let mut report = SuiteReport::new();
        for case in StoryCase::ORDERED {
            let case_report =
                run_case(case, &session, &self.evaluator, &self.clock, &mut fixture).await;
            report.push(case_report);
        }

        session.close();
        tracing::info!(
            passed = report.passed(),
            total = report.total(),
            "suite finished"
        );
        Ok(report)
    }
}

async fn run_case<C: HttpClient, E: AssertionEvaluator, K: Clock>(
    case: StoryCase,
    session: &Session<C>,
    evaluator: &E,
    clock: &K,
    fixture: &mut FixtureState,
) -> CaseReport {
    let start = Instant::now();
    tracing::info!(case = %case, "running case");

    let errored = |message: String| {
        tracing::warn!(case = %case, error = %message, "case errored");
        CaseReport {
            case,
            outcome: CaseOutcome::Errored(message),
            status: None,
            results: None,
            duration: start.elapsed(),
        }
    };

    let request = match case.request(fixture, clock) {
        Ok(request) => request,
        Err(e) => return errored(e.to_string()),
    };

    let response = match session.send(request).await {
        Ok(response) => response,
        Err(e) => return errored(ApplicationError::from(e).to_string()),
    };

    let suite = case.expectations(&response);
    let results = evaluator.evaluate(&suite, &response);

    let outcome = match case.capture(&response, &results, fixture) {
        Err(e) => CaseOutcome::Errored(e.to_string()),
        Ok(()) if results.all_passed() => CaseOutcome::Passed,
        Ok(()) => CaseOutcome::Failed,
    };

    match &outcome {
        CaseOutcome::Passed => tracing::info!(case = %case, status = response.status, "case passed"),
        CaseOutcome::Failed => {
            for failure in results.failures() {
                tracing::warn!(
                    case = %case,
                    assertion = %failure.assertion.description(),
                    error = failure.error.as_deref().unwrap_or_default(),
                    "assertion failed"
                );
            }
        }
        CaseOutcome::Errored(message) => {
            tracing::warn!(case = %case, error = %message, "case errored");
        }
    }

    CaseReport {
        case,
        outcome,
        status: Some(response.status),
        results: Some(results),
        duration: start.elapsed(),
    }
}
