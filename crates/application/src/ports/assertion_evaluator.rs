//! Assertion evaluator port

use spoiler_domain::response::ResponseSpec;
use spoiler_domain::{TestResults, TestSuite};

/// Port for evaluating a case's assertions against the response it received.
pub trait AssertionEvaluator: Send + Sync {
    /// Runs every assertion in `suite` against `response`.
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults;
}
