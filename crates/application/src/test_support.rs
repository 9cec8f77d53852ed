//! Mocks shared by the unit tests of this crate.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use spoiler_domain::request::RequestSpec;
use spoiler_domain::response::ResponseSpec;
use spoiler_domain::{ApiResponse, Assertion, AssertionResult, TestResults, TestSuite};

use crate::ports::{AssertionEvaluator, Clock, HttpClient, HttpClientError, HttpFuture};

/// Builds a JSON response with the given status and body.
pub fn response(status: u16, body: &str) -> ResponseSpec {
    ResponseSpec::new(status, body.as_bytes().to_vec(), Duration::from_millis(5))
}

/// Replays canned responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>>,
    requests: Arc<Mutex<Vec<RequestSpec>>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<ResponseSpec, HttpClientError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedClient {
    fn execute<'a>(&'a self, request: &'a RequestSpec) -> HttpFuture<'a> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpClientError::Other("script exhausted".to_string())));
        Box::pin(async move { next })
    }
}

/// Evaluates the status and message assertions; everything else passes.
pub struct StatusAndMessageEvaluator;

impl AssertionEvaluator for StatusAndMessageEvaluator {
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let results = suite
            .assertions
            .iter()
            .map(|assertion| {
                let passed = match assertion {
                    Assertion::StatusCode { expected } => expected.matches(response.status),
                    Assertion::MessageContains { text, .. } => ApiResponse::from_body(&response.body)
                        .ok()
                        .and_then(|e| e.msg)
                        .is_some_and(|m| m.to_lowercase().contains(&text.to_lowercase())),
                    _ => true,
                };
                if passed {
                    AssertionResult::pass(assertion.clone())
                } else {
                    AssertionResult::fail(assertion.clone(), "mismatch")
                }
            })
            .collect();
        TestResults::new(&suite.name, results, 0)
    }
}

/// Clock frozen at a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
