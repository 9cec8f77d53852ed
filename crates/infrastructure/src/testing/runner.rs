//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces test results.

use std::time::Instant;

use regex::Regex;
use spoiler_application::ports::AssertionEvaluator;
use spoiler_domain::response::ResponseSpec;
use spoiler_domain::testing::{
    Assertion, AssertionResult, StatusExpectation, TestResults, TestSuite,
};
use spoiler_domain::ApiResponse;

const PREVIEW_CHARS: usize = 100;

/// Test runner that executes assertions against responses.
///
/// Every assertion in a suite runs, so a report lists all failures at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a test suite against a response.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn run(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        let start = Instant::now();
        let results: Vec<_> = suite
            .assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect();

        let duration_ms = start.elapsed().as_millis() as u64;
        TestResults::new(&suite.name, results, duration_ms)
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => Self::check_status_code(assertion, response, expected),
            Assertion::MessageContains { text, ignore_case } => {
                Self::check_message_contains(assertion, response, text, *ignore_case)
            }
            Assertion::MessageMatches { pattern } => {
                Self::check_message_matches(assertion, response, pattern)
            }
            Assertion::BodyNotEmpty => Self::check_body_not_empty(assertion, response),
            Assertion::JsonArrayNotEmpty => Self::check_json_array_not_empty(assertion, response),
            Assertion::JsonPath { path } => Self::check_json_path(assertion, response, path),
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &StatusExpectation,
    ) -> AssertionResult {
        let actual = response.status;
        if expected.matches(actual) {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("Expected status {}, got {}", expected.description(), actual),
            )
        }
    }

    /// Extracts the envelope `msg`, or the failure explaining why there is none.
    fn message(assertion: &Assertion, response: &ResponseSpec) -> Result<String, AssertionResult> {
        let envelope = ApiResponse::from_body(&response.body).map_err(|e| {
            AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(PREVIEW_CHARS),
                format!("Body is not a message envelope: {e}"),
            )
        })?;
        envelope
            .message()
            .map(ToString::to_string)
            .map_err(|e| AssertionResult::fail(assertion.clone(), e.to_string()))
    }

    fn check_message_contains(
        assertion: &Assertion,
        response: &ResponseSpec,
        text: &str,
        ignore_case: bool,
    ) -> AssertionResult {
        let message = match Self::message(assertion, response) {
            Ok(message) => message,
            Err(failure) => return failure,
        };

        if contains(&message, text, ignore_case) {
            AssertionResult::pass_with_value(assertion.clone(), message)
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                message.clone(),
                format!("Message '{message}' does not contain '{text}'"),
            )
        }
    }

    fn check_message_matches(
        assertion: &Assertion,
        response: &ResponseSpec,
        pattern: &str,
    ) -> AssertionResult {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("Invalid regex pattern '{pattern}': {e}"),
                );
            }
        };
        let message = match Self::message(assertion, response) {
            Ok(message) => message,
            Err(failure) => return failure,
        };

        if regex.is_match(&message) {
            AssertionResult::pass_with_value(assertion.clone(), message)
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                message.clone(),
                format!("Message '{message}' does not match pattern '{pattern}'"),
            )
        }
    }

    fn check_body_not_empty(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        if response.body.is_empty() {
            AssertionResult::fail(assertion.clone(), "Body is empty")
        } else {
            AssertionResult::pass_with_value(assertion.clone(), format!("{} bytes", response.size))
        }
    }

    fn check_json_array_not_empty(
        assertion: &Assertion,
        response: &ResponseSpec,
    ) -> AssertionResult {
        match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(serde_json::Value::Array(items)) if !items.is_empty() => {
                AssertionResult::pass_with_value(assertion.clone(), format!("{} items", items.len()))
            }
            Ok(serde_json::Value::Array(_)) => {
                AssertionResult::fail_with_value(assertion.clone(), "[]", "JSON array is empty")
            }
            Ok(other) => AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(PREVIEW_CHARS),
                format!("Body is a JSON {}, not an array", json_kind(&other)),
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Failed to parse body as JSON: {e}"),
            ),
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> AssertionResult {
        let json = match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(json) => json,
            Err(e) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("Failed to parse body as JSON: {e}"),
                );
            }
        };

        match query_json_path(&json, path) {
            Ok(Some(value)) => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
            Ok(None) => AssertionResult::fail(
                assertion.clone(),
                format!("JSON path '{path}' not found"),
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }
}

impl AssertionEvaluator for TestRunner {
    fn evaluate(&self, suite: &TestSuite, response: &ResponseSpec) -> TestResults {
        self.run(suite, response)
    }
}

fn contains(haystack: &str, needle: &str, ignore_case: bool) -> bool {
    if ignore_case {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    } else {
        haystack.contains(needle)
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0]
fn query_json_path(json: &serde_json::Value, path: &str) -> Result<Option<serde_json::Value>, String> {
    let Some(path) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };
    if path.is_empty() {
        return Ok(Some(json.clone()));
    }

    let path = path.strip_prefix('.').unwrap_or(path);
    let mut current = json;

    for segment in split_path_segments(path) {
        if let Some((name, index)) = parse_array_access(&segment) {
            if !name.is_empty() {
                match current.get(name) {
                    Some(v) => current = v,
                    None => return Ok(None),
                }
            }
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        } else {
            match current.get(segment.as_str()) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current.clone()))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment[bracket_start + 1..].strip_suffix(']')?;
    Some((&segment[..bracket_start], inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn create_response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, body.as_bytes().to_vec(), Duration::from_millis(50))
    }

    #[test]
    fn test_status_code_exact() {
        let runner = TestRunner::new();
        let response = create_response(201, "");

        assert!(runner.run_assertion(&Assertion::status(201), &response).passed);

        let result = runner.run_assertion(&Assertion::status(200), &response);
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("Expected status = 200, got 201"));
    }

    #[test]
    fn test_status_code_one_of() {
        let runner = TestRunner::new();
        let assertion = Assertion::status_one_of(&[200, 204]);

        assert!(runner.run_assertion(&assertion, &create_response(204, "")).passed);
        assert!(!runner.run_assertion(&assertion, &create_response(201, "")).passed);
    }

    #[test]
    fn test_message_contains_ignores_case() {
        let runner = TestRunner::new();
        let response = create_response(201, r#"{"storyId":"1","msg":"SUCCESSFULLY CREATED!"}"#);

        let result = runner.run_assertion(&Assertion::message_contains("Successfully created!"), &response);
        assert!(result.passed);
        assert_eq!(result.actual.as_deref(), Some("SUCCESSFULLY CREATED!"));

        let strict = Assertion::MessageContains {
            text: "Successfully created!".to_string(),
            ignore_case: false,
        };
        assert!(!runner.run_assertion(&strict, &response).passed);
    }

    #[test]
    fn test_message_contains_missing_msg() {
        let runner = TestRunner::new();
        let result = runner.run_assertion(
            &Assertion::message_contains("Successfully edited"),
            &create_response(200, r#"{"title":"x"}"#),
        );
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("response body has no 'msg' field"));
    }

    #[test]
    fn test_message_contains_non_json_body() {
        let runner = TestRunner::new();
        let result = runner.run_assertion(
            &Assertion::message_contains("Deleted successfully!"),
            &create_response(200, "<html>gateway</html>"),
        );
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("<html>gateway</html>"));
    }

    #[test]
    fn test_message_matches_not_found_wording() {
        let runner = TestRunner::new();
        let assertion = Assertion::MessageMatches {
            pattern: "(?i)no spoilers|not found".to_string(),
        };

        assert!(runner.run_assertion(&assertion, &create_response(404, r#"{"msg":"No spoilers..."}"#)).passed);
        assert!(runner.run_assertion(&assertion, &create_response(404, r#"{"msg":"Story NOT FOUND"}"#)).passed);
        assert!(!runner.run_assertion(&assertion, &create_response(404, r#"{"msg":"Edited"}"#)).passed);
    }

    #[test]
    fn test_message_matches_fails_on_null_msg() {
        let runner = TestRunner::new();
        let assertion = Assertion::MessageMatches {
            pattern: "(?i)no spoilers|not found".to_string(),
        };

        let result = runner.run_assertion(&assertion, &create_response(404, r#"{"msg":null}"#));
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("response body has no 'msg' field"));
    }

    #[test]
    fn test_message_matches_invalid_pattern() {
        let runner = TestRunner::new();
        let assertion = Assertion::MessageMatches {
            pattern: "(unclosed".to_string(),
        };
        let result = runner.run_assertion(&assertion, &create_response(404, r#"{"msg":"x"}"#));
        assert!(!result.passed);
        assert!(result.error.unwrap_or_default().starts_with("Invalid regex pattern"));
    }

    #[test]
    fn test_body_not_empty() {
        let runner = TestRunner::new();
        assert!(runner.run_assertion(&Assertion::BodyNotEmpty, &create_response(400, "Bad")).passed);
        assert!(!runner.run_assertion(&Assertion::BodyNotEmpty, &create_response(400, "")).passed);
    }

    #[test]
    fn test_json_array_not_empty() {
        let runner = TestRunner::new();
        let assertion = Assertion::JsonArrayNotEmpty;

        let result = runner.run_assertion(&assertion, &create_response(200, r#"[{"id":1},{"id":2}]"#));
        assert!(result.passed);
        assert_eq!(result.actual.as_deref(), Some("2 items"));

        let result = runner.run_assertion(&assertion, &create_response(200, "[]"));
        assert_eq!(result.error.as_deref(), Some("JSON array is empty"));

        let result = runner.run_assertion(&assertion, &create_response(200, r#"{"items":[]}"#));
        assert_eq!(result.error.as_deref(), Some("Body is a JSON object, not an array"));

        let result = runner.run_assertion(&assertion, &create_response(200, "not json"));
        assert!(result.error.unwrap_or_default().starts_with("Failed to parse body as JSON"));
    }

    #[test]
    fn test_json_path() {
        let runner = TestRunner::new();
        let response = create_response(200, r#"{"storyId": "abc", "meta": {"tags": ["x", "y"]}}"#);

        let result = runner.run_assertion(&Assertion::json_path("$.storyId"), &response);
        assert!(result.passed);
        assert_eq!(result.actual.as_deref(), Some(r#""abc""#));

        let result = runner.run_assertion(&Assertion::json_path("$.meta.tags[1]"), &response);
        assert_eq!(result.actual.as_deref(), Some(r#""y""#));

        assert!(!runner.run_assertion(&Assertion::json_path("$.meta.tags[5]"), &response).passed);

        let result = runner.run_assertion(&Assertion::json_path("$.missing"), &response);
        assert_eq!(result.error.as_deref(), Some("JSON path '$.missing' not found"));
    }

    #[test]
    fn test_json_path_requires_root() {
        let runner = TestRunner::new();
        let result = runner.run_assertion(&Assertion::json_path("storyId"), &create_response(200, "{}"));
        assert!(!result.passed);
        assert!(result.error.unwrap_or_default().contains("must start with '$'"));
    }

    #[test]
    fn test_run_suite() {
        let runner = TestRunner::new();
        let response = create_response(201, r#"{"storyId":"s-1","msg":"Successfully created!"}"#);

        let suite = TestSuite::new("create_story")
            .with_assertion(Assertion::status(201))
            .with_assertion(Assertion::json_path("$.storyId"))
            .with_assertion(Assertion::message_contains("successfully created!"));

        let results = runner.evaluate(&suite, &response);
        assert!(results.all_passed());
        assert_eq!(results.total, 3);
        assert_eq!(results.suite_name, "create_story");
    }

    #[test]
    fn test_runs_every_assertion() {
        let runner = TestRunner::new();
        let response = create_response(404, "Not Found");

        let suite = TestSuite::new("edit_story")
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::message_contains("Successfully edited"));

        let results = runner.run(&suite, &response);
        assert_eq!(results.results.len(), 2);
        assert_eq!(results.failed, 2);
    }
}
