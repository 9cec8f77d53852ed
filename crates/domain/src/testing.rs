//! Response testing and assertions.
//!
//! This module provides types for defining and executing checks on HTTP responses.

/// A test assertion to run against a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code or set of codes.
        expected: StatusExpectation,
    },
    /// Check the envelope `msg` field contains text.
    MessageContains {
        /// Text to search for.
        text: String,
        /// Case-insensitive search.
        ignore_case: bool,
    },
    /// Check the envelope `msg` field matches a regex pattern.
    MessageMatches {
        /// Regex pattern.
        pattern: String,
    },
    /// Check body is not empty.
    BodyNotEmpty,
    /// Check body is a JSON array with at least one element.
    JsonArrayNotEmpty,
    /// Check a JSON path resolves to a value.
    JsonPath {
        /// JSONPath expression (e.g., "$.storyId").
        path: String,
    },
}

impl Assertion {
    /// Status must equal `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode {
            expected: StatusExpectation::Exact(code),
        }
    }

    /// Status must be one of `codes`.
    #[must_use]
    pub fn status_one_of(codes: &[u16]) -> Self {
        Self::StatusCode {
            expected: StatusExpectation::one_of(codes),
        }
    }

    /// `path` must resolve in the JSON body.
    #[must_use]
    pub fn json_path(path: impl Into<String>) -> Self {
        Self::JsonPath { path: path.into() }
    }

    /// Envelope message must contain `text`, ignoring case.
    #[must_use]
    pub fn message_contains(text: impl Into<String>) -> Self {
        Self::MessageContains {
            text: text.into(),
            ignore_case: true,
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::MessageContains { text, .. } => format!("Message contains '{text}'"),
            Self::MessageMatches { pattern } => format!("Message matches /{pattern}/"),
            Self::BodyNotEmpty => "Body is not empty".to_string(),
            Self::JsonArrayNotEmpty => "Body is a non-empty JSON array".to_string(),
            Self::JsonPath { path } => format!("JSON {path} exists"),
        }
    }
}

/// Expected status code value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a one-of status expectation.
    #[must_use]
    pub fn one_of(codes: &[u16]) -> Self {
        Self::OneOf(codes.to_vec())
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// The assertions one case runs against its response.
#[derive(Debug, Clone)]
pub struct TestSuite {
    /// Test suite name.
    pub name: String,
    /// Assertions to run.
    pub assertions: Vec<Assertion>,
}

impl TestSuite {
    /// Create a new empty test suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: Vec::new(),
        }
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }
}

/// Results from running a test suite.
#[derive(Debug, Clone)]
pub struct TestResults {
    /// Test suite that was run.
    pub suite_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            suite_name: suite_name.into(),
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all tests passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Returns whether the status-code assertion, if any, passed.
    #[must_use]
    pub fn status_passed(&self) -> bool {
        self.results
            .iter()
            .filter(|r| matches!(r.assertion, Assertion::StatusCode { .. }))
            .all(|r| r.passed)
    }

    /// Iterates over failed assertion results.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}
