//! Per-case and per-run outcomes.

use std::fmt;
use std::time::Duration;

use spoiler_domain::TestResults;

use crate::cases::StoryCase;

/// How a single case ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Every assertion passed.
    Passed,
    /// A response arrived but at least one assertion failed.
    Failed,
    /// The case could not be evaluated (transport failure, missing fixture,
    /// unusable response body).
    Errored(String),
}

/// Outcome of one case with the evidence behind it.
#[derive(Debug, Clone)]
pub struct CaseReport {
    /// The case that ran.
    pub case: StoryCase,
    /// How it ended.
    pub outcome: CaseOutcome,
    /// Status code received, if a response arrived.
    pub status: Option<u16>,
    /// Assertion results, if the response was evaluated.
    pub results: Option<TestResults>,
    /// Wall-clock time spent on the case.
    pub duration: Duration,
}

impl CaseReport {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }

    /// Human-readable descriptions of what went wrong.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Some(results) = &self.results {
            for failure in results.failures() {
                let detail = failure.error.as_deref().unwrap_or("failed");
                problems.push(format!("{}: {detail}", failure.assertion.description()));
            }
        }
        if let CaseOutcome::Errored(message) = &self.outcome {
            problems.push(message.clone());
        }
        problems
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.outcome {
            CaseOutcome::Passed => "PASS",
            CaseOutcome::Failed => "FAIL",
            CaseOutcome::Errored(_) => "ERROR",
        };
        write!(f, "[{label}] {}", self.case)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }
        Ok(())
    }
}

/// Outcome of a whole run, cases in execution order.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// Case reports in execution order.
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Appends a case report.
    pub fn push(&mut self, report: CaseReport) {
        self.cases.push(report);
    }

    /// Returns the report for `case`, if it ran.
    #[must_use]
    pub fn get(&self, case: StoryCase) -> Option<&CaseReport> {
        self.cases.iter().find(|r| r.case == case)
    }

    /// Number of cases run.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Number of cases that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|r| r.passed()).count()
    }

    /// Returns true if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.cases {
            writeln!(f, "{report}")?;
            for problem in report.problems() {
                writeln!(f, "    - {problem}")?;
            }
        }
        write!(f, "{}/{} cases passed", self.passed(), self.total())
    }
}
