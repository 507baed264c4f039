// gatekeeper-core/src/domain/quality/outcome.rs

use serde::Serialize;
use std::fmt;

use crate::domain::quality::value::ScalarValue;

/// One executed assertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub assertion_index: usize,
    pub resolved_query: String,
    pub actual_value: ScalarValue,
}

impl CheckResult {
    pub fn new(
        assertion_index: usize,
        resolved_query: impl Into<String>,
        actual_value: impl Into<ScalarValue>,
    ) -> Self {
        Self {
            assertion_index,
            resolved_query: resolved_query.into(),
            actual_value: actual_value.into(),
        }
    }
}

/// Diagnostic payload of a violated assertion.
/// `results` holds every assertion executed up to and including the failing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateFailure {
    pub results: Vec<CheckResult>,
    pub failing_index: usize,
    pub resolved_query: String,
    pub expected_failure_value: ScalarValue,
    pub actual_value: ScalarValue,
}

impl fmt::Display for GateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assertion #{} failed: `{}` returned {} (failure value: {})",
            self.failing_index, self.resolved_query, self.actual_value, self.expected_failure_value
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GateOutcome {
    Pass { results: Vec<CheckResult> },
    Fail(GateFailure),
}

impl GateOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass { .. })
    }

    /// Results collected before the scan stopped (all of them on `Pass`).
    pub fn results(&self) -> &[CheckResult] {
        match self {
            Self::Pass { results } => results,
            Self::Fail(failure) => &failure.results,
        }
    }

    pub fn failure(&self) -> Option<&GateFailure> {
        match self {
            Self::Pass { .. } => None,
            Self::Fail(failure) => Some(failure),
        }
    }
}
