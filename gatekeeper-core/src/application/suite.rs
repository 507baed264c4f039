// gatekeeper-core/src/application/suite.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, info, instrument};

use crate::application::task::QualityCheckTask;
use crate::domain::error::DomainError;
use crate::domain::project::CheckDefinition;
use crate::domain::quality::{CheckResult, GateFailure};
use crate::error::{ErrorCategory, GatekeeperError};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::executor::QueryExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Error,
    /// Not run because an earlier check halted the suite.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub name: String,
    pub target: String,
    pub connection: String,
    pub status: CheckStatus,
    pub results: Vec<CheckResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<GateFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ErrorCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub project: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
    pub checks: Vec<CheckReport>,
}

impl SuiteReport {
    /// Category of the check that halted the suite, if any.
    pub fn halted_by(&self) -> Option<ErrorCategory> {
        self.checks.iter().find_map(|c| c.category)
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.checks.iter().filter(|c| c.status == status).count()
    }
}

/// Keeps the checks named `select`, or all of them.
pub fn select_checks(
    checks: Vec<CheckDefinition>,
    select: Option<&str>,
) -> Result<Vec<CheckDefinition>, DomainError> {
    match select {
        None => Ok(checks),
        Some(name) => {
            let selected: Vec<_> = checks.into_iter().filter(|c| c.name == name).collect();
            if selected.is_empty() {
                return Err(DomainError::CheckNotFound(name.to_string()));
            }
            Ok(selected)
        }
    }
}

/// Runs checks in order, each against the executor of its connection.
/// The first failed or errored check halts the suite; the rest are reported
/// as skipped. Executors are owned by the caller.
#[instrument(skip_all, fields(project = project, checks = checks.len()))]
pub async fn run_suite(
    project: &str,
    checks: Vec<CheckDefinition>,
    default_connection: &str,
    executors: &HashMap<String, Box<dyn QueryExecutor>>,
) -> SuiteReport {
    let started_at = Utc::now();
    let mut reports = Vec::with_capacity(checks.len());
    let mut halted = false;

    for definition in checks {
        let task = QualityCheckTask::new(definition);
        let connection = task.connection(default_connection).to_string();
        let mut report = CheckReport {
            name: task.name().to_string(),
            target: task.definition().target().qualified_name(),
            connection: connection.clone(),
            status: CheckStatus::Skipped,
            results: Vec::new(),
            failure: None,
            error: None,
            category: None,
        };

        if halted {
            reports.push(report);
            continue;
        }

        let outcome = match executors.get(&connection) {
            Some(executor) => task.execute(executor.as_ref()).await,
            None => Err(InfrastructureError::UnknownConnection(connection).into()),
        };

        match outcome {
            Ok(results) => {
                info!(check = %report.name, "✅ PASS");
                report.status = CheckStatus::Passed;
                report.results = results;
            }
            Err(GatekeeperError::AssertionFailed { failure, .. }) => {
                error!(check = %report.name, "❌ FAIL: {}", failure);
                report.status = CheckStatus::Failed;
                report.results = failure.results.clone();
                report.failure = Some(*failure);
                report.category = Some(ErrorCategory::AssertionFailed);
                halted = true;
            }
            Err(e) => {
                error!(check = %report.name, "💥 ERROR: {}", e);
                report.status = CheckStatus::Error;
                report.category = Some(e.category());
                report.error = Some(error_chain(&e));
                halted = true;
            }
        }

        reports.push(report);
    }

    SuiteReport {
        project: project.to_string(),
        started_at,
        finished_at: Utc::now(),
        success: !halted,
        checks: reports,
    }
}

/// `error: cause: cause` on one line, for reports.
fn error_chain(err: &GatekeeperError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}
