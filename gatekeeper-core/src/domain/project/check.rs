// gatekeeper-core/src/domain/project/check.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::error::DomainError;
use crate::domain::quality::{Assertion, ScalarValue, Target};

/// One gate invocation, as written in `checks/*.yml`.
///
/// Assertions come either as explicit pairs (`assertions`) or as the legacy
/// index-aligned lists (`queries` + `failure_results`). Mixing both is refused.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CheckDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Connection id; the project's `default-connection` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    #[serde(alias = "target_database", default = "default_database")]
    pub database: String,

    pub table: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,

    #[serde(alias = "check_quality_queries", default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_results: Vec<ScalarValue>,

    #[serde(skip)]
    pub source_file: Option<PathBuf>,
}

/// Root of a check file.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CheckFile {
    #[serde(default)]
    pub checks: Vec<CheckDefinition>,
}

fn default_database() -> String {
    "public".to_string()
}

impl CheckDefinition {
    pub fn target(&self) -> Target {
        Target::new(&self.database, &self.table)
    }

    /// The ordered assertion pairs of this check.
    pub fn resolve_assertions(&self) -> Result<Vec<Assertion>, DomainError> {
        let has_legacy = !self.queries.is_empty() || !self.failure_results.is_empty();

        let assertions = match (self.assertions.is_empty(), has_legacy) {
            (false, true) => {
                return Err(DomainError::AmbiguousDefinition {
                    name: self.name.clone(),
                    reason: "both 'assertions' and 'queries'/'failure_results' are set".into(),
                });
            }
            (false, false) => self.assertions.clone(),
            (true, _) => Assertion::pair_up(self.queries.clone(), self.failure_results.clone())?,
        };

        if assertions.is_empty() {
            return Err(DomainError::NoAssertions(self.name.clone()));
        }

        Ok(assertions)
    }
}
