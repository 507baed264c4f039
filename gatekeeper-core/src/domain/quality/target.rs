// gatekeeper-core/src/domain/quality/target.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use validator::{Validate, ValidationErrors};

use crate::domain::error::DomainError;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").unwrap_or_else(|_| unreachable!())
});

/// The dataset under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Target {
    #[validate(
        length(min = 1, message = "database must not be empty"),
        regex(path = *IDENTIFIER, message = "database is not a plain identifier")
    )]
    pub database: String,

    #[validate(
        length(min = 1, message = "table must not be empty"),
        regex(path = *IDENTIFIER, message = "table is not a plain identifier")
    )]
    pub table: String,
}

impl Target {
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }

    /// `database.table`, the text substituted into query templates.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }

    /// Checks both identifiers are non-empty and safe to splice into SQL.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        self.validate().map_err(|errors| DomainError::InvalidTarget {
            value: self.qualified_name(),
            reason: first_message(&errors),
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.table)
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
