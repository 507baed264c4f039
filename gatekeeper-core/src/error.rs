// gatekeeper-core/src/error.rs

use crate::domain::error::DomainError;
use crate::domain::quality::GateFailure;
use crate::infrastructure::error::InfrastructureError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatekeeperError {
    // --- CONFIGURATION (templates, targets, pairing) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (engines, IO, parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GATE ---
    #[error("Query #{index} could not be executed: {query}")]
    QueryExecution {
        index: usize,
        query: String,
        #[source]
        source: Box<GatekeeperError>,
    },

    #[error("Quality check '{check}' failed, {failure}")]
    AssertionFailed {
        check: String,
        failure: Box<GateFailure>,
    },

    // --- GENERIC ---
    #[error("Internal Error: {0}")]
    InternalError(String),

    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

/// Coarse classification the scheduler (or the CLI exit code) branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Configuration,
    QueryExecution,
    AssertionFailed,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::AssertionFailed => 1,
            Self::QueryExecution => 2,
            Self::Configuration => 3,
            Self::Internal => 4,
        }
    }
}

impl GatekeeperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Configuration,
            Self::Infrastructure(e) => e.category(),
            Self::QueryExecution { .. } => ErrorCategory::QueryExecution,
            Self::AssertionFailed { .. } => ErrorCategory::AssertionFailed,
            Self::InternalError(_) | Self::UnsafePath(_) => ErrorCategory::Internal,
        }
    }
}

impl InfrastructureError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Database(_) => ErrorCategory::QueryExecution,
            Self::YamlError { .. }
            | Self::ConfigError(_)
            | Self::ConfigNotFound(_)
            | Self::UnknownConnection(_) => ErrorCategory::Configuration,
            _ => ErrorCategory::Internal,
        }
    }
}

impl From<std::io::Error> for GatekeeperError {
    fn from(err: std::io::Error) -> Self {
        GatekeeperError::Infrastructure(InfrastructureError::Io(err))
    }
}
