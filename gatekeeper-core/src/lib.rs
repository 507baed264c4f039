// gatekeeper-core/src/lib.rs

#![allow(missing_docs)]
// 1. Memory safety
#![deny(unsafe_code)]
// 2. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 3. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports: the QueryExecutor contract every engine implements
pub mod ports;

// 2. Domain: targets, assertions, outcomes, project definitions.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure: DuckDB / DataFusion executors, YAML loaders, atomic writes
pub mod infrastructure;

// 4. Application: quality gate, check task, suite runner, report, clean
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::{ErrorCategory, GatekeeperError};
