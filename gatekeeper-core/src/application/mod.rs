// gatekeeper-core/src/application/mod.rs

pub mod clean;
pub mod engine;
pub mod gate;
pub mod report;
pub mod suite;
pub mod task;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use gatekeeper_core::application::{run_suite, QualityGate};`
// without knowing the file layout.

pub use clean::clean_project;
pub use engine::execute_scalar_query;
pub use gate::QualityGate;
pub use report::write_report;
pub use suite::{CheckReport, CheckStatus, SuiteReport, run_suite, select_checks};
pub use task::QualityCheckTask;
