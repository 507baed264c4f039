// gatekeeper-core/src/domain/project/mod.rs

pub mod check;
pub mod configuration;

pub use check::{CheckDefinition, CheckFile};
pub use configuration::{ConnectionProfile, Engine, ProjectConfig};
