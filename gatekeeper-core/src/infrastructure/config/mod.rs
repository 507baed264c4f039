// gatekeeper-core/src/infrastructure/config/mod.rs

pub mod checks;
pub mod connection;
pub mod project;

pub use crate::domain::project::{ConnectionProfile, ProjectConfig};
pub use checks::discover_checks;
pub use connection::load_connections;
pub use project::load_project_config;
