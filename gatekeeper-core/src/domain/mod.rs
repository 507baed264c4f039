// gatekeeper-core/src/domain/mod.rs

pub mod error;
pub mod project;
pub mod quality;

// Shortcut: use gatekeeper_core::domain::DomainError;
pub use error::DomainError;
