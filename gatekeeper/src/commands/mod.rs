// gatekeeper/src/commands/mod.rs

pub mod check;
pub mod clean;
pub mod list;
pub mod query;

use miette::Diagnostic;
use gatekeeper_core::domain::DomainError;
use gatekeeper_core::infrastructure::error::InfrastructureError;
use gatekeeper_core::{ErrorCategory, GatekeeperError};

/// Prints an error with its context chain and the diagnostic hint, if any.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("\n💥 {}", err);
    for cause in err.chain().skip(1) {
        eprintln!("   ↳ {}", cause);
    }

    let help = if let Some(e) = err.downcast_ref::<DomainError>() {
        e.help().map(|h| h.to_string())
    } else if let Some(e) = err.downcast_ref::<InfrastructureError>() {
        e.help().map(|h| h.to_string())
    } else {
        match err.downcast_ref::<GatekeeperError>() {
            Some(GatekeeperError::Domain(e)) => e.help().map(|h| h.to_string()),
            Some(GatekeeperError::Infrastructure(e)) => e.help().map(|h| h.to_string()),
            _ => None,
        }
    };
    if let Some(help) = help {
        eprintln!("   👉 {}", help);
    }
}

/// Category of the library error under any added context.
pub fn category(err: &anyhow::Error) -> ErrorCategory {
    if let Some(e) = err.downcast_ref::<GatekeeperError>() {
        e.category()
    } else if err.downcast_ref::<DomainError>().is_some() {
        ErrorCategory::Configuration
    } else if let Some(e) = err.downcast_ref::<InfrastructureError>() {
        e.category()
    } else {
        ErrorCategory::Internal
    }
}
