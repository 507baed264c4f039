// gatekeeper/src/commands/query.rs
//
// USE CASE: Execute a read-only scalar query (ad-hoc) on a project connection.

use anyhow::Context;
use std::path::PathBuf;

use gatekeeper_core::GatekeeperError;
use gatekeeper_core::application::execute_scalar_query;
use gatekeeper_core::domain::quality::ReadOnlyGuard;
use gatekeeper_core::infrastructure::adapters::connect_named;
use gatekeeper_core::infrastructure::config::load_project_config;

pub async fn execute(
    query: String,
    project_dir: PathBuf,
    connection: Option<String>,
) -> anyhow::Result<()> {
    ReadOnlyGuard::ensure_read_only(&query, 0).context("Ad-hoc queries must be read-only")?;

    let config = load_project_config(&project_dir).with_context(|| {
        format!("Failed to load project configuration from {:?}", project_dir)
    })?;
    let connection = connection.unwrap_or_else(|| config.default_connection.clone());

    let executors = connect_named(&config, &project_dir, [connection.as_str()])
        .await
        .with_context(|| format!("Failed to open connection '{}'", connection))?;
    let executor = executors.get(&connection).ok_or_else(|| {
        GatekeeperError::InternalError(format!("connection '{}' was not opened", connection))
    })?;

    let value = execute_scalar_query(executor.as_ref(), &query)
        .await
        .with_context(|| format!("Query failed on connection '{}'", connection))?;
    println!("{}", value);
    Ok(())
}
