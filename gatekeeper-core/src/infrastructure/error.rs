// gatekeeper-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(gatekeeper::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("DataFusion Engine Error: {0}")]
    #[diagnostic(
        code(gatekeeper::infra::database::datafusion),
        help("An error occurred inside the SQL engine.")
    )]
    DataFusion(#[from] datafusion::error::DataFusionError),

    #[error("Query returned no rows: {0}")]
    #[diagnostic(
        code(gatekeeper::infra::database::empty_result),
        help("A check query must return at least one row; wrap it in an aggregate such as COUNT(*).")
    )]
    EmptyResult(String),

    #[error("Connection lock poisoned")]
    #[diagnostic(code(gatekeeper::infra::database::poisoned))]
    Poisoned,
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(gatekeeper::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in {path}: {source}")]
    #[diagnostic(
        code(gatekeeper::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Serialization Error: {0}")]
    #[diagnostic(code(gatekeeper::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(gatekeeper::infra::config))]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(gatekeeper::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Unknown connection '{0}'")]
    #[diagnostic(
        code(gatekeeper::infra::connection),
        help("Declare it in config/connections.yml.")
    )]
    UnknownConnection(String),
}

// Shortcut for `?` on duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}

impl From<datafusion::error::DataFusionError> for InfrastructureError {
    fn from(err: datafusion::error::DataFusionError) -> Self {
        InfrastructureError::Database(DatabaseError::DataFusion(err))
    }
}
