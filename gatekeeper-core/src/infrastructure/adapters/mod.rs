// gatekeeper-core/src/infrastructure/adapters/mod.rs

pub mod datafusion;
pub mod duckdb;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::{ConnectionProfile, Engine, ProjectConfig};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::executor::QueryExecutor;

pub use self::datafusion::DataFusionExecutor;
pub use self::duckdb::{DuckDBExecutor, IN_MEMORY};

/// Opens the engine a connection profile describes.
/// DuckDB files are opened read-only; relative paths resolve against `project_dir`.
#[instrument(skip(profile, project_dir))]
pub async fn connect(
    name: &str,
    profile: &ConnectionProfile,
    project_dir: &Path,
) -> Result<Box<dyn QueryExecutor>, InfrastructureError> {
    match profile.engine {
        Engine::DuckDB => {
            let path = profile.path.as_deref().ok_or_else(|| {
                InfrastructureError::ConfigError(format!(
                    "connection '{}' (duckdb) needs a 'path'",
                    name
                ))
            })?;

            let executor = if path == IN_MEMORY {
                DuckDBExecutor::new(IN_MEMORY)?
            } else {
                let file = resolve(project_dir, Path::new(path));
                if !file.exists() {
                    return Err(InfrastructureError::ConfigError(format!(
                        "connection '{}': database file {} does not exist",
                        name,
                        file.display()
                    )));
                }
                DuckDBExecutor::open_read_only(&file.to_string_lossy())?
            };
            info!(connection = name, engine = "duckdb", "🔌 Connected");
            Ok(Box::new(executor))
        }
        Engine::DataFusion => {
            let executor = DataFusionExecutor::new();
            let mut sources: Vec<_> = profile.sources.iter().collect();
            sources.sort_by(|a, b| a.0.cmp(b.0));
            for (table, path) in sources {
                executor
                    .register_source(table, &resolve(project_dir, path))
                    .await?;
            }
            info!(
                connection = name,
                engine = "datafusion",
                tables = profile.sources.len(),
                "🔌 Connected"
            );
            Ok(Box::new(executor))
        }
    }
}

/// Opens the named connections, keyed by connection id.
/// A name missing from `connections.yml` is reported before anything is opened.
pub async fn connect_named<'a, I>(
    config: &ProjectConfig,
    project_dir: &Path,
    names: I,
) -> Result<HashMap<String, Box<dyn QueryExecutor>>, InfrastructureError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut wanted: Vec<&str> = names.into_iter().collect();
    wanted.sort_unstable();
    wanted.dedup();

    if let Some(missing) = wanted.iter().find(|n| !config.connections.contains_key(**n)) {
        return Err(InfrastructureError::UnknownConnection(missing.to_string()));
    }

    let mut executors = HashMap::new();
    for name in wanted {
        let profile = &config.connections[name];
        executors.insert(name.to_string(), connect(name, profile, project_dir).await?);
    }
    Ok(executors)
}

fn resolve(project_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
