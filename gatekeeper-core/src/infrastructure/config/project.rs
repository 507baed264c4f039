// gatekeeper-core/src/infrastructure/config/project.rs

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::ProjectConfig;
use crate::infrastructure::config::connection::load_connections;
use crate::infrastructure::error::InfrastructureError;

pub const ENV_TARGET_PATH: &str = "GATEKEEPER_TARGET_PATH";
pub const ENV_CONNECTION: &str = "GATEKEEPER_CONNECTION";

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Main file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");
    let mut config: ProjectConfig = load_fragment(&config_path)?;

    // 2. Connection profiles from the first config folder that has them
    for folder in &config.config_paths {
        let config_dir = project_dir.join(folder);
        if let Some(connections) = load_connections(&config_dir)? {
            info!(count = connections.len(), "  🔌 Connection profiles loaded");
            config.connections = connections;
            break;
        }
    }

    // 3. Environment layering: GATEKEEPER_TARGET_PATH=/tmp/out gatekeeper check
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["gatekeeper.yaml", "gatekeeper.yml"];
    candidates
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "{} (checked: {:?})",
                root.display(),
                candidates
            ))
        })
}

/// Loads a typed YAML fragment; the path is kept in the error.
pub(crate) fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
        path: path.display().to_string(),
        source,
    })
}

fn apply_env_overrides<F>(config: &mut ProjectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup(ENV_TARGET_PATH) {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup(ENV_CONNECTION) {
        info!(old = ?config.default_connection, new = ?val, "Overriding default connection via ENV");
        config.default_connection = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::project::Engine;
    use anyhow::Result;

    #[test]
    fn test_load_with_connections() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("gatekeeper.yaml"),
            "name: sparkify\nversion: '1.0'\ndefault-connection: redshift\n",
        )?;
        fs::create_dir_all(dir.path().join("config"))?;
        fs::write(
            dir.path().join("config/connections.yml"),
            "redshift:\n  type: duckdb\n  path: warehouse.duckdb\n",
        )?;

        let config = load_project_config(dir.path())?;

        assert_eq!(config.name, "sparkify");
        assert_eq!(config.default_connection, "redshift");
        let profile = &config.connections["redshift"];
        assert_eq!(profile.engine, Engine::DuckDB);
        assert_eq!(profile.path.as_deref(), Some("warehouse.duckdb"));
        Ok(())
    }

    #[test]
    fn test_missing_config() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let res = load_project_config(dir.path());
        assert!(matches!(res, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_reports_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("gatekeeper.yml"), "name: [unclosed\n")?;
        match load_project_config(dir.path()) {
            Err(InfrastructureError::YamlError { path, .. }) => {
                assert!(path.ends_with("gatekeeper.yml"));
            }
            other => panic!("expected YamlError, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config: ProjectConfig =
            serde_yaml::from_str("name: sparkify\nversion: '1.0'\n").unwrap();
        apply_env_overrides(&mut config, |key| match key {
            ENV_TARGET_PATH => Some("/tmp/gate".into()),
            ENV_CONNECTION => Some("staging".into()),
            _ => None,
        });
        assert_eq!(config.target_path, "/tmp/gate");
        assert_eq!(config.default_connection, "staging");
    }
}
