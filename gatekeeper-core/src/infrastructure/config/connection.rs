// gatekeeper-core/src/infrastructure/config/connection.rs

use std::collections::HashMap;
use std::path::Path;

use crate::domain::project::ConnectionProfile;
use crate::infrastructure::config::project::load_fragment;
use crate::infrastructure::error::InfrastructureError;

/// Reads `connections.yml` (or `.yaml`) from `config_dir`.
/// `Ok(None)` when the folder has no connections file.
pub fn load_connections(
    config_dir: &Path,
) -> Result<Option<HashMap<String, ConnectionProfile>>, InfrastructureError> {
    let paths = [
        config_dir.join("connections.yml"),
        config_dir.join("connections.yaml"),
    ];

    match paths.iter().find(|p| p.exists()) {
        Some(path) => load_fragment(path).map(Some),
        None => Ok(None),
    }
}
