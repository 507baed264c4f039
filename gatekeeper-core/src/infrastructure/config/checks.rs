// gatekeeper-core/src/infrastructure/config/checks.rs

use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::project::{CheckDefinition, CheckFile, ProjectConfig};
use crate::infrastructure::config::project::load_fragment;
use crate::infrastructure::error::InfrastructureError;

/// Collects check definitions from every `check-paths` folder, recursively.
/// Files are visited in name order so suites run in a stable order.
#[instrument(skip_all)]
pub fn discover_checks(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<Vec<CheckDefinition>, InfrastructureError> {
    let mut checks = Vec::new();
    let mut seen = HashSet::new();

    for folder in &config.check_paths {
        let checks_dir = project_dir.join(folder);
        if !checks_dir.exists() {
            debug!(dir = ?checks_dir, "Check folder missing, skipping");
            continue;
        }

        let walker = WalkDir::new(&checks_dir)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| InfrastructureError::Io(e.into()))?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml");
            if !entry.file_type().is_file() || !is_yaml {
                continue;
            }

            let file: CheckFile = load_fragment(path)?;
            for mut check in file.checks {
                if !seen.insert(check.name.clone()) {
                    return Err(InfrastructureError::ConfigError(format!(
                        "duplicate check name '{}' in {}",
                        check.name,
                        path.display()
                    )));
                }
                check.source_file = Some(path.to_path_buf());
                checks.push(check);
            }
        }
    }

    info!(count = checks.len(), "Check definitions discovered");
    Ok(checks)
}
