// gatekeeper-core/src/application/clean.rs

use crate::error::GatekeeperError;
use crate::infrastructure::config::project::load_project_config;
use std::fs;
use std::path::Path;

/// Removes report artifacts: the `target-path` directory plus every entry of
/// `clean-targets`. Returns what was removed.
pub fn clean_project(project_dir: &Path) -> Result<Vec<String>, GatekeeperError> {
    tracing::info!("🧹 Cleaning gate artifacts...");

    let config = load_project_config(project_dir)?;
    let mut targets = config.clean_targets;

    // target-path may point outside the project (env override); it is only
    // removed when it resolves inside
    if !targets.contains(&config.target_path) {
        if is_inside(project_dir, &config.target_path) {
            targets.push(config.target_path);
        } else {
            tracing::warn!(
                target_path = %config.target_path,
                "Target path outside the project, leaving it in place"
            );
        }
    }

    let mut removed = Vec::new();
    for target_rel_path in targets {
        if !is_inside(project_dir, &target_rel_path) {
            return Err(GatekeeperError::UnsafePath(target_rel_path));
        }
        let full_path = project_dir.join(&target_rel_path);

        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            println!("   🗑️  Artifact removed: {}", target_rel_path);
            removed.push(target_rel_path);
        }
    }

    Ok(removed)
}

// Path traversal guard: only paths lexically inside the project
fn is_inside(project_dir: &Path, rel_path: &str) -> bool {
    !rel_path.split(['/', '\\']).any(|part| part == "..")
        && project_dir.join(rel_path).starts_with(project_dir)
}
