// gatekeeper/src/commands/clean.rs
//
// USE CASE: Clean gate artifacts.

use anyhow::Context;
use std::path::PathBuf;

use gatekeeper_core::application::clean_project;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let removed = clean_project(&project_dir)
        .with_context(|| format!("Failed to clean project artifacts in {:?}", project_dir))?;

    if removed.is_empty() {
        println!("✨ Nothing to clean.");
    } else {
        println!("✨ {} artifact(s) removed.", removed.len());
    }
    Ok(())
}
