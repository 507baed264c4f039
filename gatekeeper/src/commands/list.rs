// gatekeeper/src/commands/list.rs
//
// USE CASE: List discovered checks without running them.

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

use gatekeeper_core::infrastructure::config::{discover_checks, load_project_config};

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!("Failed to load project configuration from {:?}", project_dir)
    })?;
    let checks = discover_checks(&project_dir, &config)
        .with_context(|| format!("Failed to discover checks in {:?}", project_dir))?;

    println!("📋 {} (v{}): {} check(s)", config.name, config.version, checks.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Check", "Target", "Connection", "Assertions", "File"]);

    for check in &checks {
        let assertions = match check.resolve_assertions() {
            Ok(assertions) => assertions.len().to_string(),
            Err(e) => format!("invalid: {}", e),
        };
        let file = check
            .source_file
            .as_ref()
            .and_then(|p| p.strip_prefix(&project_dir).ok())
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        table.add_row(vec![
            check.name.clone(),
            check.target().qualified_name(),
            check
                .connection
                .clone()
                .unwrap_or_else(|| config.default_connection.clone()),
            assertions,
            file,
        ]);
    }

    println!("{table}");
    Ok(())
}
