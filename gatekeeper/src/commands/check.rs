// gatekeeper/src/commands/check.rs
//
// USE CASE: Run the quality checks of a project.

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use gatekeeper_core::application::{CheckStatus, SuiteReport, run_suite, select_checks, write_report};
use gatekeeper_core::infrastructure::adapters::connect_named;
use gatekeeper_core::infrastructure::config::{discover_checks, load_project_config};
use gatekeeper_core::ErrorCategory;

pub async fn execute(project_dir: PathBuf, select: Option<String>) -> anyhow::Result<()> {
    let start = Instant::now();

    let (report, report_path) = run(&project_dir, select.as_deref()).await?;

    println!("{}", results_table(&report));
    println!("   Report: {}", report_path.display());

    if report.success {
        println!(
            "\n✨ SUCCESS! {} check(s) passed in {:.2?}",
            report.count(CheckStatus::Passed),
            start.elapsed()
        );
        return Ok(());
    }

    for check in &report.checks {
        if let Some(failure) = &check.failure {
            eprintln!("\n❌ FAILURE. Check '{}' on {}: {}", check.name, check.target, failure);
        }
        if let Some(error) = &check.error {
            eprintln!("\n💥 ERROR. Check '{}' on {}: {}", check.name, check.target, error);
        }
    }

    // Exit code tells the scheduler why the run failed
    let category = report.halted_by().unwrap_or(ErrorCategory::Internal);
    std::process::exit(category.exit_code());
}

async fn run(project_dir: &Path, select: Option<&str>) -> anyhow::Result<(SuiteReport, PathBuf)> {
    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_project_config(project_dir).with_context(|| {
        format!("Failed to load project configuration from {:?}", project_dir)
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    // B. Discover and select checks
    let discovered = discover_checks(project_dir, &config)
        .with_context(|| format!("Failed to discover checks in {:?}", project_dir))?;
    let checks = select_checks(discovered, select)
        .with_context(|| format!("Failed to select checks of project {}", config.name))?;
    println!("   Checks: {}", checks.len());

    // C. Open only the connections the selected checks use
    let connections: Vec<String> = checks
        .iter()
        .map(|c| {
            c.connection
                .clone()
                .unwrap_or_else(|| config.default_connection.clone())
        })
        .collect();
    debug!(connections = ?connections, "Opening connections");
    let executors = connect_named(&config, project_dir, connections.iter().map(String::as_str))
        .await
        .with_context(|| format!("Failed to open connections {:?}", connections))?;

    // D. Run the suite (Application Layer)
    let report = run_suite(&config.name, checks, &config.default_connection, &executors).await;

    // E. Persist the run report, whatever the outcome
    let target_dir = project_dir.join(&config.target_path);
    let path = write_report(&target_dir, &report)
        .with_context(|| format!("Failed to write the run report to {:?}", target_dir))?;

    Ok((report, path))
}

fn results_table(report: &SuiteReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Check", "Target", "Connection", "Status", "Assertions run"]);

    for check in &report.checks {
        let status = match check.status {
            CheckStatus::Passed => "✅ passed",
            CheckStatus::Failed => "❌ failed",
            CheckStatus::Error => "💥 error",
            CheckStatus::Skipped => "⏭️ skipped",
        };
        table.add_row(vec![
            check.name.clone(),
            check.target.clone(),
            check.connection.clone(),
            status.to_string(),
            check.results.len().to_string(),
        ]);
    }
    table
}
