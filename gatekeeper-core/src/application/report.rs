// gatekeeper-core/src/application/report.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::application::suite::SuiteReport;
use crate::error::GatekeeperError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const REPORT_FILE: &str = "gate_results.json";

/// Writes `<target_dir>/gate_results.json`, creating the directory if needed.
pub fn write_report(target_dir: &Path, report: &SuiteReport) -> Result<PathBuf, GatekeeperError> {
    if !target_dir.exists() {
        fs::create_dir_all(target_dir)?;
    }

    let path = target_dir.join(REPORT_FILE);
    save_json(&path, report)?;
    info!(path = ?path, "Run report written");
    Ok(path)
}

fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), GatekeeperError> {
    let content = serde_json::to_string_pretty(data).map_err(InfrastructureError::JsonError)?;
    atomic_write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::suite::{CheckReport, CheckStatus};
    use crate::domain::quality::CheckResult;
    use anyhow::Result;
    use chrono::Utc;

    #[test]
    fn test_report_written_as_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("target");

        let report = SuiteReport {
            project: "sparkify".into(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            success: true,
            checks: vec![CheckReport {
                name: "users".into(),
                target: "public.users".into(),
                connection: "warehouse".into(),
                status: CheckStatus::Passed,
                results: vec![CheckResult::new(0, "SELECT COUNT(*) FROM public.users", 5)],
                failure: None,
                error: None,
                category: None,
            }],
        };

        let path = write_report(&target, &report)?;
        assert_eq!(path, target.join(REPORT_FILE));

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(json["success"], true);
        assert_eq!(json["checks"][0]["status"], "passed");
        assert_eq!(json["checks"][0]["results"][0]["actual_value"], 5);
        assert!(json["checks"][0].get("failure").is_none());
        Ok(())
    }
}
