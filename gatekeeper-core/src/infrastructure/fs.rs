// gatekeeper-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` through a sibling temp file renamed into place,
/// so a reader never sees a half-written report.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Same directory as the destination: rename must not cross filesystems
    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(content.as_ref())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_replaces_previous_report() -> Result<()> {
        let dir = tempdir()?;
        let report = dir.path().join("gate_results.json");

        atomic_write(&report, r#"{"success":false}"#)?;
        atomic_write(&report, r#"{"success":true}"#)?;

        assert_eq!(fs::read_to_string(&report)?, r#"{"success":true}"#);
        // No stray temp files left next to the report
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
}
