use crate::error::{AuditError, Result};
use std::path::{Path, PathBuf};

/// File a screenshot for the link at `index` is written to
pub fn screenshot_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("screenshot{}.png", index))
}

/// Create `dir` (and its parents) if it does not exist yet
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AuditError::io(dir, e))
}
