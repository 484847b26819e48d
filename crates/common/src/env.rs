//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the parent directory of a file-backed database exists.
pub async fn ensure_parent_dir(file_path: &str) -> anyhow::Result<()> {
    let Some(parent) = Path::new(file_path).parent() else { return Ok(()) };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    if tokio::fs::metadata(parent).await.is_err() {
        info!(dir = %parent.display(), "creating database directory");
    }
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    Ok(())
}
