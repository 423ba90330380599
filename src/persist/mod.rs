//! Whole-file text writes.
//!
//! Each save creates or truncates the target, writes the content in one pass,
//! flushes, and releases the handle before returning. A failure partway
//! through may leave a truncated file behind; nothing is cleaned up.

use anyhow::{Context as _, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt as _;
use tracing::{debug, error};

/// Writes `content` to `path`, replacing anything already there.
///
/// # Errors
/// Returns an error if the file cannot be created, written or flushed
pub async fn try_save(content: &str, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    file.flush()
        .await
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Writes `content` to `path`, logging instead of propagating any I/O error.
///
/// Returns `true` once the write completed and the handle was released.
pub async fn save(content: &str, path: impl AsRef<Path>) -> bool {
    match try_save(content, path.as_ref()).await {
        Ok(()) => true,
        Err(e) => {
            error!("Error saving file: {:#}", e);
            false
        }
    }
}
