//! Staging batch persistence between CLI invocations.
//!
//! The staging store lives for one review session; the CLI keeps it in a
//! small JSON file so import, edit and submit can run as separate
//! commands. This is session glue, not a storage engine.

use std::path::Path;

use anyhow::{Context, Result};
use results_model::PendingResult;
use results_staging::StagingStore;
use tracing::debug;

/// Load the staging batch. A missing file is an empty batch.
pub fn load_staging(path: &Path) -> Result<StagingStore> {
    let mut store = StagingStore::new();
    if !path.exists() {
        return Ok(store);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read staging file {}", path.display()))?;
    let rows: Vec<PendingResult> = serde_json::from_str(&content)
        .with_context(|| format!("parse staging file {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "staging loaded");
    store.replace_all(rows);
    Ok(store)
}

/// Persist the staging batch, replacing whatever was there.
pub fn save_staging(path: &Path, store: &StagingStore) -> Result<()> {
    let content = serde_json::to_string_pretty(store.rows()).context("serialize staging")?;
    std::fs::write(path, content)
        .with_context(|| format!("write staging file {}", path.display()))?;
    debug!(path = %path.display(), rows = store.len(), "staging saved");
    Ok(())
}
