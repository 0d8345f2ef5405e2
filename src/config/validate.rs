//! Config validation logic.
//! Verifies the destination before any traversal starts. Roots are not
//! checked here: a missing root is a per-root report, not a fatal error.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::HoistError;

use super::types::TraversalConfig;

impl TraversalConfig {
    /// Validate the destination, creating it when missing (not in dry runs).
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            bail!("no root path to crawl");
        }

        ensure_dir_is_or_create(&self.destination, self.dry_run)?;

        info!(
            roots = ?self.roots,
            destination = %self.destination.display(),
            filter = %self.filter,
            include_hidden = self.include_hidden,
            dry_run = self.dry_run,
            "Config validated"
        );
        Ok(())
    }
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, dry_run: bool) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(HoistError::DestinationNotDir(path.to_path_buf()).into());
        }
        debug!(path = %path.display(), "destination exists");
    } else if dry_run {
        info!(action = "mkdir -p", path = %path.display(), "dry-run");
    } else {
        fs::create_dir_all(path).with_context(|| {
            format!("Failed to create destination directory '{}'", path.display())
        })?;
        info!("Created destination directory: {}", path.display());
    }
    Ok(())
}
