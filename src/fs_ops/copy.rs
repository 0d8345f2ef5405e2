//! Safe copy-and-rename helper:
//! - Copies to a temp file in the destination directory
//! - Ensures data durability (io_copy::copy_streaming fsyncs the temp file)
//! - Atomically renames temp -> dest (replacing an existing destination)

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::{io_copy, meta, util};

/// Copy src -> temp in dest dir, then atomic rename temp -> dest.
pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<()> {
    safe_copy_and_rename_with_metadata(src, dest, false)
}

/// Same as `safe_copy_and_rename`, optionally carrying permissions and
/// timestamps over to the temp file before it is renamed into place.
pub(super) fn safe_copy_and_rename_with_metadata(src: &Path, dest: &Path, preserve: bool) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    let tmp_path = util::unique_temp_path(dest_dir);

    if let Err(e) = io_copy::copy_streaming(src, &tmp_path) {
        // AlreadyExists means the temp name belongs to someone else.
        if e.kind() != std::io::ErrorKind::AlreadyExists {
            let _ = fs::remove_file(&tmp_path);
        }
        return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
    }

    if let Err(e) = meta::maybe_preserve_metadata(src, &tmp_path, preserve) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        });
    }

    Ok(())
}
