//! Metadata preservation.
//! Optionally copies permissions and timestamps from source to destination
//! after a copy fallback (a plain rename keeps them anyway).

use anyhow::Result;
use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;

pub(super) fn maybe_preserve_metadata(src: &Path, dest: &Path, preserve: bool) -> Result<()> {
    if !preserve {
        return Ok(());
    }

    let meta =
        fs::metadata(src).map_err(|e| anyhow::anyhow!("stat {} failed: {}", src.display(), e))?;

    let at = FileTime::from_last_access_time(&meta);
    let mt = FileTime::from_last_modification_time(&meta);
    let _ = set_file_times(dest, at, mt);

    // Unix mode bits, or the readonly flag elsewhere.
    let _ = fs::set_permissions(dest, meta.permissions());

    Ok(())
}
