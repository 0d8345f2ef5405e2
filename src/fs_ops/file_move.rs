//! File move implementation.
//! Attempts atomic rename. Only a cross-filesystem rename falls back to safe
//! copy+rename followed by removal of the source; any other rename error is
//! returned with nothing touched.

use anyhow::{Result, bail};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename_with_metadata;
use super::helpers::io_error_with_help;
use super::util::is_cross_device;

/// Move `src` to exactly `dest`, replacing `dest` if it exists.
/// Collision policy is the caller's job; by the time we get here the
/// overwrite has been approved (or `dest` was absent).
pub fn move_file(src: &Path, dest: &Path, preserve_metadata: bool) -> Result<()> {
    let lmeta = fs::symlink_metadata(src).map_err(io_error_with_help("stat source", src))?;

    let err = match try_atomic_move(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
            return Ok(());
        }
        Err(e) => e,
    };

    let cross_device = err.downcast_ref::<io::Error>().is_some_and(is_cross_device);
    if !cross_device {
        return Err(err);
    }

    // Copying would follow the link and duplicate its target's content.
    if lmeta.file_type().is_symlink() {
        bail!("{err:#}; symbolic links are only moved by rename");
    }

    warn!(error = %err, "Rename crosses filesystems, using safe copy+rename");

    safe_copy_and_rename_with_metadata(src, dest, preserve_metadata)?;
    fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
    debug!(src = %src.display(), dest = %dest.display(), "Copied file and removed source");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn moves_into_empty_slot() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("in").child("a.txt");
        src.write_str("hello").unwrap();
        temp.child("out").create_dir_all().unwrap();
        let dest = temp.child("out").child("a.txt");

        move_file(src.path(), dest.path(), false).unwrap();
        assert!(!src.path().exists());
        assert_eq!(std::fs::read_to_string(dest.path()).unwrap(), "hello");
    }

    #[test]
    fn replaces_existing_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a.txt");
        src.write_str("new").unwrap();
        let dest = temp.child("out").child("a.txt");
        dest.write_str("old").unwrap();

        move_file(src.path(), dest.path(), false).unwrap();
        assert_eq!(std::fs::read_to_string(dest.path()).unwrap(), "new");
    }

    #[test]
    fn missing_source_is_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = move_file(&temp.path().join("ghost"), &temp.path().join("x"), false).unwrap_err();
        assert!(format!("{err}").contains("stat source"));
    }

    #[test]
    fn file_never_replaces_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("a");
        src.write_str("data").unwrap();
        let dest = temp.child("out").child("a");
        dest.create_dir_all().unwrap();

        assert!(move_file(src.path(), dest.path(), false).is_err());
        assert!(src.path().exists(), "source must stay in place");
        assert!(dest.path().is_dir());
        // no temp files left behind
        let leftovers: Vec<_> = std::fs::read_dir(temp.child("out").path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".hoist."))
            .collect();
        assert!(leftovers.is_empty());
    }
}
