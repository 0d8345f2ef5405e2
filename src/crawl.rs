//! Directory traversal.
//!
//! Walks each root depth-first on walkdir's explicit stack, so deep trees
//! cannot overflow the call stack. Directories are always descended into
//! (hidden ones excepted); only files go through the filter and the mover.
//! Each directory is listed in full before any of its entries is moved, so
//! moving files out of (or into) a directory mid-walk cannot disturb the
//! listing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::HoistError;
use crate::filter::should_include;
use crate::output as out;
use crate::overwrite::OverwritePrompt;
use crate::relocate::{Relocator, is_hidden_name};
use crate::shutdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A path seen during traversal, classified once.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl From<walkdir::DirEntry> for DirectoryEntry {
    fn from(entry: walkdir::DirEntry) -> Self {
        // Unfollowed symlinks are not directories here; they move as links.
        let kind = if entry.file_type().is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        Self {
            path: entry.into_path(),
            kind,
        }
    }
}

impl<P: OverwritePrompt> Relocator<'_, P> {
    /// Walk `root` and relocate every matching file. Problems with one
    /// directory are reported and that subtree is skipped.
    pub fn crawl(&mut self, root: &Path) {
        if let Err(e) = check_root(root) {
            self.report_dir_error(e);
            return;
        }

        let include_hidden = self.config.include_hidden;
        let mut it = WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
            .into_iter();

        while let Some(item) = it.next() {
            if shutdown::is_requested() {
                warn!(root = %root.display(), "shutdown requested; stopping traversal");
                self.report.interrupted = true;
                return;
            }

            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    self.report_dir_error(classify_walk_error(err, root));
                    continue;
                }
            };

            // Roots were named explicitly, so only descendants can be hidden.
            // walkdir has already read (and sorted) a hidden directory's listing
            // by the time it is yielded; skip_current_dir discards it unvisited,
            // along with any error reading it.
            if !include_hidden && entry.depth() > 0 && is_hidden_name(entry.file_name()) {
                if entry.file_type().is_dir() {
                    it.skip_current_dir();
                }
                self.report.hidden_skipped += 1;
                debug!(path = %entry.path().display(), "skipping hidden path");
                if self.config.verbose {
                    out::print_detail(&format!("{}: hidden, skipped", entry.path().display()));
                }
                continue;
            }

            let entry = DirectoryEntry::from(entry);
            match entry.kind {
                EntryKind::Directory => {
                    debug!(path = %entry.path.display(), "descending");
                }
                EntryKind::File => {
                    if should_include(&entry.path, self.config) {
                        self.relocate(&entry.path);
                    } else {
                        self.report.excluded += 1;
                    }
                }
            }
        }
    }

    fn report_dir_error(&mut self, e: HoistError) {
        self.report.unreadable += 1;
        debug!(code = e.code(), kind = e.kind(), "{e}");
        out::print_error(&e.to_string());
    }
}

/// A root must exist and be a directory.
fn check_root(root: &Path) -> Result<(), HoistError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(HoistError::NotADirectory(root.to_path_buf())),
        Err(e) => Err(classify_io(root, &e)),
    }
}

fn classify_io(path: &Path, e: &io::Error) -> HoistError {
    match e.kind() {
        io::ErrorKind::NotFound => HoistError::PathNotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => HoistError::PermissionDenied(path.to_path_buf()),
        _ => HoistError::Walk {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}

fn classify_walk_error(err: walkdir::Error, root: &Path) -> HoistError {
    let path = err.path().unwrap_or(root).to_path_buf();
    if let Some(ancestor) = err.loop_ancestor() {
        return HoistError::SymlinkLoop {
            ancestor: ancestor.to_path_buf(),
            path,
        };
    }
    match err.io_error() {
        Some(ioe) => classify_io(&path, ioe),
        None => HoistError::Walk {
            path,
            reason: err.to_string(),
        },
    }
}
