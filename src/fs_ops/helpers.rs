//! I/O helper utilities.
//!
//! Enriches io::Error with the operation, the path and a platform-aware hint,
//! for use with `map_err` in anyhow::Result code paths:
//!
//!   fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint for a raw OS error code, if we know one.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
        libc::EBUSY | libc::ETXTBSY => Some("resource busy; the file may be in use"),
        libc::ENOENT => Some("path not found; it may have been moved or deleted"),
        libc::EISDIR => Some("destination is a directory"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::EMFILE | libc::ENFILE => Some("too many open files"),
        _ => None,
    }
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),
        17 => Some("not same device; cross-filesystem move"),
        32 => Some("sharing violation; file is in use"),
        2 | 3 => Some("path not found; it may have been moved or deleted"),
        112 => Some("insufficient disk space"),
        19 => Some("write protected / read-only media"),
        206 => Some("filename or path too long"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Some("busy; retry once the file is released"),
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus hints.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(hint) = os_hint(code) {
                msg.push_str("; ");
                msg.push_str(hint);
            }
            msg.push_str(&format!(" [os code: {}]", code));
        }
        None => {
            if let Some(hint) = kind_hint(e.kind()) {
                msg.push_str("; ");
                msg.push_str(hint);
            }
        }
    }
    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
