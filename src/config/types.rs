//! Core configuration types.
//! - TraversalConfig holds the immutable settings for one run.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::DEFAULT_ROOT;
use crate::filter::PathFilter;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// Per-decision events (what `--verbose` selects)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings for one run of the relocator.
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    /// Directories to crawl, in the order given
    pub roots: Vec<PathBuf>,
    /// Where matched files are collected
    pub destination: PathBuf,
    /// Include/exclude pattern applied to file paths
    pub filter: PathFilter,
    /// Descend into (and move) dot-prefixed entries
    pub include_hidden: bool,
    /// Emit per-decision diagnostics and banners
    pub verbose: bool,
    /// If true, report moves but do not modify the filesystem
    pub dry_run: bool,
    /// Follow symbolic links to directories (loops are detected)
    pub follow_links: bool,
    /// Carry permissions and timestamps over when a move has to copy
    pub preserve_metadata: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl TraversalConfig {
    /// Build a config for `roots`. Without an explicit destination the first
    /// root is used, which flattens the tree in place.
    pub fn new(roots: Vec<PathBuf>, destination: Option<PathBuf>) -> Self {
        let roots = if roots.is_empty() {
            vec![PathBuf::from(DEFAULT_ROOT)]
        } else {
            roots
        };
        let destination = destination.unwrap_or_else(|| roots[0].clone());
        Self {
            roots,
            destination,
            filter: PathFilter::All,
            include_hidden: false,
            verbose: false,
            dry_run: false,
            follow_links: false,
            preserve_metadata: false,
        }
    }
}
