//! CLI definition and parsing.
//! Defines Args and converts them into a TraversalConfig.
//!
//! Notes:
//! - Patterns are compiled while parsing, so a malformed regex is a usage error.
//! - --include and --exclude conflict at the parser level.
//! - --verbose implies --log-level info unless a level is given explicitly.

use clap::{Parser, ValueHint};
use regex::Regex;
use std::path::PathBuf;

use crate::config::{LogLevel, TraversalConfig};
use crate::errors::HoistError;
use crate::filter::{self, PathFilter};

/// Recursively moves files in subdirectories to the root path (or to
/// --destination). Moves all files if --include or --exclude are not supplied.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Collect files from a directory tree into one folder")]
pub struct Args {
    /// Root path(s) where crawling should begin. Defaults to the current directory.
    #[arg(value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub paths: Vec<PathBuf>,

    /// Directory that receives the files (defaults to the first PATH).
    #[arg(short = 'd', long, value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Only files whose path matches this regex are moved.
    #[arg(
        short = 'i',
        long,
        value_name = "PATTERN",
        value_parser = parse_pattern,
        conflicts_with = "exclude"
    )]
    pub include: Option<Regex>,

    /// Files whose path matches this regex are left in place.
    #[arg(short = 'x', long, value_name = "PATTERN", value_parser = parse_pattern)]
    pub exclude: Option<Regex>,

    /// Include hidden (dot-prefixed) directories and files.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Print every skip/include/exclude decision and start/end banners.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show what would be moved without touching the filesystem.
    #[arg(short = 'D', long = "dry", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Follow symbolic links to directories (loops are detected and skipped).
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// When a move has to copy across filesystems, keep permissions and timestamps.
    #[arg(long)]
    pub preserve_metadata: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_pattern(s: &str) -> Result<Regex, HoistError> {
    filter::compile(s)
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --log-level > --verbose > None (use default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if let Some(level) = &self.log_level {
            return Some(level.clone());
        }
        self.verbose.then_some(LogLevel::Info)
    }

    /// Build the run configuration. Both filters at once is rejected even when
    /// Args was constructed without going through the parser.
    pub fn to_config(&self) -> Result<TraversalConfig, HoistError> {
        let filter = match (&self.include, &self.exclude) {
            (Some(_), Some(_)) => return Err(HoistError::ConflictingFilters),
            (Some(re), None) => PathFilter::Include(re.clone()),
            (None, Some(re)) => PathFilter::Exclude(re.clone()),
            (None, None) => PathFilter::All,
        };
        let mut cfg = TraversalConfig::new(self.paths.clone(), self.destination.clone());
        cfg.filter = filter;
        cfg.include_hidden = self.all;
        cfg.verbose = self.verbose;
        cfg.dry_run = self.dry_run;
        cfg.follow_links = self.follow_links;
        cfg.preserve_metadata = self.preserve_metadata;
        Ok(cfg)
    }
}

pub fn parse() -> Args {
    Args::parse()
}
