//! Include/exclude filtering of file paths.
//!
//! Patterns are unanchored regex searches over the full path string, so a
//! pattern like `/build/` targets a path segment rather than a file name.
//! Filters apply to files only; directories are always descended into.

use regex::Regex;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::config::TraversalConfig;
use crate::errors::HoistError;
use crate::output as out;

/// At most one of include/exclude, enforced by the type.
#[derive(Debug, Clone, Default)]
pub enum PathFilter {
    /// No filtering: move everything.
    #[default]
    All,
    /// Only paths matching the pattern are moved.
    Include(Regex),
    /// Paths matching the pattern are left alone.
    Exclude(Regex),
}

impl PathFilter {
    /// Build a filter from raw patterns. Supplying both is a config error.
    pub fn from_patterns(include: Option<&str>, exclude: Option<&str>) -> Result<Self, HoistError> {
        match (include, exclude) {
            (Some(_), Some(_)) => Err(HoistError::ConflictingFilters),
            (Some(p), None) => Ok(PathFilter::Include(compile(p)?)),
            (None, Some(p)) => Ok(PathFilter::Exclude(compile(p)?)),
            (None, None) => Ok(PathFilter::All),
        }
    }
}

impl fmt::Display for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathFilter::All => f.write_str("<all>"),
            PathFilter::Include(re) => write!(f, "include /{}/", re.as_str()),
            PathFilter::Exclude(re) => write!(f, "exclude /{}/", re.as_str()),
        }
    }
}

/// Compile a user pattern, keeping the text for error messages.
pub fn compile(pattern: &str) -> Result<Regex, HoistError> {
    Regex::new(pattern).map_err(|source| HoistError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Decide whether the file at `path` should be relocated.
pub fn should_include(path: &Path, config: &TraversalConfig) -> bool {
    let text = path.to_string_lossy();
    match &config.filter {
        PathFilter::Exclude(re) if re.is_match(&text) => {
            debug!(path = %text, pattern = re.as_str(), "excluded by pattern");
            if config.verbose {
                out::print_detail(&format!("{}: file excluded by pattern", text));
            }
            false
        }
        PathFilter::Exclude(_) | PathFilter::All => true,
        PathFilter::Include(re) => {
            if re.is_match(&text) {
                debug!(path = %text, pattern = re.as_str(), "included by pattern");
                if config.verbose {
                    out::print_detail(&format!("{}: file included by pattern", text));
                }
                true
            } else {
                false
            }
        }
    }
}
