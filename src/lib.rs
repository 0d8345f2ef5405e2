//! Core library for `hoist`.
//!
//! Walks directory trees and collects matching files into one destination:
//! - `config`: the immutable settings for a run
//! - `filter`: include/exclude patterns over file paths
//! - `crawl`: the traversal (hidden-path pruning, per-directory error reporting)
//! - `relocate`: per-file destination, collision handling and moves
//! - `overwrite`: the yes/no/all policy and the prompt capability
//! - `fs_ops`: rename with a copy fallback across filesystems

pub mod cli;
pub mod config;
pub mod crawl;
pub mod errors;
pub mod filter;
pub mod fs_ops;
pub mod output;
pub mod overwrite;
pub mod relocate;
pub mod shutdown;

pub use config::{LogLevel, TraversalConfig};
pub use crawl::{DirectoryEntry, EntryKind};
pub use errors::HoistError;
pub use filter::{PathFilter, should_include};
pub use overwrite::{Answer, ConsolePrompt, OverwritePolicy, OverwritePrompt, ScriptedPrompt};
pub use relocate::{MoveOperation, Outcome, Relocator, RunReport};

/// Validate `config` and crawl every root with `prompt` answering collisions.
/// Only configuration problems are returned as errors; everything that goes
/// wrong during traversal ends up in the report.
pub fn run<P: OverwritePrompt>(config: &TraversalConfig, prompt: P) -> anyhow::Result<RunReport> {
    config.validate()?;
    Ok(Relocator::new(config, prompt).run())
}
