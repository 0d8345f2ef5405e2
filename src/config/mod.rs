//! Run configuration.
//! Provides the traversal config, log levels and validation. Everything comes
//! from the command line; nothing is persisted.

pub mod types;
mod validate;

pub use types::{LogLevel, TraversalConfig};

/// Root used when no PATH is given on the command line.
pub const DEFAULT_ROOT: &str = ".";
