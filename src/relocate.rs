//! The relocator: run-scoped state plus the per-file move decision.
//!
//! One `Relocator` lives for one run. It owns the overwrite policy, the
//! prompt and the report, so nothing here is global.

use humansize::{DECIMAL, format_size};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::TraversalConfig;
use crate::errors::HoistError;
use crate::fs_ops::move_file;
use crate::output as out;
use crate::overwrite::{Answer, Collision, OverwritePolicy, OverwritePrompt};

/// Source and destination for one matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl MoveOperation {
    /// `destination_dir / base_name(source)`.
    pub fn plan(source: &Path, destination_dir: &Path) -> Result<Self, HoistError> {
        let name = source.file_name().ok_or_else(|| HoistError::MoveFailed {
            src: source.to_path_buf(),
            dest: destination_dir.to_path_buf(),
            reason: "source has no file name".into(),
        })?;
        Ok(Self {
            source: source.to_path_buf(),
            destination: destination_dir.join(name),
        })
    }

    fn failed(&self, reason: impl Into<String>) -> HoistError {
        HoistError::MoveFailed {
            src: self.source.clone(),
            dest: self.destination.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MoveOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.display(), self.destination.display())
    }
}

/// What happened to one file.
#[derive(Debug)]
pub enum Outcome {
    /// Moved into a free slot.
    Moved(PathBuf),
    /// Moved over an existing file, with the operator's approval.
    Overwrote(PathBuf),
    /// Already at its destination.
    Unchanged,
    /// Dry run: would have been moved here.
    WouldMove(PathBuf),
    /// Collision declined; both files left alone.
    Declined,
    /// Left in place because the move failed.
    Failed(HoistError),
}

/// Counters for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub moved: usize,
    pub overwritten: usize,
    pub unchanged: usize,
    pub planned: usize,
    pub declined: usize,
    pub failed: usize,
    pub excluded: usize,
    pub hidden_skipped: usize,
    pub unreadable: usize,
    pub interrupted: bool,
}

impl RunReport {
    pub(crate) fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Moved(_) => self.moved += 1,
            Outcome::Overwrote(_) => self.overwritten += 1,
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::WouldMove(_) => self.planned += 1,
            Outcome::Declined => self.declined += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    /// Anything the operator should look at.
    pub fn has_problems(&self) -> bool {
        self.failed > 0 || self.unreadable > 0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.planned > 0 {
            write!(f, "{} would move, ", self.planned)?;
        }
        write!(
            f,
            "{} moved, {} overwritten, {} already in place, {} declined, {} failed, {} excluded, {} hidden skipped, {} unreadable",
            self.moved,
            self.overwritten,
            self.unchanged,
            self.declined,
            self.failed,
            self.excluded,
            self.hidden_skipped,
            self.unreadable
        )?;
        if self.interrupted {
            f.write_str(" (interrupted)")?;
        }
        Ok(())
    }
}

pub struct Relocator<'a, P: OverwritePrompt> {
    pub(crate) config: &'a TraversalConfig,
    prompt: P,
    policy: OverwritePolicy,
    /// Destination with symlinks resolved, for the already-in-place check.
    dest_real: PathBuf,
    /// Dry run only: destinations already promised to an earlier file.
    planned_dests: HashSet<PathBuf>,
    pub(crate) report: RunReport,
}

impl<'a, P: OverwritePrompt> Relocator<'a, P> {
    pub fn new(config: &'a TraversalConfig, prompt: P) -> Self {
        let dest_real =
            fs::canonicalize(&config.destination).unwrap_or_else(|_| config.destination.clone());
        Self {
            config,
            prompt,
            policy: OverwritePolicy::default(),
            dest_real,
            planned_dests: HashSet::new(),
            report: RunReport::default(),
        }
    }

    pub fn policy(&self) -> OverwritePolicy {
        self.policy
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Crawl every root in order and return the report.
    pub fn run(mut self) -> RunReport {
        if self.config.verbose {
            out::print_info(&format!(
                "Crawl in progress... do not cancel ({} -> {}, {})",
                self.config
                    .roots
                    .iter()
                    .map(|r| r.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                self.config.destination.display(),
                self.config.filter
            ));
        }
        for root in &self.config.roots {
            if crate::shutdown::is_requested() {
                self.report.interrupted = true;
                break;
            }
            self.crawl(root);
        }
        self.report
    }

    /// Move one file into the destination, resolving collisions.
    /// Never panics and never propagates: failures come back as `Outcome::Failed`.
    pub fn relocate(&mut self, source: &Path) -> Outcome {
        let outcome = match MoveOperation::plan(source, &self.config.destination) {
            Ok(op) => self.execute(&op),
            Err(e) => Outcome::Failed(e),
        };
        if let Outcome::Failed(e) = &outcome {
            debug!(code = e.code(), kind = e.kind(), "{e}");
            out::print_error(&e.to_string());
        }
        self.report.record(&outcome);
        outcome
    }

    fn execute(&mut self, op: &MoveOperation) -> Outcome {
        if self.already_in_place(&op.source) {
            debug!(path = %op.source.display(), "already at destination");
            return Outcome::Unchanged;
        }

        // symlink_metadata so a dangling link at the destination still counts.
        let existing = fs::symlink_metadata(&op.destination).ok();

        if self.config.dry_run {
            let repeat = !self.planned_dests.insert(op.destination.clone());
            if existing.is_some() || repeat {
                out::print_user(&format!("{op} (destination exists)"));
            } else {
                out::print_user(&op.to_string());
            }
            info!(src = %op.source.display(), dest = %op.destination.display(), "dry-run: would move file");
            return Outcome::WouldMove(op.destination.clone());
        }

        let overwriting = match &existing {
            None => false,
            Some(meta) if meta.is_dir() => {
                return Outcome::Failed(op.failed("destination is a directory"));
            }
            Some(meta) => {
                if !self.confirm_overwrite(op, meta.len()) {
                    info!(src = %op.source.display(), dest = %op.destination.display(), "overwrite declined");
                    if self.config.verbose {
                        out::print_detail(&format!("{}: skipped, destination kept", op.source.display()));
                    }
                    return Outcome::Declined;
                }
                true
            }
        };

        match move_file(&op.source, &op.destination, self.config.preserve_metadata) {
            Ok(()) => {
                out::print_user(&op.to_string());
                info!(src = %op.source.display(), dest = %op.destination.display(), overwriting, "Moved file");
                if overwriting {
                    Outcome::Overwrote(op.destination.clone())
                } else {
                    Outcome::Moved(op.destination.clone())
                }
            }
            Err(e) => Outcome::Failed(op.failed(format!("{e:#}"))),
        }
    }

    /// Collision state machine. Returns true when the destination may be replaced.
    fn confirm_overwrite(&mut self, op: &MoveOperation, existing_len: u64) -> bool {
        if self.policy == OverwritePolicy::OverwriteAll {
            debug!(dest = %op.destination.display(), "overwriting without prompt");
            return true;
        }

        let source_len = fs::metadata(&op.source).map(|m| m.len()).unwrap_or(0);
        out::print_warn(&format!(
            "{} already exists (incoming {}: {}, existing: {})",
            op.destination.display(),
            op.source.display(),
            format_size(source_len, DECIMAL),
            format_size(existing_len, DECIMAL)
        ));

        let collision = Collision {
            source: &op.source,
            destination: &op.destination,
            source_len,
            existing_len,
        };
        let answer = match self.prompt.ask(&collision) {
            Ok(response) => Answer::parse(&response),
            Err(e) => {
                warn!(error = %e, dest = %op.destination.display(), "no answer; keeping destination");
                Answer::No
            }
        };
        self.policy.record(answer);
        answer.overwrites()
    }

    /// True when `source` already sits directly in the destination directory.
    fn already_in_place(&self, source: &Path) -> bool {
        let parent = match source.parent() {
            Some(p) if p.as_os_str().is_empty() => Path::new("."),
            Some(p) => p,
            None => return false,
        };
        match fs::canonicalize(parent) {
            Ok(real) => real == self.dest_real,
            Err(_) => parent == self.config.destination,
        }
    }
}

/// Hidden: a dot followed by at least one more character.
pub fn is_hidden_name(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    bytes.len() > 1 && bytes[0] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overwrite::ScriptedPrompt;
    use assert_fs::prelude::*;

    fn config(root: &Path, dest: &Path) -> TraversalConfig {
        TraversalConfig::new(vec![root.to_path_buf()], Some(dest.to_path_buf()))
    }

    #[test]
    fn plan_joins_base_name() {
        let op = MoveOperation::plan(Path::new("/src/sub/b.txt"), Path::new("/out")).unwrap();
        assert_eq!(op.destination, PathBuf::from("/out/b.txt"));
        assert_eq!(op.to_string(), "/src/sub/b.txt -> /out/b.txt");
    }

    #[test]
    fn plan_rejects_nameless_source() {
        assert!(matches!(
            MoveOperation::plan(Path::new("/"), Path::new("/out")),
            Err(HoistError::MoveFailed { .. })
        ));
    }

    #[test]
    fn hidden_names() {
        assert!(is_hidden_name(OsStr::new(".git")));
        assert!(is_hidden_name(OsStr::new(".a")));
        assert!(!is_hidden_name(OsStr::new(".")));
        assert!(!is_hidden_name(OsStr::new("a.b")));
        assert!(!is_hidden_name(OsStr::new("visible")));
    }

    #[test]
    fn file_in_destination_is_unchanged_without_prompt() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("a.txt");
        f.write_str("x").unwrap();
        let cfg = config(temp.path(), temp.path());
        let mut r = Relocator::new(&cfg, ScriptedPrompt::default());
        assert!(matches!(r.relocate(f.path()), Outcome::Unchanged));
        assert_eq!(r.prompt().asked(), 0);
        assert!(f.path().exists());
    }

    #[test]
    fn in_place_check_resolves_dot_segments() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("out").create_dir_all().unwrap();
        let f = temp.child("out").child("a.txt");
        f.write_str("x").unwrap();
        let cfg = config(temp.path(), &temp.path().join("out"));
        let mut r = Relocator::new(&cfg, ScriptedPrompt::default());
        let odd = temp.path().join("out").join(".").join("a.txt");
        assert!(matches!(r.relocate(&odd), Outcome::Unchanged));
    }

    #[test]
    fn collision_yes_overwrites_once() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("in").child("a.txt");
        src.write_str("new").unwrap();
        let existing = temp.child("out").child("a.txt");
        existing.write_str("old!").unwrap();

        let cfg = config(temp.path(), &temp.path().join("out"));
        let mut r = Relocator::new(&cfg, ScriptedPrompt::new(["Ye"]));
        assert!(matches!(r.relocate(src.path()), Outcome::Overwrote(_)));
        assert_eq!(r.policy(), OverwritePolicy::AskEachTime);
        assert_eq!(std::fs::read_to_string(existing.path()).unwrap(), "new");
        assert!(!src.path().exists());
        assert_eq!(r.report().overwritten, 1);
    }

    #[test]
    fn collision_decline_keeps_both() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("in").child("a.txt");
        src.write_str("new").unwrap();
        let existing = temp.child("out").child("a.txt");
        existing.write_str("old").unwrap();

        let cfg = config(temp.path(), &temp.path().join("out"));
        let mut r = Relocator::new(&cfg, ScriptedPrompt::new(["nope"]));
        assert!(matches!(r.relocate(src.path()), Outcome::Declined));
        assert_eq!(std::fs::read_to_string(existing.path()).unwrap(), "old");
        assert_eq!(std::fs::read_to_string(src.path()).unwrap(), "new");
        assert_eq!(r.report().declined, 1);
    }

    #[test]
    fn directory_at_destination_fails_without_prompt() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("in").child("a");
        src.write_str("data").unwrap();
        temp.child("out").child("a").create_dir_all().unwrap();

        let cfg = config(temp.path(), &temp.path().join("out"));
        let mut r = Relocator::new(&cfg, ScriptedPrompt::new(["all"]));
        match r.relocate(src.path()) {
            Outcome::Failed(e) => assert_eq!(e.code(), 30),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(r.prompt().asked(), 0);
        assert!(src.path().exists());
    }

    #[test]
    fn dry_run_reports_but_does_not_move() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("in").child("a.txt");
        src.write_str("x").unwrap();
        let mut cfg = config(temp.path(), &temp.path().join("out"));
        cfg.dry_run = true;
        let mut r = Relocator::new(&cfg, ScriptedPrompt::default());
        match r.relocate(src.path()) {
            Outcome::WouldMove(dest) => assert_eq!(dest, temp.path().join("out").join("a.txt")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(src.path().exists());
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn dry_run_remembers_planned_destinations() {
        let temp = assert_fs::TempDir::new().unwrap();
        let first = temp.child("a").child("dup.txt");
        let second = temp.child("b").child("dup.txt");
        first.write_str("1").unwrap();
        second.write_str("2").unwrap();
        let out = temp.path().join("out");
        let mut cfg = config(temp.path(), &out);
        cfg.dry_run = true;
        let mut r = Relocator::new(&cfg, ScriptedPrompt::default());
        assert!(matches!(r.relocate(first.path()), Outcome::WouldMove(_)));
        assert!(matches!(r.relocate(second.path()), Outcome::WouldMove(_)));
        assert_eq!(r.planned_dests.len(), 1);
        assert!(r.planned_dests.contains(&out.join("dup.txt")));
        assert_eq!(r.report().planned, 2);
        assert_eq!(r.prompt().asked(), 0);
    }

    #[test]
    fn report_summary_mentions_counts() {
        let mut report = RunReport::default();
        report.record(&Outcome::Moved(PathBuf::from("x")));
        report.record(&Outcome::Declined);
        let text = report.to_string();
        assert!(text.starts_with("1 moved"), "{text}");
        assert!(text.contains("1 declined"), "{text}");
        assert!(!report.has_problems());
    }
}
