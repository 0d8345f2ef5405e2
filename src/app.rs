//! Application orchestrator.
//! Builds the config from CLI args, initializes logging, installs the interrupt
//! handler, validates the destination and runs the relocator.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

use hoist::cli::Args;
use hoist::output as out;
use hoist::{ConsolePrompt, HoistError, LogLevel, Relocator, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let level = args.effective_log_level().unwrap_or(LogLevel::Normal);

    let guard_opt = init_tracing(&level, args.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let installed = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current file and stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        });
        if let Err(e) = installed {
            warn!(error = %e, "could not install interrupt handler");
        }
    }

    debug!("Starting hoist: {:?}", args);

    let result = (|| -> Result<()> {
        let cfg = args.to_config()?;
        cfg.validate()?;

        let report = Relocator::new(&cfg, ConsolePrompt).run();

        if cfg.verbose {
            out::print_success(&format!("Crawl finished: {report}"));
        } else if report.has_problems() || report.interrupted {
            out::print_warn(&format!("Finished with problems: {report}"));
        }
        // Per-file and per-directory failures were already reported; they do
        // not change the exit status.
        Ok(())
    })();

    if let Err(e) = &result {
        match e.downcast_ref::<HoistError>() {
            Some(he) if he.is_config_error() => {
                error!(code = he.code(), kind = he.kind(), "invalid configuration: {he}")
            }
            Some(he) => error!(code = he.code(), kind = he.kind(), "{he}"),
            None => error!(error = ?e, "run aborted"),
        }
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
