/*!
 * arr3d - Main Entry Point
 *
 * Allocates a 3D array with the extents given on the command line,
 * populates it with unique values, prints it and releases it.
 */

use jagged_arr::{init_tracing, run, MemoryManager};
use miette::Diagnostic;
use std::ffi::OsString;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use tracing::{debug, error, warn};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<OsString> = std::env::args_os().collect();
    let manager = MemoryManager::new();

    let result = {
        let mut out = BufWriter::new(io::stdout().lock());
        run(&args, &manager, &mut out)
    };

    let stats = manager.stats();
    if !stats.is_balanced() {
        warn!(?stats, "Allocations and releases do not balance");
    }

    match result {
        Ok(summary) => {
            match serde_json::to_string(&summary) {
                Ok(json) => debug!(summary = %json, "Run summary"),
                Err(e) => warn!(error = %e, "Could not serialize run summary"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                code = %e.code().map(|c| c.to_string()).unwrap_or_default(),
                error = %e,
                "arr3d failed"
            );
            let _ = writeln!(io::stderr(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
