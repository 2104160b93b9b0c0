/*!
 * Application Entry
 *
 * Single top-level handler: parse, build, print, tear down. Every failure
 * comes back as an [`AppError`]; nothing below this layer exits the process.
 */

use super::args::{parse_dimensions, program_name, ArgError};
use crate::array::{build, teardown, BuildError, Built, ReleaseReport};
use crate::core::limits::{ALLOCATION_CONTEXT, OUTPUT_CONTEXT};
use crate::core::types::Dimensions;
use crate::memory::Allocator;
use crate::output::{print_allocs, print_array};
use miette::Diagnostic;
use serde::Serialize;
use std::ffi::OsString;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end a run
#[derive(Error, Debug, Diagnostic)]
pub enum AppError {
    #[error("wrong usage!\nusage: {program} <x> <y> <z>")]
    #[diagnostic(
        code(arr3d::usage),
        help("Pass exactly three non-negative integers: the outer, middle and inner extents.")
    )]
    Usage { program: String },

    #[error(transparent)]
    #[diagnostic(
        code(arr3d::argument),
        help("Extents must be base-10 integers that fit the platform word size.")
    )]
    Argument(#[from] ArgError),

    #[error("{}: {}", ALLOCATION_CONTEXT, .0)]
    #[diagnostic(
        code(arr3d::allocation),
        help("The partial array was released. Smaller extents need less memory.")
    )]
    Allocation(#[from] BuildError),

    #[error("{}: {}\n{}: {}", OUTPUT_CONTEXT, .output, ALLOCATION_CONTEXT, .source)]
    #[diagnostic(
        code(arr3d::allocation),
        help("The partial array was released, but the allocation count could not be written.")
    )]
    AllocationUnreported {
        #[source]
        source: BuildError,
        output: io::Error,
    },

    #[error("{}: {}", OUTPUT_CONTEXT, .0)]
    #[diagnostic(
        code(arr3d::output),
        help("Standard output rejected a write. Output already written is kept.")
    )]
    Output(#[from] io::Error),
}

/// What a successful run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub dims: Dimensions,
    pub allocations: usize,
    pub lines: usize,
    pub release: ReleaseReport,
}

/// Check the argument count and parse the extents
///
/// `args` includes the program name at index 0.
pub fn parse_args(args: &[OsString]) -> Result<Dimensions, AppError> {
    match args {
        [_, x, y, z] => Ok(parse_dimensions(&[x, y, z])?),
        _ => Err(AppError::Usage {
            program: program_name(args.first()),
        }),
    }
}

/// Run the program against an allocator and an output sink
///
/// On allocation failure the count line is still written before the error
/// is returned; if that write fails too, both errors are returned together.
/// On output failure the array is torn down before the error is returned.
pub fn run<A, W>(args: &[OsString], allocator: &A, out: &mut W) -> Result<RunSummary, AppError>
where
    A: Allocator,
    W: Write,
{
    let dims = parse_args(args)?;
    info!(%dims, "Building array");

    let Built { array, allocations } = match build(dims, allocator) {
        Ok(built) => built,
        Err(e) => {
            return match print_allocs(out, e.allocations).and_then(|()| out.flush()) {
                Ok(()) => Err(e.into()),
                Err(output) => {
                    warn!(error = %output, "Could not report allocation count");
                    Err(AppError::AllocationUnreported { source: e, output })
                }
            };
        }
    };

    let printed = print_allocs(out, allocations)
        .and_then(|()| print_array(out, &array))
        .and_then(|lines| out.flush().map(|()| lines));

    let release = teardown(array);
    let lines = printed?;

    info!(allocations, lines, released = release.released, "Run complete");
    Ok(RunSummary {
        dims,
        allocations,
        lines,
        release,
    })
}
