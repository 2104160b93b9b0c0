/*!
 * Command Line
 * Argument validation and the top-level run function
 */

pub mod app;
pub mod args;

pub use app::{parse_args, run, AppError, RunSummary};
pub use args::{parse_dimensions, parse_extent, program_name, ArgError};
