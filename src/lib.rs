/*!
 * Jagged Array Library
 * Tracked allocation, population, printing and teardown of a 3D jagged array
 */

pub mod array;
pub mod cli;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod output;

// Re-exports
pub use array::{build, teardown, BuildError, Built, JaggedArray, Progress, ReleaseReport};
pub use cli::{run, AppError, ArgError, RunSummary};
pub use crate::core::types::{Dimensions, Elem, Layer};
pub use memory::{AllocationStats, Allocator, FaultPlan, MemoryConfig, MemoryError, MemoryManager};
pub use monitoring::init_tracing;
