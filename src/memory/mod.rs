/*!
 * Memory Module
 * Tracked allocation for the nested array layers
 */

pub mod block;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block::Block;
pub use manager::{FaultPlan, MemoryConfig, MemoryManager};
pub use traits::*;
pub use types::*;
