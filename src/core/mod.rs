/*!
 * Core Module
 * Fundamental types and constants shared by every layer
 */

pub mod limits;
pub mod types;

// Re-export for convenience
pub use types::*;
