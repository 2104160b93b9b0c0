/*!
 * Memory Types
 * Common types for tracked allocation
 */

use crate::core::types::{Layer, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Cannot allocate memory ({requested} bytes for {layer} layer)")]
    OutOfMemory { layer: Layer, requested: Size },

    #[error("Memory budget exceeded: {layer} layer requested {requested} bytes, {available} of {budget} bytes available")]
    BudgetExceeded {
        layer: Layer,
        requested: Size,
        available: Size,
        budget: Size,
    },

    #[error("Capacity overflow: {layer} layer cannot hold {capacity} elements")]
    CapacityOverflow { layer: Layer, capacity: Size },

    #[error("Injected allocation failure at attempt {attempt} ({layer} layer)")]
    Injected { layer: Layer, attempt: usize },
}

impl MemoryError {
    /// Layer whose allocation failed
    pub fn layer(&self) -> Layer {
        match self {
            MemoryError::OutOfMemory { layer, .. }
            | MemoryError::BudgetExceeded { layer, .. }
            | MemoryError::CapacityOverflow { layer, .. }
            | MemoryError::Injected { layer, .. } => *layer,
        }
    }
}

/// Per-layer allocation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStats {
    pub attempts: usize,
    pub allocations: usize,
    pub releases: usize,
}

impl LayerStats {
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.allocations.saturating_sub(self.releases)
    }
}

/// Snapshot of allocator statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStats {
    /// Allocation calls made, including failed ones
    pub attempts: usize,
    /// Successful allocation calls
    pub allocations: usize,
    /// Blocks released back to the system
    pub releases: usize,
    pub live_bytes: Size,
    pub peak_bytes: Size,
    pub outer: LayerStats,
    pub middle: LayerStats,
    pub inner: LayerStats,
}

impl AllocationStats {
    pub fn layer(&self, layer: Layer) -> &LayerStats {
        match layer {
            Layer::Outer => &self.outer,
            Layer::Middle => &self.middle,
            Layer::Inner => &self.inner,
        }
    }

    /// Allocations not yet matched by a release
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.allocations.saturating_sub(self.releases)
    }

    /// Every successful allocation has exactly one matching release
    pub fn is_balanced(&self) -> bool {
        self.allocations == self.releases
            && Layer::ALL
                .iter()
                .all(|&layer| self.layer(layer).outstanding() == 0)
            && self.live_bytes == 0
    }
}
