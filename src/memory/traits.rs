/*!
 * Memory Traits
 * Allocation abstractions used by the array builder
 */

use super::block::Block;
use super::types::*;
use crate::core::types::{Layer, Size};

/// Layer allocator interface
///
/// Every allocation is returned as an owning [`Block`]; dropping the block
/// is the only way to release it.
pub trait Allocator {
    /// Allocate room for exactly `capacity` values of `T` on `layer`
    fn allocate<T>(&self, layer: Layer, capacity: Size) -> MemoryResult<Block<T>>;

    /// Current allocation statistics
    fn stats(&self) -> AllocationStats;
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate<T>(&self, layer: Layer, capacity: Size) -> MemoryResult<Block<T>> {
        (**self).allocate(layer, capacity)
    }

    fn stats(&self) -> AllocationStats {
        (**self).stats()
    }
}
