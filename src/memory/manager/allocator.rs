/*!
 * Memory Allocator Implementation
 * Allocation logic with budget and fault checks
 */

use super::MemoryManager;
use crate::core::types::{Layer, Size};
use crate::memory::block::Block;
use crate::memory::traits::Allocator;
use crate::memory::types::{AllocationStats, MemoryError, MemoryResult};
use std::sync::Arc;
use tracing::{error, trace, warn};

impl MemoryManager {
    /// Allocate a block of `capacity` values, honouring budget and fault plan
    pub fn allocate<T>(&self, layer: Layer, capacity: Size) -> MemoryResult<Block<T>> {
        let attempt = self.tracking.record_attempt(layer);

        if let Some(plan) = self.config.fault {
            if plan.triggers(layer, attempt) {
                warn!(
                    layer = %layer,
                    attempt = attempt.overall,
                    "Injected allocation failure"
                );
                return Err(MemoryError::Injected {
                    layer,
                    attempt: attempt.overall,
                });
            }
        }

        let size = capacity
            .checked_mul(std::mem::size_of::<T>())
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or(MemoryError::CapacityOverflow { layer, capacity })?;

        if let Some(budget) = self.config.budget {
            let live = self.tracking.live_bytes();
            let available = budget.saturating_sub(live);
            if size > available {
                error!(
                    layer = %layer,
                    requested = size,
                    available,
                    budget,
                    "Budget exceeded"
                );
                return Err(MemoryError::BudgetExceeded {
                    layer,
                    requested: size,
                    available,
                    budget,
                });
            }
        }

        let mut data = Vec::new();
        if data.try_reserve_exact(capacity).is_err() {
            error!(layer = %layer, requested = size, "OOM");
            return Err(MemoryError::OutOfMemory {
                layer,
                requested: size,
            });
        }

        self.tracking.record_allocation(layer, size);
        trace!(layer = %layer, capacity, bytes = size, "block allocated");

        Ok(Block::new(
            data,
            capacity,
            layer,
            size,
            Arc::clone(&self.tracking),
        ))
    }

    pub fn stats(&self) -> AllocationStats {
        self.tracking.snapshot()
    }
}

// Implement trait interface
impl Allocator for MemoryManager {
    fn allocate<T>(&self, layer: Layer, capacity: Size) -> MemoryResult<Block<T>> {
        MemoryManager::allocate(self, layer, capacity)
    }

    fn stats(&self) -> AllocationStats {
        MemoryManager::stats(self)
    }
}
