/*!
 * Memory Management
 *
 * Tracking allocator backing every layer of the nested array.
 *
 * ## Features
 *
 * - **Fallible allocation**: storage is reserved with `try_reserve_exact`, so
 *   system allocator failures surface as errors instead of aborting
 * - **Per-layer accounting**: attempts, allocations and releases for the
 *   outer, middle and inner layers
 * - **Byte budget**: optional cap on live bytes, checked before reserving
 * - **Fault injection**: fail a chosen attempt to exercise cleanup paths
 * - **Release tracking**: blocks report their own release on drop
 */

mod allocator;
mod fault;
mod tracking;

pub use fault::FaultPlan;
pub use tracking::Tracking;

use crate::core::types::Size;
use std::sync::Arc;
use tracing::debug;

/// Allocator configuration
///
/// The command line always runs with the default: no budget, no faults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Maximum live bytes across all blocks
    pub budget: Option<Size>,
    /// Allocation attempt to fail deliberately
    pub fault: Option<FaultPlan>,
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: Size) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_fault(mut self, fault: FaultPlan) -> Self {
        self.fault = Some(fault);
        self
    }
}

/// Memory manager
///
/// Clones share the same counters, so a clone can observe releases made by
/// blocks handed out through the original.
pub struct MemoryManager {
    pub(super) tracking: Arc<Tracking>,
    pub(super) config: MemoryConfig,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::with_config(MemoryConfig::default())
    }

    /// Create memory manager with a byte budget (useful for testing)
    pub fn with_budget(budget: Size) -> Self {
        Self::with_config(MemoryConfig::new().with_budget(budget))
    }

    /// Create memory manager that fails one planned attempt (useful for testing)
    pub fn with_fault(fault: FaultPlan) -> Self {
        Self::with_config(MemoryConfig::new().with_fault(fault))
    }

    pub fn with_config(config: MemoryConfig) -> Self {
        debug!(
            budget = ?config.budget,
            fault = ?config.fault,
            "Memory manager initialized"
        );
        Self {
            tracking: Arc::new(Tracking::new()),
            config,
        }
    }
}

impl Clone for MemoryManager {
    fn clone(&self) -> Self {
        Self {
            tracking: Arc::clone(&self.tracking),
            config: self.config,
        }
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
