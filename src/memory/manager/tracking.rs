/*!
 * Allocation Tracking
 * Shared per-layer counters updated by allocations and block releases
 */

use crate::core::types::{Layer, Size};
use crate::memory::types::{AllocationStats, LayerStats};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared between a manager and every block it hands out
#[derive(Debug)]
pub struct Tracking {
    attempts: AtomicUsize,
    layer_attempts: [AtomicUsize; 3],
    allocations: [AtomicUsize; 3],
    releases: [AtomicUsize; 3],
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
}

/// Ordinals of a single allocation attempt (both 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Attempt {
    pub overall: usize,
    pub on_layer: usize,
}

impl Tracking {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
            layer_attempts: std::array::from_fn(|_| AtomicUsize::new(0)),
            allocations: std::array::from_fn(|_| AtomicUsize::new(0)),
            releases: std::array::from_fn(|_| AtomicUsize::new(0)),
            live_bytes: AtomicUsize::new(0),
            peak_bytes: AtomicUsize::new(0),
        }
    }

    pub(crate) fn record_attempt(&self, layer: Layer) -> Attempt {
        Attempt {
            overall: self.attempts.fetch_add(1, Ordering::SeqCst),
            on_layer: self.layer_attempts[layer.index()].fetch_add(1, Ordering::SeqCst),
        }
    }

    pub(crate) fn record_allocation(&self, layer: Layer, size: Size) {
        self.allocations[layer.index()].fetch_add(1, Ordering::SeqCst);
        let live = self.live_bytes.fetch_add(size, Ordering::SeqCst) + size;
        self.peak_bytes.fetch_max(live, Ordering::SeqCst);
    }

    pub(crate) fn record_release(&self, layer: Layer, size: Size) {
        self.releases[layer.index()].fetch_add(1, Ordering::SeqCst);
        self.live_bytes.fetch_sub(size, Ordering::SeqCst);
    }

    #[inline]
    pub fn live_bytes(&self) -> Size {
        self.live_bytes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> AllocationStats {
        let layer = |layer: Layer| LayerStats {
            attempts: self.layer_attempts[layer.index()].load(Ordering::SeqCst),
            allocations: self.allocations[layer.index()].load(Ordering::SeqCst),
            releases: self.releases[layer.index()].load(Ordering::SeqCst),
        };
        let (outer, middle, inner) = (layer(Layer::Outer), layer(Layer::Middle), layer(Layer::Inner));

        AllocationStats {
            attempts: self.attempts.load(Ordering::SeqCst),
            allocations: outer.allocations + middle.allocations + inner.allocations,
            releases: outer.releases + middle.releases + inner.releases,
            live_bytes: self.live_bytes(),
            peak_bytes: self.peak_bytes.load(Ordering::SeqCst),
            outer,
            middle,
            inner,
        }
    }
}

impl Default for Tracking {
    fn default() -> Self {
        Self::new()
    }
}
