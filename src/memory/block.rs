/*!
 * Memory Blocks
 *
 * Owning handle for a single layer allocation with automatic release
 */

use super::manager::Tracking;
use crate::core::types::{Layer, Size};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use tracing::trace;

/// One tracked allocation of exactly `capacity` values
///
/// The backing storage is reserved up front and never grows. On drop the
/// block releases its children first, then reports its own release to the
/// tracker that produced it.
///
/// # Example
///
/// ```ignore
/// let mut row = manager.allocate::<Elem>(Layer::Inner, 4)?;
/// row.push(1);
/// // Released on drop
/// ```
pub struct Block<T> {
    data: Vec<T>,
    capacity: Size,
    layer: Layer,
    size_bytes: Size,
    tracking: Arc<Tracking>,
}

impl<T> Block<T> {
    pub(crate) fn new(
        data: Vec<T>,
        capacity: Size,
        layer: Layer,
        size_bytes: Size,
        tracking: Arc<Tracking>,
    ) -> Self {
        Self {
            data,
            capacity,
            layer,
            size_bytes,
            tracking,
        }
    }

    #[inline]
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Number of values the block was allocated for
    #[inline]
    pub fn capacity(&self) -> Size {
        self.capacity
    }

    #[inline]
    pub fn size_bytes(&self) -> Size {
        self.size_bytes
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Append a value into reserved space
    ///
    /// Callers must not push past `capacity`.
    #[inline]
    pub fn push(&mut self, value: T) {
        debug_assert!(
            self.data.len() < self.capacity,
            "push past reserved capacity of {} block",
            self.layer
        );
        self.data.push(value);
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Deref for Block<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for Block<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("layer", &self.layer)
            .field("capacity", &self.capacity)
            .field("data", &self.data)
            .finish()
    }
}

impl<T> Drop for Block<T> {
    fn drop(&mut self) {
        // Children go first so releases mirror allocation nesting
        self.data.clear();
        self.tracking.record_release(self.layer, self.size_bytes);
        trace!(
            layer = %self.layer,
            capacity = self.capacity,
            bytes = self.size_bytes,
            "block released"
        );
    }
}
