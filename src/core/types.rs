/*!
 * Core Types
 * Common types used across the crate
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element stored in the innermost layer
///
/// Arithmetic on elements wraps; overflow is not an error.
pub type Elem = u64;

/// Size type for memory operations
pub type Size = usize;

/// Extents of the three axes of the nested array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Outer axis
    pub x: usize,
    /// Middle axis
    pub y: usize,
    /// Inner axis
    pub z: usize,
}

impl Dimensions {
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Number of elements in a fully built array (saturating)
    pub fn element_count(&self) -> usize {
        self.x.saturating_mul(self.y).saturating_mul(self.z)
    }

    /// Number of allocation calls a successful build performs
    ///
    /// One outer allocation, one middle allocation per outer index and one
    /// inner allocation per (outer, middle) pair. Saturates instead of
    /// overflowing for absurd extents.
    pub fn expected_allocations(&self) -> usize {
        1usize
            .saturating_add(self.x)
            .saturating_add(self.x.saturating_mul(self.y))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

/// The three ranks of the nested structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Root allocation holding the middle layers
    Outer,
    /// One per outer index, holding the inner layers
    Middle,
    /// One per (outer, middle) pair, holding the elements
    Inner,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Outer, Layer::Middle, Layer::Inner];

    /// Dense index used by per-layer counters
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Layer::Outer => 0,
            Layer::Middle => 1,
            Layer::Inner => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Layer::Outer => "outer",
            Layer::Middle => "middle",
            Layer::Inner => "inner",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
