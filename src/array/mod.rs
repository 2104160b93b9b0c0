/*!
 * Nested Array
 *
 * Three-level jagged array where every level is its own tracked allocation.
 *
 * ```text
 * Grid   (outer, capacity x)
 * └── Plane × x   (middle, capacity y)
 *     └── Row × y   (inner, capacity z)
 *         └── Elem × z
 * ```
 */

pub mod builder;
pub mod cleanup;
pub mod value;

pub use builder::{build, BuildError, Built};
pub use cleanup::{release_partial, teardown, Progress, ReleaseReport};
pub use value::{elem_pow, value_at};

use crate::core::types::{Dimensions, Elem};
use crate::memory::Block;

/// Inner allocation: `z` elements
pub type Row = Block<Elem>;

/// Middle allocation: `y` rows
pub type Plane = Block<Row>;

/// Outer allocation: `x` planes
pub type Grid = Block<Plane>;

/// Fully populated nested array
///
/// Only the builder can produce one, so every instance holds exactly
/// `x * y * z` elements.
#[derive(Debug)]
pub struct JaggedArray {
    dims: Dimensions,
    grid: Grid,
}

impl JaggedArray {
    pub(crate) fn new(dims: Dimensions, grid: Grid) -> Self {
        Self { dims, grid }
    }

    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.grid
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<Elem> {
        self.grid.get(i)?.get(j)?.get(k).copied()
    }

    /// Elements with their coordinates in outer-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), Elem)> + '_ {
        self.grid.iter().enumerate().flat_map(|(i, plane)| {
            plane.iter().enumerate().flat_map(move |(j, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(k, &value)| ((i, j, k), value))
            })
        })
    }

    pub(crate) fn into_grid(self) -> Grid {
        self.grid
    }
}
