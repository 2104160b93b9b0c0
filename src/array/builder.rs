/*!
 * Array Builder
 * Allocates and populates the nested array layer by layer
 */

use super::cleanup::{release_partial, Progress, ReleaseReport};
use super::value::value_at;
use super::{Grid, JaggedArray, Plane, Row};
use crate::core::types::{Dimensions, Layer};
use crate::memory::{Allocator, MemoryError};
use thiserror::Error;
use tracing::{debug, error, instrument};

/// A successful build
#[derive(Debug)]
pub struct Built {
    pub array: JaggedArray,
    /// Successful allocation calls made by the build
    pub allocations: usize,
}

/// A failed build; the partial structure has already been released
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source}")]
pub struct BuildError {
    #[source]
    pub source: MemoryError,
    /// Marker at the failure point
    pub progress: Progress,
    /// Successful allocation calls before the failure
    pub allocations: usize,
    pub release: ReleaseReport,
}

impl BuildError {
    #[inline]
    pub fn layer(&self) -> Layer {
        self.source.layer()
    }
}

/// Allocate the outer, middle and inner layers and fill every element
///
/// Middle and inner layers are allocated in ascending index order; each
/// row is filled as soon as its allocation succeeds. On failure everything
/// allocated so far is released before returning.
#[instrument(level = "debug", skip_all, fields(dims = %dims))]
pub fn build<A: Allocator>(dims: Dimensions, allocator: &A) -> Result<Built, BuildError> {
    let mut allocations = 0;

    let mut grid: Grid = allocator
        .allocate(Layer::Outer, dims.x)
        .map_err(|source| {
            error!(error = %source, "Outer allocation failed");
            BuildError {
                source,
                progress: Progress::start(),
                allocations,
                release: ReleaseReport {
                    released: 0,
                    expected: 0,
                },
            }
        })?;
    allocations += 1;

    for i in 0..dims.x {
        let mut plane: Plane = match allocator.allocate(Layer::Middle, dims.y) {
            Ok(plane) => plane,
            Err(source) => {
                return Err(unwind(
                    source,
                    allocations,
                    grid,
                    None,
                    dims,
                    Progress::in_progress(i, 0),
                ));
            }
        };
        allocations += 1;

        for j in 0..dims.y {
            let mut row: Row = match allocator.allocate(Layer::Inner, dims.z) {
                Ok(row) => row,
                Err(source) => {
                    return Err(unwind(
                        source,
                        allocations,
                        grid,
                        Some(plane),
                        dims,
                        Progress::in_progress(i, j),
                    ));
                }
            };
            allocations += 1;

            for k in 0..dims.z {
                row.push(value_at(i, j, k));
            }
            plane.push(row);
        }
        grid.push(plane);
    }

    debug!(allocations, "Array built");
    Ok(Built {
        array: JaggedArray::new(dims, grid),
        allocations,
    })
}

fn unwind(
    source: MemoryError,
    allocations: usize,
    grid: Grid,
    in_progress: Option<Plane>,
    dims: Dimensions,
    progress: Progress,
) -> BuildError {
    error!(
        error = %source,
        layer = %source.layer(),
        outer = progress.outer,
        middle = progress.middle,
        allocations,
        "Allocation failed, releasing partial array"
    );
    let release = release_partial(grid, in_progress, dims, progress);
    BuildError {
        source,
        progress,
        allocations,
        release,
    }
}
