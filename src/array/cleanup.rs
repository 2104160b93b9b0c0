/*!
 * Cleanup
 *
 * Releases a partial or complete nested array.
 *
 * Blocks free themselves on drop, so release can never touch an allocation
 * twice. The progress marker describes what the caller believes was built;
 * it is cross-checked against the structure that is actually handed over.
 */

use super::{Grid, JaggedArray, Plane};
use crate::core::types::Dimensions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How far construction progressed
///
/// - Outer indices `< outer` are fully built.
/// - Within `outer`, inner rows `< middle` are built (only meaningful when the
///   middle allocation at `outer` exists).
/// - `complete` marks a finished build, where `outer == x` and `middle == y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub outer: usize,
    pub middle: usize,
    pub complete: bool,
}

impl Progress {
    /// Nothing built yet
    pub const fn start() -> Self {
        Self::in_progress(0, 0)
    }

    pub const fn in_progress(outer: usize, middle: usize) -> Self {
        Self {
            outer,
            middle,
            complete: false,
        }
    }

    pub const fn complete(dims: Dimensions) -> Self {
        Self {
            outer: dims.x,
            middle: dims.y,
            complete: true,
        }
    }

    /// Allocations reachable from the root under this marker
    ///
    /// `middle_allocated` says whether the middle allocation at `outer`
    /// exists; the marker alone cannot distinguish a failed middle allocation
    /// from a failed first inner allocation.
    pub fn reachable_allocations(&self, y: usize, middle_allocated: bool) -> usize {
        let built = self.outer.saturating_mul(y.saturating_add(1));
        let partial = if middle_allocated && !self.complete {
            1 + self.middle
        } else {
            0
        };
        1usize.saturating_add(built).saturating_add(partial)
    }
}

/// Outcome of a cleanup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseReport {
    /// Allocations actually released
    pub released: usize,
    /// Allocations the progress marker accounts for
    pub expected: usize,
}

impl ReleaseReport {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.released == self.expected
    }
}

/// Release a partially built array
///
/// `grid` holds the fully built planes; `in_progress` is the plane at
/// `progress.outer` if its allocation succeeded.
pub fn release_partial(
    grid: Grid,
    in_progress: Option<Plane>,
    dims: Dimensions,
    progress: Progress,
) -> ReleaseReport {
    let expected = progress.reachable_allocations(dims.y, in_progress.is_some());

    if !structure_matches(&grid, in_progress.as_ref(), dims, progress) {
        warn!(
            ?progress,
            built = grid.len(),
            in_progress = ?in_progress.as_ref().map(|plane| plane.len()),
            "Progress marker disagrees with structure, releasing actual contents"
        );
    }

    let released = count_blocks(&grid, in_progress.as_ref());

    // In-progress plane first, then everything below the root, then the root
    drop(in_progress);
    drop(grid);

    let report = ReleaseReport { released, expected };
    if report.is_exact() {
        debug!(?progress, released, "Released partial array");
    } else {
        warn!(?progress, released, expected, "Release count differs from marker");
    }
    report
}

/// Release a fully built array
pub fn teardown(array: JaggedArray) -> ReleaseReport {
    let dims = array.dims();
    release_partial(array.into_grid(), None, dims, Progress::complete(dims))
}

fn structure_matches(
    grid: &Grid,
    in_progress: Option<&Plane>,
    dims: Dimensions,
    progress: Progress,
) -> bool {
    let planes_ok = grid.len() == progress.outer
        && progress.outer <= dims.x
        && grid.iter().all(|plane| plane.len() == dims.y);

    let partial_ok = match (progress.complete, in_progress) {
        (true, None) => progress.outer == dims.x && progress.middle == dims.y,
        (true, Some(_)) => false,
        (false, None) => true,
        (false, Some(plane)) => plane.len() == progress.middle && progress.middle <= dims.y,
    };

    planes_ok && partial_ok
}

fn count_blocks(grid: &Grid, in_progress: Option<&Plane>) -> usize {
    let planes: usize = grid.iter().map(|plane| 1 + plane.len()).sum();
    let partial = in_progress.map_or(0, |plane| 1 + plane.len());
    1 + planes + partial
}
