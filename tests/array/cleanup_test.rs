/*!
 * Cleanup Tests
 * Injected failures at every layer must release exactly what was allocated
 */

use jagged_arr::array::{build, release_partial, teardown, Plane, Progress, Row};
use jagged_arr::{Dimensions, Elem, FaultPlan, Layer, MemoryError, MemoryManager};
use pretty_assertions::assert_eq;
use std::mem::size_of;

/// Attempt ordinal of the middle allocation at outer index `i`
fn middle_attempt(dims: Dimensions, i: usize) -> usize {
    1 + i * (1 + dims.y)
}

/// Attempt ordinal of the inner allocation at `(i, j)`
fn inner_attempt(dims: Dimensions, i: usize, j: usize) -> usize {
    middle_attempt(dims, i) + 1 + j
}

#[test]
fn test_outer_failure() {
    let dims = Dimensions::new(3, 3, 3);
    let manager = MemoryManager::with_fault(FaultPlan::OnLayer {
        layer: Layer::Outer,
        occurrence: 0,
    });

    let err = build(dims, &manager).unwrap_err();
    assert_eq!(err.layer(), Layer::Outer);
    assert_eq!(err.allocations, 0);
    assert_eq!(err.progress, Progress::start());

    let stats = manager.stats();
    assert_eq!(stats.allocations, 0);
    assert!(stats.is_balanced());
}

#[test]
fn test_middle_failure_at_every_outer_index() {
    let dims = Dimensions::new(4, 3, 2);
    for i in 0..dims.x {
        let manager = MemoryManager::with_fault(FaultPlan::OnLayer {
            layer: Layer::Middle,
            occurrence: i,
        });

        let err = build(dims, &manager).unwrap_err();
        assert_eq!(err.layer(), Layer::Middle);
        assert_eq!(err.progress, Progress::in_progress(i, 0));
        assert_eq!(err.allocations, middle_attempt(dims, i));
        assert_eq!(err.release.released, err.allocations);
        assert!(err.release.is_exact(), "marker mismatch at i={i}");

        let stats = manager.stats();
        assert_eq!(stats.attempts, middle_attempt(dims, i) + 1);
        assert!(stats.is_balanced(), "leak after middle failure at i={i}");
    }
}

#[test]
fn test_inner_failure_at_every_cell() {
    let dims = Dimensions::new(3, 3, 2);
    for i in 0..dims.x {
        for j in 0..dims.y {
            let manager =
                MemoryManager::with_fault(FaultPlan::AtAttempt(inner_attempt(dims, i, j)));

            let err = build(dims, &manager).unwrap_err();
            assert_eq!(err.layer(), Layer::Inner);
            assert_eq!(err.progress, Progress::in_progress(i, j));
            assert_eq!(err.allocations, inner_attempt(dims, i, j));
            assert_eq!(err.release.released, err.allocations);
            assert!(err.release.is_exact());

            let stats = manager.stats();
            assert_eq!(stats.inner.allocations, i * dims.y + j);
            assert!(stats.is_balanced(), "leak after inner failure at ({i}, {j})");
        }
    }
}

#[test]
fn test_every_attempt_ordinal_balances() {
    let dims = Dimensions::new(3, 2, 4);
    for attempt in 0..dims.expected_allocations() {
        let manager = MemoryManager::with_fault(FaultPlan::AtAttempt(attempt));
        let err = build(dims, &manager).unwrap_err();

        assert_eq!(err.allocations, attempt);
        assert!(matches!(err.source, MemoryError::Injected { .. }));
        assert!(manager.stats().is_balanced(), "leak at attempt {attempt}");
    }

    // One past the last attempt never fires
    let manager = MemoryManager::with_fault(FaultPlan::AtAttempt(dims.expected_allocations()));
    assert!(build(dims, &manager).is_ok());
}

#[test]
fn test_budget_exhaustion_releases_partial_array() {
    let dims = Dimensions::new(4, 4, 16);
    // Room for the outer and middle layers plus a few rows, not the whole array
    let budget = dims.x * size_of::<Plane>()
        + dims.x * dims.y * size_of::<Row>()
        + 3 * dims.z * size_of::<Elem>();
    let manager = MemoryManager::with_budget(budget);

    let err = build(dims, &manager).unwrap_err();
    assert!(matches!(err.source, MemoryError::BudgetExceeded { .. }));
    assert!(err.release.is_exact());

    let stats = manager.stats();
    assert!(stats.peak_bytes <= budget);
    assert!(stats.is_balanced());
}

#[test]
fn test_teardown_releases_everything() {
    let dims = Dimensions::new(3, 5, 2);
    let manager = MemoryManager::new();
    let built = build(dims, &manager).unwrap();

    let report = teardown(built.array);
    assert_eq!(report.released, dims.expected_allocations());
    assert_eq!(report.expected, dims.expected_allocations());
    assert!(manager.stats().is_balanced());
}

#[test]
fn test_undercounting_marker_still_releases_actual_contents() {
    let dims = Dimensions::new(2, 1, 1);
    let manager = MemoryManager::new();

    let mut grid = manager.allocate(Layer::Outer, dims.x).unwrap();
    let mut plane = manager.allocate(Layer::Middle, dims.y).unwrap();
    plane.push(manager.allocate::<Elem>(Layer::Inner, dims.z).unwrap());
    grid.push(plane);

    // Claims nothing was built below the root
    let report = release_partial(grid, None, dims, Progress::start());
    assert_eq!(report.released, 3);
    assert_eq!(report.expected, 1);
    assert!(!report.is_exact());
    assert!(manager.stats().is_balanced());
}
