/*!
 * Fault Injection
 * Deterministic allocation failures for exercising cleanup paths
 */

use super::tracking::Attempt;
use crate::core::types::Layer;
use serde::{Deserialize, Serialize};

/// Which allocation attempt should fail
///
/// Ordinals are 0-based and count attempts, not successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPlan {
    /// Fail the n-th attempt across all layers
    AtAttempt(usize),
    /// Fail the n-th attempt on one layer
    OnLayer { layer: Layer, occurrence: usize },
}

impl FaultPlan {
    pub(crate) fn triggers(&self, layer: Layer, attempt: Attempt) -> bool {
        match *self {
            FaultPlan::AtAttempt(n) => attempt.overall == n,
            FaultPlan::OnLayer {
                layer: target,
                occurrence,
            } => target == layer && attempt.on_layer == occurrence,
        }
    }
}
