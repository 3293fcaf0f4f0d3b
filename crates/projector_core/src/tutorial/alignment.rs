//! Snap-on-crossing alignment.
//!
//! Keyboard movement comes in steps of 1 or 8 pixels, so the reticle can jump
//! over an alignment target without ever landing on it. Instead of testing
//! for equality we test whether a move straddles the target, and if so pin
//! the coordinate to it exactly.

use crate::geometry::{Axis, PixelPoint};
use crate::tutorial::AdvanceRule;

/// Check whether moving from `prev` to `next` crosses `target`.
///
/// The boundary is inclusive on the new side only: starting on the target
/// never counts as a crossing.
pub fn crosses(prev: i32, next: i32, target: i32) -> bool {
    (prev > target && next <= target) || (prev < target && next >= target)
}

/// Result of testing one move against the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentOutcome {
    /// Coordinate to commit on the moved axis.
    pub coordinate: i32,
    /// The raw coordinate was replaced by the target.
    pub snapped: bool,
    /// The step is complete.
    pub advance: bool,
}

impl AlignmentOutcome {
    /// The move stands as proposed.
    pub fn unchanged(coordinate: i32) -> Self {
        Self {
            coordinate,
            snapped: false,
            advance: false,
        }
    }
}

/// Test a move on `axis` from `prev` to `proposed` against `rule`.
///
/// `tolerance` is the exclusive bound on the *other* axis for
/// point-alignment steps.
pub fn evaluate(
    rule: &AdvanceRule,
    axis: Axis,
    prev: PixelPoint,
    proposed: i32,
    tolerance: i32,
) -> AlignmentOutcome {
    match rule {
        AdvanceRule::AxisCrossing {
            axis: rule_axis,
            target,
        } if *rule_axis == axis => {
            if crosses(prev.get(axis), proposed, *target) {
                AlignmentOutcome {
                    coordinate: *target,
                    snapped: true,
                    advance: true,
                }
            } else {
                AlignmentOutcome::unchanged(proposed)
            }
        }
        AdvanceRule::PointAlignment { x, y } => {
            let target = PixelPoint::new(*x, *y);
            if !crosses(prev.get(axis), proposed, target.get(axis)) {
                return AlignmentOutcome::unchanged(proposed);
            }
            let other = axis.other();
            let gap = (i64::from(prev.get(other)) - i64::from(target.get(other))).abs();
            let other_aligned = gap < i64::from(tolerance);
            AlignmentOutcome {
                coordinate: target.get(axis),
                snapped: true,
                advance: other_aligned,
            }
        }
        _ => AlignmentOutcome::unchanged(proposed),
    }
}
