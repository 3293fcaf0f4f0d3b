//! Fault types for lab operations.
//!
//! Faults are recoverable: the operation that raised one leaves the session
//! exactly as it was, and the presentation keeps showing the last coherent
//! state.

use thiserror::Error;

use crate::sample::ReferenceField;
use crate::MAX_ANGLE_POINTS;

/// Lab fault - an intent that could not be applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    /// Tutorial name not present in the catalog.
    #[error("Unknown tutorial: {0}")]
    UnknownTutorial(String),

    /// Fifth angle point requested.
    #[error("Angle point capacity exceeded: at most {max} points")]
    CapacityExceeded { max: usize },

    /// Sample has no value for a reference field.
    #[error("Sample '{sample}' has no {field} reference")]
    MissingReferenceField {
        sample: String,
        field: ReferenceField,
    },

    /// One of the angle lines has zero length.
    #[error("Degenerate vector: line {line} has zero length")]
    DegenerateVector { line: u8 },

    /// Sample id not present in the sample catalog.
    #[error("Unknown sample: {0}")]
    UnknownSample(String),

    /// Lens level not on the turret.
    #[error("Unsupported magnification: {0}x")]
    UnsupportedMagnification(u32),

    /// Axis name other than x/y.
    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    /// Unit label not recognised.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

impl Fault {
    /// Capacity fault for the angle point list.
    pub fn capacity() -> Self {
        Fault::CapacityExceeded {
            max: MAX_ANGLE_POINTS,
        }
    }

    /// Check if this fault is an expected user-driven condition.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Fault::CapacityExceeded { .. }
                | Fault::MissingReferenceField { .. }
                | Fault::DegenerateVector { .. }
        )
    }

    /// Check if this fault points at a configuration or wiring error.
    pub fn is_bug(&self) -> bool {
        matches!(
            self,
            Fault::UnknownTutorial(_)
                | Fault::UnknownSample(_)
                | Fault::UnsupportedMagnification(_)
                | Fault::UnknownAxis(_)
                | Fault::UnknownUnit(_)
        )
    }
}
