//! Derived measurement results.
//!
//! Nothing in here is ever mutated directly: [`Derived`] is rebuilt by the
//! session's recomputation pass after every operation.

use serde::{Deserialize, Serialize};

use crate::sample::{ReferenceField, Sample};
use crate::units::{format_degrees, format_mm};

/// Reference angle shown when the selected sample has none.
pub const DEFAULT_REFERENCE_ANGLE: &str = "60.00°";

/// Result shown next to the DRO once a measurement is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasuredResult {
    Diameter {
        /// `"42.500 mm"`
        measured: String,
        measured_mm: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_diameter: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference_angle: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pitch: Option<String>,
    },
    Angle {
        /// `"57.22°"`
        measured: String,
        measured_deg: f64,
        reference_angle: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pitch: Option<String>,
    },
}

impl MeasuredResult {
    /// Diameter result annotated with `sample`'s reference values.
    pub fn diameter(measured_mm: f64, sample: &Sample, reference: ReferenceField) -> Self {
        MeasuredResult::Diameter {
            measured: format_mm(measured_mm),
            measured_mm,
            reference_diameter: sample.reference_diameter(reference).map(str::to_string),
            reference_angle: sample.angle.clone(),
            pitch: sample.pitch.clone(),
        }
    }

    /// Angle result; the reference falls back to [`DEFAULT_REFERENCE_ANGLE`].
    pub fn angle(measured_deg: f64, sample: Option<&Sample>) -> Self {
        MeasuredResult::Angle {
            measured: format_degrees(measured_deg),
            measured_deg,
            reference_angle: sample
                .and_then(|s| s.angle.clone())
                .unwrap_or_else(|| DEFAULT_REFERENCE_ANGLE.to_string()),
            pitch: sample.and_then(|s| s.pitch.clone()),
        }
    }

    /// Formatted measured value.
    pub fn measured(&self) -> &str {
        match self {
            MeasuredResult::Diameter { measured, .. } | MeasuredResult::Angle { measured, .. } => {
                measured
            }
        }
    }

    /// Formatted reference value the measurement is compared against.
    pub fn reference(&self) -> Option<&str> {
        match self {
            MeasuredResult::Diameter {
                reference_diameter, ..
            } => reference_diameter.as_deref(),
            MeasuredResult::Angle {
                reference_angle, ..
            } => Some(reference_angle),
        }
    }
}

/// Values computed from session state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    /// Included angle in degrees, present once four points exist in angle mode.
    pub calculated_angle: Option<f64>,
    pub result: Option<MeasuredResult>,
}

impl Derived {
    pub fn is_empty(&self) -> bool {
        self.calculated_angle.is_none() && self.result.is_none()
    }
}
