//! Measurement engine for the profile projector virtual lab.
//!
//! This crate owns everything with state in the lab: the reticle position,
//! zero offsets, angle capture, derived measurements and the guided tutorial
//! state machine. Rendering, routing and styling live elsewhere and only ever
//! read a [`LabSnapshot`].
//!
//! # Architecture
//!
//! ```text
//! Intent ──► LabSession ──► TutorialState (crossing test, snap, advance)
//!                │
//!                ▼
//!          recompute pass (diameter / angle / forced jump)
//!                │
//!                ▼
//!           LabSnapshot (read-only, for presentation)
//! ```
//!
//! Every mutation goes through a [`LabSession`] operation and ends with an
//! explicit recomputation pass, so derived values can never drift from the
//! state they are computed from.
//!
//! # Example
//!
//! ```
//! use projector_core::{Axis, LabSession, GEAR_OD};
//!
//! let mut session = LabSession::with_defaults();
//! session.start_tutorial(Some(GEAR_OD)).unwrap();
//! assert_eq!(session.tutorial().current_step(), 1);
//!
//! session.move_point(Axis::Y, -8);
//! assert_eq!(session.reticle().y, -8);
//! ```

pub mod angle;
mod config;
mod effect;
mod error;
mod fault;
mod geometry;
mod instrument;
mod intent;
mod replay;
mod result;
pub mod sample;
mod session;
mod snapshot;
pub mod tutorial;
pub mod units;

pub use angle::AnglePoints;
pub use config::LabConfig;
pub use effect::EffectSet;
pub use error::{CatalogError, ConfigError};
pub use fault::Fault;
pub use geometry::{Axis, MmPoint, PixelPoint};
pub use instrument::{Magnification, Unit};
pub use intent::Intent;
pub use replay::{IntentLog, RecordedIntent};
pub use result::{Derived, MeasuredResult};
pub use sample::{ReferenceField, Sample, SampleCatalog};
pub use session::LabSession;
pub use snapshot::LabSnapshot;
pub use tutorial::{
    AdvanceRule, MeasurementKind, Step, StepId, TutorialCatalog, TutorialScript, TutorialState,
};

/// Experiment identifier the built-in sample set is registered under.
pub const EXPERIMENT_ID: &str = "profile-projector";

/// Built-in gear outer diameter tutorial.
pub const GEAR_OD: &str = "GEAR_OD";

/// Built-in screw outer diameter tutorial.
pub const SCREW_OD: &str = "SCREW_OD";

/// Built-in thread angle tutorial.
pub const ANGLE_MEASURE: &str = "ANGLE_MEASURE";

/// Maximum number of captured angle points (two points per flank line).
pub const MAX_ANGLE_POINTS: usize = 4;

/// Step id meaning "no tutorial step".
pub const NO_STEP: StepId = 0;

/// Default tolerance (pixels) for the second axis in point-alignment steps.
pub const DEFAULT_ALIGNMENT_TOLERANCE_PX: i32 = 2;

/// Prompt shown when no tutorial is running.
pub const IDLE_PROMPT: &str =
    "Click Gear Outer Diameter/Screw Outer diameter/Thread angle measurement";

// =============================================================================
// TARGET IDS
// =============================================================================

/// Target id of the DRO (digital readout) panel.
pub const TARGET_DRO_PANEL: &str = "dro-panel";

/// Target id of the stage movement controls.
pub const TARGET_STAGE_CONTROLS: &str = "stage-controls-grid";

/// Target id of the projector screen.
pub const TARGET_PROJECTOR_SCREEN: &str = "projector-screen";

/// Target id of the absolute zero button.
pub const TARGET_ABSOLUTE_ZERO: &str = "absolute-zero-button";

/// Target id of the angle mode toggle.
pub const TARGET_ANGLE_MODE_TOGGLE: &str = "angle-mode-toggle-button";

/// Target id of the add point button.
pub const TARGET_ADD_POINT: &str = "add-point-button";
