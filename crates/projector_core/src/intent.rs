//! User intents: the only way presentation and input layers change a session.

use serde::{Deserialize, Serialize};

use crate::geometry::Axis;
use crate::instrument::Unit;

/// A single user action against the lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// Start a tutorial, or clear it with `None`.
    StartTutorial {
        #[serde(default)]
        name: Option<String>,
    },
    /// Home button: same as clearing the tutorial.
    Recalibrate,
    MovePoint { axis: Axis, delta: i32 },
    SetRelativeZero { axis: Axis },
    ResetAbsoluteZero,
    /// Magnification level as shown on the lens buttons (10, 20, 50, 100).
    SetMagnification { level: u32 },
    SelectSample { sample_id: String },
    SetUnit { unit: Unit },
    ToggleAngleMode,
    AddAnglePoint,
}

impl Intent {
    pub fn start(name: &str) -> Self {
        Intent::StartTutorial {
            name: Some(name.to_string()),
        }
    }

    pub fn move_point(axis: Axis, delta: i32) -> Self {
        Intent::MovePoint { axis, delta }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::StartTutorial { .. } => "start_tutorial",
            Intent::Recalibrate => "recalibrate",
            Intent::MovePoint { .. } => "move_point",
            Intent::SetRelativeZero { .. } => "set_relative_zero",
            Intent::ResetAbsoluteZero => "reset_absolute_zero",
            Intent::SetMagnification { .. } => "set_magnification",
            Intent::SelectSample { .. } => "select_sample",
            Intent::SetUnit { .. } => "set_unit",
            Intent::ToggleAngleMode => "toggle_angle_mode",
            Intent::AddAnglePoint => "add_angle_point",
        }
    }
}
