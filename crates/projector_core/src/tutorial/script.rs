//! Tutorial script definitions.

use serde::{Deserialize, Serialize};

use crate::geometry::Axis;
use crate::sample::ReferenceField;

/// Step identifier. Unique within a script, non-contiguous, never 0.
pub type StepId = u32;

/// What completes a step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum AdvanceRule {
    /// The user triggers the control named by the step's `target_id`.
    #[default]
    Action,

    /// A move on `axis` crosses `target`.
    AxisCrossing { axis: Axis, target: i32 },

    /// Both axes are brought onto `(x, y)`, in either order.
    PointAlignment { x: i32, y: i32 },

    /// The included angle has been computed; jump straight to `jump_to`.
    AngleComputed { jump_to: StepId },

    /// Final step; nothing advances past it.
    Terminal,
}

impl AdvanceRule {
    /// Check if this rule listens for stage movement.
    pub fn is_alignment(&self) -> bool {
        matches!(
            self,
            AdvanceRule::AxisCrossing { .. } | AdvanceRule::PointAlignment { .. }
        )
    }
}

/// One tutorial step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    /// Control the user must act on (also what gets highlighted).
    pub target_id: String,
    pub message: String,
    #[serde(default)]
    pub advance: AdvanceRule,
}

impl Step {
    /// Step completed by clicking `target_id`.
    pub fn action(id: StepId, target_id: &str, message: &str) -> Self {
        Self {
            id,
            target_id: target_id.to_string(),
            message: message.to_string(),
            advance: AdvanceRule::Action,
        }
    }

    /// Replace the advance rule.
    pub fn on(mut self, advance: AdvanceRule) -> Self {
        self.advance = advance;
        self
    }

    /// Check if triggering `action_id` completes this step.
    pub fn accepts_action(&self, action_id: &str) -> bool {
        self.advance == AdvanceRule::Action && self.target_id == action_id
    }
}

/// What a script measures once it is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Vertical distance between the zero reference and the reticle.
    Diameter { reference: ReferenceField },
    /// Included angle from four captured points.
    Angle,
}

/// An immutable, ordered tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialScript {
    pub name: String,
    pub title: String,
    pub start_message: String,
    pub measurement: MeasurementKind,
    /// Sample the script is written for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_sample: Option<String>,
    pub steps: Vec<Step>,
}

impl TutorialScript {
    pub fn first_step_id(&self) -> Option<StepId> {
        self.steps.first().map(|s| s.id)
    }

    pub fn last_step_id(&self) -> Option<StepId> {
        self.steps.last().map(|s| s.id)
    }

    /// Index of a step in the ordered list.
    pub fn position(&self, id: StepId) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Id of the step after `id`, or `None` at the last step.
    pub fn next_step_id(&self, id: StepId) -> Option<StepId> {
        let index = self.position(id)?;
        self.steps.get(index + 1).map(|s| s.id)
    }

    pub fn is_last(&self, id: StepId) -> bool {
        self.last_step_id() == Some(id)
    }

    pub fn is_diameter(&self) -> bool {
        matches!(self.measurement, MeasurementKind::Diameter { .. })
    }

    pub fn is_angle(&self) -> bool {
        matches!(self.measurement, MeasurementKind::Angle)
    }
}
