//! Read-only view of a session for presentation layers.

use serde::{Deserialize, Serialize};

use crate::geometry::{MmPoint, PixelPoint};
use crate::instrument::{Magnification, Unit};
use crate::result::MeasuredResult;
use crate::session::LabSession;
use crate::tutorial::StepId;
use crate::units::format_dro;

/// Everything a renderer needs, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabSnapshot {
    pub reticle: PixelPoint,
    pub zero_offset: PixelPoint,
    /// Relative reading in millimetres (y up).
    pub dro: MmPoint,
    /// DRO text for the x axis, 3 decimals.
    pub dro_x: String,
    pub dro_y: String,
    pub magnification: Magnification,
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_sample: Option<String>,
    pub angle_mode: bool,
    pub angle_points: Vec<MmPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MeasuredResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial: Option<String>,
    pub current_step: StepId,
    pub tutorial_finished: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_target_id: Option<String>,
    pub show_alignment_line: bool,
}

impl LabSnapshot {
    pub fn capture(session: &LabSession) -> Self {
        let dro = session.dro_reading();
        let tutorial = session.tutorial();
        Self {
            reticle: session.reticle(),
            zero_offset: session.zero_offset(),
            dro,
            dro_x: format_dro(dro.x),
            dro_y: format_dro(dro.y),
            magnification: session.magnification(),
            unit: session.unit(),
            selected_sample: session.selected_sample().map(|s| s.id.clone()),
            angle_mode: session.angle_mode(),
            angle_points: session.angle_points().as_slice().to_vec(),
            calculated_angle: session.calculated_angle(),
            result: session.result().cloned(),
            tutorial: tutorial.active_name().map(str::to_string),
            current_step: tutorial.current_step(),
            tutorial_finished: tutorial.is_finished(session.tutorials()),
            message: session.tutorial_message(),
            highlight_target_id: session.highlight_target_id().map(str::to_string),
            show_alignment_line: session.show_alignment_line(),
        }
    }
}
