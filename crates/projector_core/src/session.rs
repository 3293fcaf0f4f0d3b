//! The lab session: single owner of all mutable measurement state.
//!
//! Every operation follows the same shape:
//!
//! 1. mutate the primary state (reticle, zero, instrument settings, points)
//! 2. give the tutorial engine a chance to advance
//! 3. run the recomputation pass (angle, forced jump, diameter result)
//!
//! Operations return an [`EffectSet`] describing what changed. Fallible
//! operations return `Result<EffectSet, Fault>` and leave the session
//! untouched on error.

use std::sync::Arc;

use crate::angle::{self, AnglePoints};
use crate::config::LabConfig;
use crate::effect::EffectSet;
use crate::fault::Fault;
use crate::geometry::{Axis, MmPoint, PixelPoint};
use crate::instrument::{Magnification, Unit};
use crate::intent::Intent;
use crate::result::{Derived, MeasuredResult};
use crate::sample::{Sample, SampleCatalog};
use crate::snapshot::LabSnapshot;
use crate::tutorial::alignment::{self, AlignmentOutcome};
use crate::tutorial::{AdvanceRule, MeasurementKind, TutorialCatalog, TutorialState};
use crate::units;
use crate::{TARGET_ABSOLUTE_ZERO, TARGET_ADD_POINT, TARGET_ANGLE_MODE_TOGGLE};

/// One user's lab bench.
#[derive(Debug, Clone)]
pub struct LabSession {
    config: LabConfig,
    tutorials: Arc<TutorialCatalog>,
    samples: Arc<SampleCatalog>,

    reticle: PixelPoint,
    zero: PixelPoint,
    magnification: Magnification,
    unit: Unit,
    selected_sample: Option<Sample>,
    angle_mode: bool,
    angle_points: AnglePoints,
    tutorial: TutorialState,

    /// Output of the recomputation pass. Never written anywhere else.
    derived: Derived,
}

impl LabSession {
    pub fn new(
        config: LabConfig,
        tutorials: Arc<TutorialCatalog>,
        samples: Arc<SampleCatalog>,
    ) -> Self {
        Self {
            magnification: config.default_magnification,
            unit: config.default_unit,
            config,
            tutorials,
            samples,
            reticle: PixelPoint::ZERO,
            zero: PixelPoint::ZERO,
            selected_sample: None,
            angle_mode: false,
            angle_points: AnglePoints::new(),
            tutorial: TutorialState::idle(),
            derived: Derived::default(),
        }
    }

    /// Default config with the built-in tutorials and samples.
    pub fn with_defaults() -> Self {
        Self::new(
            LabConfig::default(),
            Arc::new(TutorialCatalog::builtin()),
            Arc::new(SampleCatalog::builtin()),
        )
    }

    /// Fresh session sharing this one's config and catalogs.
    pub fn blank(&self) -> Self {
        Self::new(
            self.config.clone(),
            Arc::clone(&self.tutorials),
            Arc::clone(&self.samples),
        )
    }

    // =========================================================================
    // TUTORIAL
    // =========================================================================

    /// Start the named tutorial, or clear the current one with `None`.
    ///
    /// Either way the bench is reset: reticle, zero, angle capture,
    /// magnification, unit and selected sample. An unknown name changes
    /// nothing.
    pub fn start_tutorial(&mut self, name: Option<&str>) -> Result<EffectSet, Fault> {
        let effects = match name {
            Some(name) => {
                let mut tutorial = TutorialState::idle();
                if let Err(fault) = tutorial.start(&self.tutorials, name) {
                    tracing::warn!(tutorial = name, "refusing to start unknown tutorial");
                    return Err(fault);
                }
                self.reset_bench();
                self.tutorial = tutorial;
                EffectSet::TUTORIAL_STARTED
            }
            None => {
                self.reset_bench();
                self.tutorial.clear();
                EffectSet::TUTORIAL_CLEARED
            }
        };
        Ok(self.finish(effects | EffectSet::RETICLE_MOVED | EffectSet::ZERO_CHANGED))
    }

    /// Home button.
    pub fn recalibrate(&mut self) -> EffectSet {
        self.clear_tutorial()
    }

    fn clear_tutorial(&mut self) -> EffectSet {
        self.reset_bench();
        self.tutorial.clear();
        EffectSet::TUTORIAL_CLEARED | EffectSet::RETICLE_MOVED | EffectSet::ZERO_CHANGED
    }

    fn reset_bench(&mut self) {
        self.reticle = PixelPoint::ZERO;
        self.zero = PixelPoint::ZERO;
        self.angle_mode = false;
        self.angle_points.clear();
        self.magnification = self.config.default_magnification;
        self.unit = self.config.default_unit;
        self.selected_sample = None;
    }

    /// Advance if the current step is waiting for the user to act on
    /// `action_id`.
    fn advance_on_action(&mut self, action_id: &str) -> EffectSet {
        let accepts = self
            .tutorial
            .current_step_def(&self.tutorials)
            .is_some_and(|step| step.accepts_action(action_id));

        if accepts && self.tutorial.advance(&self.tutorials).is_some() {
            EffectSet::STEP_ADVANCED
        } else {
            EffectSet::NONE
        }
    }

    // =========================================================================
    // STAGE
    // =========================================================================

    /// Move the reticle by `delta` pixels on `axis`.
    ///
    /// When the current step is an alignment step and the move crosses its
    /// target, the coordinate snaps onto the target exactly.
    pub fn move_point(&mut self, axis: Axis, delta: i32) -> EffectSet {
        let prev = self.reticle;
        let proposed = prev.get(axis).saturating_add(delta);
        let tolerance = self.config.alignment_tolerance_px;

        let outcome = self
            .tutorial
            .current_step_def(&self.tutorials)
            .map_or_else(
                || AlignmentOutcome::unchanged(proposed),
                |step| alignment::evaluate(&step.advance, axis, prev, proposed, tolerance),
            );

        let mut effects = EffectSet::NONE;
        self.reticle.set(axis, outcome.coordinate);
        if self.reticle != prev {
            effects |= EffectSet::RETICLE_MOVED;
        }
        if outcome.snapped {
            tracing::debug!(%axis, proposed, snapped_to = outcome.coordinate, "reticle snapped");
            effects |= EffectSet::SNAPPED;
        }
        if outcome.advance && self.tutorial.advance(&self.tutorials).is_some() {
            effects |= EffectSet::STEP_ADVANCED;
        }
        self.finish(effects)
    }

    /// Take the current reticle coordinate on `axis` as the reference origin.
    pub fn set_relative_zero(&mut self, axis: Axis) -> EffectSet {
        let mut effects = EffectSet::NONE;
        let value = self.reticle.get(axis);
        if self.zero.get(axis) != value {
            self.zero.set(axis, value);
            effects |= EffectSet::ZERO_CHANGED;
        }
        effects |= self.advance_on_action(&format!("zero-{axis}-button"));
        self.finish(effects)
    }

    /// Move the reticle home and clear both zero offsets.
    pub fn reset_absolute_zero(&mut self) -> EffectSet {
        let mut effects = EffectSet::NONE;
        if self.reticle != PixelPoint::ZERO {
            effects |= EffectSet::RETICLE_MOVED;
        }
        if self.zero != PixelPoint::ZERO {
            effects |= EffectSet::ZERO_CHANGED;
        }
        self.reticle = PixelPoint::ZERO;
        self.zero = PixelPoint::ZERO;
        effects |= self.advance_on_action(TARGET_ABSOLUTE_ZERO);
        self.finish(effects)
    }

    // =========================================================================
    // INSTRUMENT
    // =========================================================================

    pub fn set_magnification(&mut self, level: Magnification) -> EffectSet {
        let mut effects = EffectSet::NONE;
        if self.magnification != level {
            self.magnification = level;
            effects |= EffectSet::MAGNIFICATION_CHANGED;
        }
        effects |= self.advance_on_action(&level.target_id());
        self.finish(effects)
    }

    /// Set magnification from a raw lens level (10, 20, 50, 100).
    pub fn set_magnification_level(&mut self, level: u32) -> Result<EffectSet, Fault> {
        let level = Magnification::try_from(level)?;
        Ok(self.set_magnification(level))
    }

    /// Change the DRO unit label. Pixel math is unaffected.
    pub fn set_unit(&mut self, unit: Unit) -> EffectSet {
        if self.unit == unit {
            return self.finish(EffectSet::NONE);
        }
        self.unit = unit;
        self.finish(EffectSet::UNIT_CHANGED)
    }

    /// Place `sample` on the stage.
    pub fn select_sample(&mut self, sample: Sample) -> EffectSet {
        let target = sample.target_id();
        tracing::debug!(sample = %sample.id, "sample selected");
        self.selected_sample = Some(sample);
        let effects = EffectSet::SAMPLE_CHANGED | self.advance_on_action(&target);
        self.finish(effects)
    }

    /// Select a sample from the catalog by id.
    pub fn select_sample_by_id(&mut self, sample_id: &str) -> Result<EffectSet, Fault> {
        let sample = self
            .samples
            .find(&self.config.experiment_id, sample_id)
            .cloned()
            .ok_or_else(|| Fault::UnknownSample(sample_id.to_string()))?;
        Ok(self.select_sample(sample))
    }

    // =========================================================================
    // ANGLE
    // =========================================================================

    /// Flip angle mode. Both directions discard captured points and results.
    ///
    /// Leaving angle mode while an angle tutorial is running abandons the
    /// tutorial.
    pub fn toggle_angle_mode(&mut self) -> EffectSet {
        self.angle_mode = !self.angle_mode;
        self.angle_points.clear();

        let mut effects = EffectSet::ANGLE_MODE_CHANGED;
        if self.angle_mode {
            effects |= self.advance_on_action(TARGET_ANGLE_MODE_TOGGLE);
        } else if self
            .tutorial
            .script(&self.tutorials)
            .is_some_and(|script| script.is_angle())
        {
            tracing::debug!("angle mode left during angle tutorial, clearing tutorial");
            effects |= self.clear_tutorial();
        }
        self.finish(effects)
    }

    /// Capture the current DRO reading as the next angle point.
    ///
    /// Fails with `CapacityExceeded` once four points are stored.
    pub fn add_angle_point(&mut self) -> Result<EffectSet, Fault> {
        let point = units::relative_mm(self.reticle, self.zero);
        let count = self.angle_points.push(point)?;
        tracing::debug!(count, x = point.x, y = point.y, "angle point captured");

        let effects = EffectSet::POINT_ADDED | self.advance_on_action(TARGET_ADD_POINT);
        Ok(self.finish(effects))
    }

    // =========================================================================
    // INTENTS
    // =========================================================================

    /// Execute an intent, surfacing faults.
    pub fn execute(&mut self, intent: &Intent) -> Result<EffectSet, Fault> {
        tracing::debug!(intent = intent.kind(), "executing intent");
        match intent {
            Intent::StartTutorial { name } => self.start_tutorial(name.as_deref()),
            Intent::Recalibrate => Ok(self.recalibrate()),
            Intent::MovePoint { axis, delta } => Ok(self.move_point(*axis, *delta)),
            Intent::SetRelativeZero { axis } => Ok(self.set_relative_zero(*axis)),
            Intent::ResetAbsoluteZero => Ok(self.reset_absolute_zero()),
            Intent::SetMagnification { level } => self.set_magnification_level(*level),
            Intent::SelectSample { sample_id } => self.select_sample_by_id(sample_id),
            Intent::SetUnit { unit } => Ok(self.set_unit(*unit)),
            Intent::ToggleAngleMode => Ok(self.toggle_angle_mode()),
            Intent::AddAnglePoint => self.add_angle_point(),
        }
    }

    /// Execute an intent, absorbing faults.
    ///
    /// Faults are logged and reported as an empty effect set; the session is
    /// unchanged.
    pub fn apply(&mut self, intent: &Intent) -> EffectSet {
        match self.execute(intent) {
            Ok(effects) => effects,
            Err(fault) if fault.is_bug() => {
                tracing::warn!(intent = intent.kind(), %fault, "intent rejected");
                EffectSet::NONE
            }
            Err(fault) => {
                tracing::debug!(intent = intent.kind(), %fault, "intent ignored");
                EffectSet::NONE
            }
        }
    }

    // =========================================================================
    // RECOMPUTATION
    // =========================================================================

    fn finish(&mut self, effects: EffectSet) -> EffectSet {
        effects | self.recompute()
    }

    /// Rebuild everything derived from primary state.
    fn recompute(&mut self) -> EffectSet {
        let mut effects = EffectSet::NONE;

        let calculated_angle = if self.angle_mode {
            self.angle_points.quad().map(angle::included_angle_or_zero)
        } else {
            None
        };

        if calculated_angle.is_some() {
            effects |= self.jump_after_angle();
        }

        let result = match calculated_angle {
            Some(degrees) => Some(MeasuredResult::angle(
                degrees,
                self.selected_sample.as_ref(),
            )),
            None => self.diameter_result(),
        };

        let derived = Derived {
            calculated_angle,
            result,
        };
        if derived != self.derived {
            self.derived = derived;
            effects |= EffectSet::RESULT_CHANGED;
        }
        effects
    }

    /// Take the current step's angle-computed transition, if it has one.
    fn jump_after_angle(&mut self) -> EffectSet {
        let target = match self.tutorial.current_step_def(&self.tutorials) {
            Some(step) => match step.advance {
                AdvanceRule::AngleComputed { jump_to } => jump_to,
                _ => return EffectSet::NONE,
            },
            None => return EffectSet::NONE,
        };
        if self.tutorial.jump_to(&self.tutorials, target) {
            EffectSet::STEP_ADVANCED
        } else {
            EffectSet::NONE
        }
    }

    /// Diameter result, present only on the last step of a diameter tutorial
    /// with a sample selected and angle mode off.
    fn diameter_result(&self) -> Option<MeasuredResult> {
        if self.angle_mode {
            return None;
        }
        let script = self.tutorial.script(&self.tutorials)?;
        let MeasurementKind::Diameter { reference } = script.measurement else {
            return None;
        };
        if !script.is_last(self.tutorial.current_step()) {
            return None;
        }
        let sample = self.selected_sample.as_ref()?;
        let measured_mm = units::span_mm(self.zero.y, self.reticle.y).abs();
        Some(MeasuredResult::diameter(measured_mm, sample, reference))
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn tutorials(&self) -> &TutorialCatalog {
        &self.tutorials
    }

    pub fn samples(&self) -> &SampleCatalog {
        &self.samples
    }

    pub fn reticle(&self) -> PixelPoint {
        self.reticle
    }

    pub fn zero_offset(&self) -> PixelPoint {
        self.zero
    }

    pub fn magnification(&self) -> Magnification {
        self.magnification
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn selected_sample(&self) -> Option<&Sample> {
        self.selected_sample.as_ref()
    }

    pub fn angle_mode(&self) -> bool {
        self.angle_mode
    }

    pub fn angle_points(&self) -> &AnglePoints {
        &self.angle_points
    }

    pub fn tutorial(&self) -> &TutorialState {
        &self.tutorial
    }

    pub fn tutorial_active(&self) -> bool {
        self.tutorial.is_active()
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn calculated_angle(&self) -> Option<f64> {
        self.derived.calculated_angle
    }

    pub fn result(&self) -> Option<&MeasuredResult> {
        self.derived.result.as_ref()
    }

    /// Relative DRO reading in millimetres.
    pub fn dro_reading(&self) -> MmPoint {
        units::relative_mm(self.reticle, self.zero)
    }

    pub fn highlight_target_id(&self) -> Option<&str> {
        self.tutorial.highlight_target(&self.tutorials)
    }

    pub fn tutorial_message(&self) -> String {
        self.tutorial
            .message(&self.tutorials, &self.config.idle_message)
    }

    /// Whether to draw the horizontal guide line for an edge alignment.
    pub fn show_alignment_line(&self) -> bool {
        let Some(script) = self.tutorial.script(&self.tutorials) else {
            return false;
        };
        script.is_diameter()
            && self
                .tutorial
                .current_step_def(&self.tutorials)
                .is_some_and(|step| step.advance.is_alignment())
    }

    /// Whether the sample library button for `sample_id` is enabled.
    ///
    /// Without a tutorial everything is selectable. During a tutorial only
    /// the sample a step is asking for can be picked.
    pub fn sample_selectable(&self, sample_id: &str) -> bool {
        if !self.tutorial.is_active() {
            return true;
        }
        let highlight = self.highlight_target_id();
        let asks_for_sample = highlight.is_some_and(|t| t.starts_with("sample-"));
        let required = self
            .tutorial
            .script(&self.tutorials)
            .and_then(|script| script.required_sample.as_deref());

        if highlight == Some(format!("sample-{sample_id}").as_str()) {
            true
        } else if required.is_some_and(|r| r != sample_id) {
            false
        } else if required.is_none() && asks_for_sample {
            false
        } else {
            asks_for_sample
        }
    }

    pub fn snapshot(&self) -> LabSnapshot {
        LabSnapshot::capture(self)
    }
}

impl Default for LabSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ANGLE_MEASURE, GEAR_OD, IDLE_PROMPT, SCREW_OD};
    use pretty_assertions::assert_eq;

    fn session() -> LabSession {
        LabSession::with_defaults()
    }

    #[test]
    fn fresh_session() {
        let s = session();
        assert_eq!(s.reticle(), PixelPoint::ZERO);
        assert_eq!(s.magnification(), Magnification::X10);
        assert_eq!(s.unit(), Unit::Millimetres);
        assert!(!s.tutorial_active());
        assert_eq!(s.tutorial_message(), IDLE_PROMPT);
        assert_eq!(s.highlight_target_id(), None);
        assert!(s.derived().is_empty());
    }

    #[test]
    fn free_movement_has_no_clamp() {
        let mut s = session();
        let effects = s.move_point(Axis::X, -5000);
        assert!(effects.contains(EffectSet::RETICLE_MOVED));
        assert_eq!(s.reticle(), PixelPoint::new(-5000, 0));

        let effects = s.move_point(Axis::Y, 0);
        assert!(effects.is_empty());

        s.move_point(Axis::X, i32::MIN);
        assert_eq!(s.reticle().x, i32::MIN);
    }

    #[test]
    fn zero_and_dro() {
        let mut s = session();
        s.move_point(Axis::Y, -86);
        s.set_relative_zero(Axis::Y);
        s.move_point(Axis::Y, 170);
        s.move_point(Axis::X, 40);
        assert_eq!(s.zero_offset(), PixelPoint::new(0, -86));
        assert_eq!(s.dro_reading(), MmPoint::new(10.0, -42.5));

        s.reset_absolute_zero();
        assert_eq!(s.reticle(), PixelPoint::ZERO);
        assert_eq!(s.zero_offset(), PixelPoint::ZERO);
    }

    #[test]
    fn start_resets_bench() {
        let mut s = session();
        s.move_point(Axis::X, 30);
        s.set_relative_zero(Axis::X);
        s.set_magnification(Magnification::X50);
        s.set_unit(Unit::Inches);
        s.select_sample_by_id("screw").unwrap();
        s.toggle_angle_mode();
        s.add_angle_point().unwrap();

        let effects = s.start_tutorial(Some(GEAR_OD)).unwrap();
        assert!(effects.contains(EffectSet::TUTORIAL_STARTED));
        assert_eq!(s.reticle(), PixelPoint::ZERO);
        assert_eq!(s.zero_offset(), PixelPoint::ZERO);
        assert_eq!(s.magnification(), Magnification::X10);
        assert_eq!(s.unit(), Unit::Millimetres);
        assert_eq!(s.selected_sample(), None);
        assert!(!s.angle_mode());
        assert!(s.angle_points().is_empty());
        assert_eq!(s.tutorial().current_step(), 1);
    }

    #[test]
    fn unknown_tutorial_changes_nothing() {
        let mut s = session();
        s.start_tutorial(Some(SCREW_OD)).unwrap();
        s.move_point(Axis::Y, -3);
        let before = s.snapshot();

        let err = s.start_tutorial(Some("NOPE")).unwrap_err();
        assert_eq!(err, Fault::UnknownTutorial("NOPE".into()));
        assert_eq!(s.snapshot(), before);

        assert_eq!(s.apply(&Intent::start("NOPE")), EffectSet::NONE);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn actions_advance_only_on_matching_target() {
        let mut s = session();
        s.start_tutorial(Some(GEAR_OD)).unwrap();

        // Wrong sample does not advance.
        let effects = s.select_sample_by_id("screw").unwrap();
        assert!(!effects.advanced());
        assert_eq!(s.tutorial().current_step(), 1);

        let effects = s.select_sample_by_id("gear").unwrap();
        assert!(effects.advanced());
        assert_eq!(s.tutorial().current_step(), 2);

        // Wrong lens, then the right one.
        assert!(!s.set_magnification(Magnification::X20).advanced());
        assert!(s.set_magnification(Magnification::X10).advanced());
        assert_eq!(s.tutorial().current_step(), 3);
        assert_eq!(s.highlight_target_id(), Some("stage-controls-grid"));
    }

    #[test]
    fn alignment_line_only_on_crossing_steps() {
        let mut s = session();
        s.start_tutorial(Some(GEAR_OD)).unwrap();
        assert!(!s.show_alignment_line());
        s.select_sample_by_id("gear").unwrap();
        s.set_magnification(Magnification::X10);
        assert!(s.show_alignment_line());
        s.move_point(Axis::Y, -90);
        assert_eq!(s.reticle().y, -86);
        assert!(!s.show_alignment_line());
    }

    #[test]
    fn sample_lock_follows_tutorial() {
        let mut s = session();
        assert!(s.sample_selectable("screw"));

        s.start_tutorial(Some(GEAR_OD)).unwrap();
        assert!(s.sample_selectable("gear"));
        assert!(!s.sample_selectable("screw"));
        assert!(!s.sample_selectable("v-profile"));

        s.select_sample_by_id("gear").unwrap();
        assert!(!s.sample_selectable("gear"));
    }

    #[test]
    fn angle_point_capacity() {
        let mut s = session();
        s.toggle_angle_mode();
        for expected in 1..=4 {
            s.move_point(Axis::X, 4);
            let effects = s.add_angle_point().unwrap();
            assert!(effects.contains(EffectSet::POINT_ADDED));
            assert_eq!(s.angle_points().len(), expected);
        }
        assert_eq!(s.add_angle_point(), Err(Fault::CapacityExceeded { max: 4 }));
        assert_eq!(s.angle_points().len(), 4);

        // Collinear points: angle is 0.
        assert_eq!(s.calculated_angle(), Some(0.0));
    }

    #[test]
    fn toggling_angle_mode_clears_capture() {
        let mut s = session();
        s.toggle_angle_mode();
        for (x, y) in [(52, 22), (28, -22), (-28, -22), (-52, 22)] {
            s.reset_absolute_zero();
            s.move_point(Axis::X, x);
            s.move_point(Axis::Y, y);
            s.add_angle_point().unwrap();
        }
        assert!(s.calculated_angle().is_some());

        let effects = s.toggle_angle_mode();
        assert!(effects.contains(EffectSet::RESULT_CHANGED));
        assert!(s.angle_points().is_empty());
        assert_eq!(s.calculated_angle(), None);
        assert_eq!(s.result(), None);
    }

    #[test]
    fn leaving_angle_mode_abandons_angle_tutorial() {
        let mut s = session();
        s.start_tutorial(Some(ANGLE_MEASURE)).unwrap();
        s.select_sample_by_id("v-profile").unwrap();
        s.set_magnification(Magnification::X10);
        assert!(s.toggle_angle_mode().advanced());
        assert_eq!(s.tutorial().current_step(), 23);

        let effects = s.toggle_angle_mode();
        assert!(effects.contains(EffectSet::TUTORIAL_CLEARED));
        assert!(!s.tutorial_active());
        assert_eq!(s.selected_sample(), None);
        assert_eq!(s.tutorial_message(), IDLE_PROMPT);
    }

    #[test]
    fn point_step_survives_extreme_coordinates() {
        let mut s = session();
        s.start_tutorial(Some(ANGLE_MEASURE)).unwrap();
        s.select_sample_by_id("v-profile").unwrap();
        s.set_magnification(Magnification::X10);
        s.toggle_angle_mode();
        assert_eq!(s.tutorial().current_step(), 23);

        s.move_point(Axis::X, i32::MIN);
        let effects = s.move_point(Axis::Y, 30);
        assert!(!effects.advanced());
        assert_eq!(s.reticle(), PixelPoint::new(i32::MIN, 22));
        assert_eq!(s.tutorial().current_step(), 23);
    }

    #[test]
    fn leaving_angle_mode_keeps_other_tutorials() {
        let mut s = session();
        s.start_tutorial(Some(GEAR_OD)).unwrap();
        s.toggle_angle_mode();
        s.toggle_angle_mode();
        assert_eq!(s.tutorial().active_name(), Some(GEAR_OD));
    }

    #[test]
    fn recalibrate_clears_tutorial() {
        let mut s = session();
        s.start_tutorial(Some(GEAR_OD)).unwrap();
        s.move_point(Axis::Y, 12);
        let effects = s.apply(&Intent::Recalibrate);
        assert!(effects.contains(EffectSet::TUTORIAL_CLEARED));
        assert!(!s.tutorial_active());
        assert_eq!(s.reticle(), PixelPoint::ZERO);
    }

    #[test]
    fn unit_change_is_label_only() {
        let mut s = session();
        s.move_point(Axis::X, 8);
        let before = s.dro_reading();
        assert_eq!(s.set_unit(Unit::Micrometres), EffectSet::UNIT_CHANGED);
        assert_eq!(s.dro_reading(), before);
        assert_eq!(s.set_unit(Unit::Micrometres), EffectSet::NONE);
    }

    #[test]
    fn catalog_faults_via_execute() {
        let mut s = session();
        assert_eq!(
            s.execute(&Intent::SetMagnification { level: 15 }),
            Err(Fault::UnsupportedMagnification(15))
        );
        assert_eq!(
            s.execute(&Intent::SelectSample {
                sample_id: "bolt".into()
            }),
            Err(Fault::UnknownSample("bolt".into()))
        );
        assert_eq!(s.magnification(), Magnification::X10);
        assert_eq!(s.selected_sample(), None);
    }

    #[test]
    fn tolerance_comes_from_config() {
        let config = LabConfig {
            alignment_tolerance_px: 5,
            ..LabConfig::default()
        };
        let mut s = LabSession::new(
            config,
            Arc::new(TutorialCatalog::builtin()),
            Arc::new(SampleCatalog::builtin()),
        );
        s.start_tutorial(Some(ANGLE_MEASURE)).unwrap();
        s.select_sample_by_id("v-profile").unwrap();
        s.set_magnification(Magnification::X10);
        s.toggle_angle_mode();
        assert_eq!(s.tutorial().current_step(), 23);

        // x = 48 is 4 px off target: outside the default tolerance, inside 5.
        s.move_point(Axis::X, 48);
        let effects = s.move_point(Axis::Y, 24);
        assert_eq!(s.reticle(), PixelPoint::new(48, 22));
        assert!(effects.advanced());
    }
}
