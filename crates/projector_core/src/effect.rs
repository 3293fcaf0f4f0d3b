//! Effect flags - what an operation changed.
//!
//! Every `LabSession` operation returns an `EffectSet`. The presentation
//! layer checks the flags to decide what to redraw or animate.

use bitflags::bitflags;

bitflags! {
    /// Set of effects produced by a lab operation.
    ///
    /// # Example
    ///
    /// ```
    /// use projector_core::EffectSet;
    ///
    /// let effects = EffectSet::RETICLE_MOVED | EffectSet::SNAPPED;
    /// assert!(effects.reticle_changed());
    /// assert!(!effects.tutorial_changed());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EffectSet: u16 {
        /// No effects.
        const NONE = 0;

        // =====================================================================
        // STAGE EFFECTS
        // =====================================================================

        /// Reticle position changed.
        const RETICLE_MOVED = 1 << 0;

        /// Movement was overridden to land exactly on an alignment target.
        const SNAPPED = 1 << 1;

        /// Zero offset changed on at least one axis.
        const ZERO_CHANGED = 1 << 2;

        // =====================================================================
        // INSTRUMENT EFFECTS
        // =====================================================================

        /// Lens magnification changed.
        const MAGNIFICATION_CHANGED = 1 << 3;

        /// Display unit changed.
        const UNIT_CHANGED = 1 << 4;

        /// Selected sample changed.
        const SAMPLE_CHANGED = 1 << 5;

        // =====================================================================
        // ANGLE EFFECTS
        // =====================================================================

        /// Angle mode toggled.
        const ANGLE_MODE_CHANGED = 1 << 6;

        /// Angle point appended.
        const POINT_ADDED = 1 << 7;

        // =====================================================================
        // TUTORIAL EFFECTS
        // =====================================================================

        /// Tutorial started (or restarted).
        const TUTORIAL_STARTED = 1 << 8;

        /// Tutorial cleared.
        const TUTORIAL_CLEARED = 1 << 9;

        /// Current step advanced.
        const STEP_ADVANCED = 1 << 10;

        // =====================================================================
        // DERIVED EFFECTS
        // =====================================================================

        /// Measured result or calculated angle changed.
        const RESULT_CHANGED = 1 << 11;
    }
}

impl Default for EffectSet {
    fn default() -> Self {
        EffectSet::NONE
    }
}

impl EffectSet {
    /// Check if the reticle or zero reference changed (DRO needs redraw).
    pub fn reticle_changed(&self) -> bool {
        self.intersects(
            EffectSet::RETICLE_MOVED | EffectSet::SNAPPED | EffectSet::ZERO_CHANGED,
        )
    }

    /// Check if any tutorial-related effects are set.
    pub fn tutorial_changed(&self) -> bool {
        self.intersects(
            EffectSet::TUTORIAL_STARTED | EffectSet::TUTORIAL_CLEARED | EffectSet::STEP_ADVANCED,
        )
    }

    /// Check if the tutorial moved on to another step.
    pub fn advanced(&self) -> bool {
        self.contains(EffectSet::STEP_ADVANCED)
    }
}
