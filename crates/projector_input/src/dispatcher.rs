//! Raw input → intent translation.

use projector_core::{EffectSet, Intent, LabSession};

use crate::config::InputConfig;
use crate::raw::RawInput;

/// Turns key events into stage movement for one session.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    config: InputConfig,
    focused: bool,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

impl InputDispatcher {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            focused: true,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Check if the tutorial lock currently allows stage movement.
    pub fn movement_allowed(&self, session: &LabSession) -> bool {
        if !session.tutorial_active() {
            return true;
        }
        session
            .highlight_target_id()
            .is_some_and(|target| self.config.permits_target(target))
    }

    /// Translate one event without touching the session.
    ///
    /// Key-down and key-repeat on a bound key produce a movement intent;
    /// everything else (including suppressed movement) produces nothing.
    pub fn translate(&self, input: &RawInput, session: &LabSession) -> Option<Intent> {
        if !self.focused {
            return None;
        }
        let (key, modifiers) = input.pressed()?;
        let direction = self.config.direction_for(key)?;

        if !self.movement_allowed(session) {
            tracing::trace!(
                %key,
                highlight = session.highlight_target_id(),
                "movement locked by tutorial"
            );
            return None;
        }

        let delta = direction.sign() * self.config.step_for(modifiers);
        Some(Intent::MovePoint {
            axis: direction.axis(),
            delta,
        })
    }

    /// Handle one event: track focus, translate, then apply to `session`.
    pub fn dispatch(&mut self, input: &RawInput, session: &mut LabSession) -> EffectSet {
        match input {
            RawInput::FocusGained => {
                self.focused = true;
                EffectSet::NONE
            }
            RawInput::FocusLost => {
                self.focused = false;
                EffectSet::NONE
            }
            _ => match self.translate(input, session) {
                Some(intent) => session.apply(&intent),
                None => EffectSet::NONE,
            },
        }
    }
}
