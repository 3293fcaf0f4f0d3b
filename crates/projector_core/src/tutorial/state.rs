//! Tutorial progress: which script is active and which step it is on.

use serde::{Deserialize, Serialize};

use crate::tutorial::{Step, StepId, TutorialCatalog, TutorialScript};
use crate::{Fault, NO_STEP};

/// Position within the active tutorial.
///
/// `current_step` is [`NO_STEP`] exactly when no script is active; otherwise
/// it is a step id of the active script. Only [`TutorialState::start`],
/// [`TutorialState::advance`], [`TutorialState::jump_to`] and
/// [`TutorialState::clear`] change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialState {
    active: Option<String>,
    current_step: StepId,
}

impl Default for TutorialState {
    fn default() -> Self {
        Self::idle()
    }
}

impl TutorialState {
    /// No tutorial running.
    pub fn idle() -> Self {
        Self {
            active: None,
            current_step: NO_STEP,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// The active script, looked up in `catalog`.
    pub fn script<'c>(&self, catalog: &'c TutorialCatalog) -> Option<&'c TutorialScript> {
        catalog.get(self.active.as_deref()?)
    }

    /// Definition of the current step.
    pub fn current_step_def<'c>(&self, catalog: &'c TutorialCatalog) -> Option<&'c Step> {
        self.script(catalog)?.step(self.current_step)
    }

    /// Activate `name` at its first step.
    ///
    /// Unknown names (and scripts without steps) leave the state untouched.
    pub fn start(&mut self, catalog: &TutorialCatalog, name: &str) -> Result<StepId, Fault> {
        let first = catalog
            .get(name)
            .and_then(TutorialScript::first_step_id)
            .ok_or_else(|| Fault::UnknownTutorial(name.to_string()))?;

        self.active = Some(name.to_string());
        self.current_step = first;
        tracing::debug!(tutorial = name, step = first, "tutorial started");
        Ok(first)
    }

    pub fn clear(&mut self) {
        if let Some(name) = self.active.take() {
            tracing::debug!(tutorial = %name, "tutorial cleared");
        }
        self.current_step = NO_STEP;
    }

    /// Move to the next step in list order.
    ///
    /// Returns the new step id, or `None` when already on the last step (or
    /// no tutorial is active).
    pub fn advance(&mut self, catalog: &TutorialCatalog) -> Option<StepId> {
        let next = self.script(catalog)?.next_step_id(self.current_step)?;
        tracing::debug!(from = self.current_step, to = next, "tutorial advanced");
        self.current_step = next;
        Some(next)
    }

    /// Jump directly to `target`, which must be a step of the active script.
    pub fn jump_to(&mut self, catalog: &TutorialCatalog, target: StepId) -> bool {
        let valid = self
            .script(catalog)
            .is_some_and(|script| script.step(target).is_some());
        if valid {
            tracing::debug!(from = self.current_step, to = target, "tutorial jump");
            self.current_step = target;
        }
        valid
    }

    /// Prompt to display: step message, else the script's start message,
    /// else `idle`.
    pub fn message(&self, catalog: &TutorialCatalog, idle: &str) -> String {
        if let Some(step) = self.current_step_def(catalog) {
            return step.message.clone();
        }
        match self.script(catalog) {
            Some(script) => script.start_message.clone(),
            None => idle.to_string(),
        }
    }

    /// Control the user should act on next.
    pub fn highlight_target<'c>(&self, catalog: &'c TutorialCatalog) -> Option<&'c str> {
        self.current_step_def(catalog).map(|s| s.target_id.as_str())
    }

    /// Check if the active script has reached its last step.
    pub fn is_finished(&self, catalog: &TutorialCatalog) -> bool {
        self.script(catalog)
            .is_some_and(|script| script.is_last(self.current_step))
    }
}
