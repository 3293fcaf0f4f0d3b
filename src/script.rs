//! Scripted lab sessions.
//!
//! A session script is a YAML list of user events, interleaved with
//! `expect` checkpoints:
//!
//! ```yaml
//! name: gear
//! events:
//!   - { action: start_tutorial, name: GEAR_OD }
//!   - { action: select_sample, sample: gear }
//!   - { action: key, key: ArrowUp, shift: true, presses: 11 }
//!   - { action: expect, step: 4, reticle: { x: 0, y: -86 } }
//! ```
//!
//! Faulting events are recorded and skipped, exactly as the lab absorbs them
//! interactively. Failed expectations do not stop the run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use projector_core::{
    Axis, EffectSet, Intent, IntentLog, LabSession, LabSnapshot, PixelPoint, StepId, Unit,
};
use projector_input::{InputDispatcher, KeyCode, KeyModifiers, RawInput};

use crate::assets::LabAssets;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read session script {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid session script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Session script '{0}' has no events")]
    Empty(String),
}

/// Checkpoint assertions. Only the fields that are set are checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<StepId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reticle: Option<PixelPoint>,
    /// Formatted measured value, e.g. `"42.500 mm"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial: Option<String>,
}

impl Expectation {
    /// Mismatches against `snapshot`, one message per failed field.
    pub fn check(&self, snapshot: &LabSnapshot) -> Vec<String> {
        let mut failures = Vec::new();
        if let Some(step) = self.step {
            if snapshot.current_step != step {
                failures.push(format!(
                    "expected step {step}, at step {}",
                    snapshot.current_step
                ));
            }
        }
        if let Some(reticle) = self.reticle {
            if snapshot.reticle != reticle {
                failures.push(format!(
                    "expected reticle ({}, {}), at ({}, {})",
                    reticle.x, reticle.y, snapshot.reticle.x, snapshot.reticle.y
                ));
            }
        }
        if let Some(expected) = &self.result {
            let actual = snapshot.result.as_ref().map(|r| r.measured());
            if actual != Some(expected.as_str()) {
                failures.push(format!(
                    "expected result {expected:?}, got {}",
                    actual.unwrap_or("nothing")
                ));
            }
        }
        if let Some(finished) = self.finished {
            if snapshot.tutorial_finished != finished {
                failures.push(format!(
                    "expected finished = {finished}, got {}",
                    snapshot.tutorial_finished
                ));
            }
        }
        if let Some(expected) = &self.tutorial {
            if snapshot.tutorial.as_deref() != Some(expected.as_str()) {
                failures.push(format!(
                    "expected tutorial {expected}, got {}",
                    snapshot.tutorial.as_deref().unwrap_or("none")
                ));
            }
        }
        failures
    }
}

/// One scripted user event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionEvent {
    StartTutorial {
        #[serde(default)]
        name: Option<String>,
    },
    Recalibrate,
    Move {
        axis: Axis,
        delta: i32,
    },
    Zero {
        axis: Axis,
    },
    ResetZero,
    Magnification {
        level: u32,
    },
    SelectSample {
        sample: String,
    },
    Unit {
        unit: Unit,
    },
    ToggleAngleMode,
    AddPoint,
    /// Press a key `presses` times (one key-down, then repeats).
    Key {
        key: KeyCode,
        #[serde(default)]
        shift: bool,
        #[serde(default = "one")]
        presses: u32,
    },
    Expect(Expectation),
}

fn one() -> u32 {
    1
}

impl SessionEvent {
    /// The intent for direct events; `None` for keys and checkpoints.
    pub fn to_intent(&self) -> Option<Intent> {
        let intent = match self {
            SessionEvent::StartTutorial { name } => Intent::StartTutorial { name: name.clone() },
            SessionEvent::Recalibrate => Intent::Recalibrate,
            SessionEvent::Move { axis, delta } => Intent::MovePoint {
                axis: *axis,
                delta: *delta,
            },
            SessionEvent::Zero { axis } => Intent::SetRelativeZero { axis: *axis },
            SessionEvent::ResetZero => Intent::ResetAbsoluteZero,
            SessionEvent::Magnification { level } => Intent::SetMagnification { level: *level },
            SessionEvent::SelectSample { sample } => Intent::SelectSample {
                sample_id: sample.clone(),
            },
            SessionEvent::Unit { unit } => Intent::SetUnit { unit: *unit },
            SessionEvent::ToggleAngleMode => Intent::ToggleAngleMode,
            SessionEvent::AddPoint => Intent::AddAnglePoint,
            SessionEvent::Key { .. } | SessionEvent::Expect(_) => return None,
        };
        Some(intent)
    }
}

/// A named list of events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub events: Vec<SessionEvent>,
}

impl SessionScript {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScriptError> {
        let script: SessionScript = serde_yaml::from_str(yaml)?;
        if script.events.is_empty() {
            return Err(ScriptError::Empty(script.name));
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }
}

/// An event the session rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFault {
    pub index: usize,
    pub message: String,
}

/// A checkpoint that did not hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationFailure {
    pub index: usize,
    pub message: String,
}

/// Outcome of one scripted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub script: String,
    pub events: usize,
    /// Tutorial steps advanced over the whole run.
    pub advances: usize,
    /// Key presses swallowed by the tutorial lock.
    pub locked_presses: usize,
    pub faults: Vec<EventFault>,
    pub failures: Vec<ExpectationFailure>,
    /// Replaying the intent log reproduced the final state.
    pub replay_consistent: bool,
    pub intents: IntentLog,
    pub snapshot: LabSnapshot,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.replay_consistent
    }
}

/// Plays session scripts against a session.
pub struct SessionRunner {
    session: LabSession,
    dispatcher: InputDispatcher,
    log: IntentLog,
    advances: usize,
    locked_presses: usize,
}

impl SessionRunner {
    pub fn new(assets: &LabAssets) -> Self {
        Self::with_parts(assets.session(), assets.dispatcher())
    }

    /// `session` should be fresh: the replay check starts from a blank copy.
    pub fn with_parts(session: LabSession, dispatcher: InputDispatcher) -> Self {
        Self {
            session,
            dispatcher,
            log: IntentLog::new(),
            advances: 0,
            locked_presses: 0,
        }
    }

    pub fn session(&self) -> &LabSession {
        &self.session
    }

    /// Run every event of `script` and summarise.
    pub fn run(mut self, script: &SessionScript) -> RunSummary {
        let template = self.session.blank();
        let mut faults = Vec::new();
        let mut failures = Vec::new();

        tracing::info!(script = %script.name, events = script.events.len(), "running session script");

        for (index, event) in script.events.iter().enumerate() {
            match event {
                SessionEvent::Expect(expectation) => {
                    let snapshot = self.session.snapshot();
                    for message in expectation.check(&snapshot) {
                        tracing::warn!(index, %message, "expectation failed");
                        failures.push(ExpectationFailure { index, message });
                    }
                }
                SessionEvent::Key {
                    key,
                    shift,
                    presses,
                } => self.press(*key, *shift, *presses),
                direct => {
                    if let Some(intent) = direct.to_intent() {
                        if let Err(message) = self.execute(intent) {
                            faults.push(EventFault { index, message });
                        }
                    }
                }
            }
        }

        let snapshot = self.session.snapshot();
        let replay_consistent = self.log.replay(&template).snapshot() == snapshot;
        if !replay_consistent {
            tracing::warn!(script = %script.name, "intent log replay diverged");
        }

        RunSummary {
            script: script.name.clone(),
            events: script.events.len(),
            advances: self.advances,
            locked_presses: self.locked_presses,
            faults,
            failures,
            replay_consistent,
            intents: self.log,
            snapshot,
        }
    }

    fn execute(&mut self, intent: Intent) -> Result<(), String> {
        let outcome = self.session.execute(&intent);
        self.log.record(intent);
        match outcome {
            Ok(effects) => {
                self.count(effects);
                Ok(())
            }
            Err(fault) => {
                tracing::debug!(%fault, "scripted event rejected");
                Err(fault.to_string())
            }
        }
    }

    fn press(&mut self, key: KeyCode, shift: bool, presses: u32) {
        let modifiers = if shift {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        for n in 0..presses {
            let raw = if n == 0 {
                RawInput::key_down_with(key, modifiers)
            } else {
                RawInput::key_repeat(key, modifiers)
            };
            match self.dispatcher.translate(&raw, &self.session) {
                Some(intent) => {
                    // Movement never faults.
                    let _ = self.execute(intent);
                }
                None if self.dispatcher.config().direction_for(key).is_some() => {
                    self.locked_presses += 1;
                }
                None => {}
            }
        }
        self.dispatcher.dispatch(&RawInput::key_up(key), &mut self.session);
    }

    fn count(&mut self, effects: EffectSet) {
        if effects.advanced() {
            self.advances += 1;
        }
    }
}
