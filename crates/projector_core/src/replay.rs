//! Intent log for deterministic session reconstruction.
//!
//! A session is a pure function of its config, catalogs and the intents
//! applied to it, so replaying a log into a blank session reproduces the
//! exact state.

use serde::{Deserialize, Serialize};

use crate::effect::EffectSet;
use crate::intent::Intent;
use crate::session::LabSession;

/// An intent with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedIntent {
    pub seq: u64,
    pub intent: Intent,
}

/// Ordered record of applied intents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentLog {
    pub events: Vec<RecordedIntent>,
}

impl IntentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an intent, returning its sequence number.
    pub fn record(&mut self, intent: Intent) -> u64 {
        let seq = self.events.len() as u64;
        self.events.push(RecordedIntent { seq, intent });
        seq
    }

    /// Apply `intent` to `session` and record it.
    pub fn apply(&mut self, session: &mut LabSession, intent: Intent) -> EffectSet {
        let effects = session.apply(&intent);
        self.record(intent);
        effects
    }

    /// Replay every event into a blank copy of `template`.
    ///
    /// Faulting intents are absorbed the same way they were when recorded.
    pub fn replay(&self, template: &LabSession) -> LabSession {
        self.replay_to(template, u64::MAX)
    }

    /// Replay events up to and including `last_seq`.
    pub fn replay_to(&self, template: &LabSession, last_seq: u64) -> LabSession {
        let mut session = template.blank();
        for event in self.events.iter().take_while(|e| e.seq <= last_seq) {
            session.apply(&event.intent);
        }
        session
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
