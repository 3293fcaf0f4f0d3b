//! Raw input events.

use serde::{Deserialize, Serialize};

use crate::keyboard::{KeyCode, KeyModifiers};

/// Platform-neutral input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RawInput {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        #[serde(default)]
        modifiers: KeyModifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        #[serde(default)]
        modifiers: KeyModifiers,
    },

    /// Key held and repeating.
    KeyRepeat {
        key: KeyCode,
        #[serde(default)]
        modifiers: KeyModifiers,
    },

    /// The lab surface gained keyboard focus.
    FocusGained,

    /// The lab surface lost keyboard focus.
    FocusLost,
}

impl RawInput {
    pub fn key_down(key: KeyCode) -> Self {
        RawInput::KeyDown {
            key,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn key_down_with(key: KeyCode, modifiers: KeyModifiers) -> Self {
        RawInput::KeyDown { key, modifiers }
    }

    pub fn key_repeat(key: KeyCode, modifiers: KeyModifiers) -> Self {
        RawInput::KeyRepeat { key, modifiers }
    }

    pub fn key_up(key: KeyCode) -> Self {
        RawInput::KeyUp {
            key,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Key and modifiers for events that press a key (down or repeat).
    pub fn pressed(&self) -> Option<(KeyCode, KeyModifiers)> {
        match *self {
            RawInput::KeyDown { key, modifiers } | RawInput::KeyRepeat { key, modifiers } => {
                Some((key, modifiers))
            }
            _ => None,
        }
    }
}
