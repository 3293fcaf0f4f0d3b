//! Key codes and modifier state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::InputError;

/// Keys the lab reacts to.
///
/// Names follow the browser `KeyboardEvent.code` values so that bindings
/// read the same in config files as in front-end code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyH,
    KeyJ,
    KeyK,
    KeyL,
    Home,
    Escape,
    Space,
}

impl KeyCode {
    pub const ALL: [KeyCode; 15] = [
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::KeyW,
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::KeyD,
        KeyCode::KeyH,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::Home,
        KeyCode::Escape,
        KeyCode::Space,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyCode::ArrowUp => "ArrowUp",
            KeyCode::ArrowDown => "ArrowDown",
            KeyCode::ArrowLeft => "ArrowLeft",
            KeyCode::ArrowRight => "ArrowRight",
            KeyCode::KeyW => "KeyW",
            KeyCode::KeyA => "KeyA",
            KeyCode::KeyS => "KeyS",
            KeyCode::KeyD => "KeyD",
            KeyCode::KeyH => "KeyH",
            KeyCode::KeyJ => "KeyJ",
            KeyCode::KeyK => "KeyK",
            KeyCode::KeyL => "KeyL",
            KeyCode::Home => "Home",
            KeyCode::Escape => "Escape",
            KeyCode::Space => "Space",
        }
    }

    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            KeyCode::ArrowUp | KeyCode::ArrowDown | KeyCode::ArrowLeft | KeyCode::ArrowRight
        )
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyCode {
    type Err = InputError;

    /// Accepts the canonical name, a short arrow name (`up`) or a bare
    /// letter (`w`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let short = match lower.as_str() {
            "up" => Some(KeyCode::ArrowUp),
            "down" => Some(KeyCode::ArrowDown),
            "left" => Some(KeyCode::ArrowLeft),
            "right" => Some(KeyCode::ArrowRight),
            "w" => Some(KeyCode::KeyW),
            "a" => Some(KeyCode::KeyA),
            "s" => Some(KeyCode::KeyS),
            "d" => Some(KeyCode::KeyD),
            "h" => Some(KeyCode::KeyH),
            "j" => Some(KeyCode::KeyJ),
            "k" => Some(KeyCode::KeyK),
            "l" => Some(KeyCode::KeyL),
            "esc" => Some(KeyCode::Escape),
            _ => None,
        };
        short
            .or_else(|| {
                KeyCode::ALL
                    .into_iter()
                    .find(|k| k.as_str().eq_ignore_ascii_case(&lower))
            })
            .ok_or_else(|| InputError::UnknownKey(s.to_string()))
    }
}

/// A single modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    #[default]
    Shift,
    Ctrl,
    Alt,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyModifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: KeyModifiers = KeyModifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt)
    }

    /// Check if `modifier` is held.
    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_names() {
        assert_eq!("ArrowUp".parse::<KeyCode>().unwrap(), KeyCode::ArrowUp);
        assert_eq!("arrowleft".parse::<KeyCode>().unwrap(), KeyCode::ArrowLeft);
        assert_eq!("up".parse::<KeyCode>().unwrap(), KeyCode::ArrowUp);
        assert_eq!("W".parse::<KeyCode>().unwrap(), KeyCode::KeyW);
        assert_eq!("Home".parse::<KeyCode>().unwrap(), KeyCode::Home);
        assert!(matches!(
            "F13".parse::<KeyCode>(),
            Err(InputError::UnknownKey(k)) if k == "F13"
        ));
    }

    #[test]
    fn display_round_trips() {
        for key in KeyCode::ALL {
            assert_eq!(key.to_string().parse::<KeyCode>().unwrap(), key);
        }
    }

    #[test]
    fn modifiers() {
        assert!(KeyModifiers::NONE.is_empty());
        assert!(KeyModifiers::SHIFT.has(Modifier::Shift));
        assert!(!KeyModifiers::SHIFT.has(Modifier::Ctrl));
        let both = KeyModifiers::CTRL.with_shift();
        assert!(both.has(Modifier::Shift) && both.has(Modifier::Ctrl));
        assert!(!both.is_empty());
    }
}
