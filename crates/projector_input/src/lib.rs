//! Keyboard input for the profile projector lab.
//!
//! Raw key events are translated into stage movement intents:
//!
//! ```text
//! Keyboard ──► RawInput ──► InputDispatcher ──► Intent::MovePoint ──► LabSession
//!                                 │
//!                                 ▼
//!                     InputConfig (rebindable keys, step sizes,
//!                                  tutorial lock targets)
//! ```
//!
//! While a tutorial is running, movement is only accepted when the
//! highlighted control is one that involves the stage (the DRO panel, the
//! stage controls or the projector screen). Everywhere else the keys are
//! ignored so that a user cannot wander off a step that asks for a click.
//!
//! # Example
//!
//! ```
//! use projector_core::LabSession;
//! use projector_input::{InputDispatcher, KeyCode, KeyModifiers, RawInput};
//!
//! let mut session = LabSession::with_defaults();
//! let mut dispatcher = InputDispatcher::default();
//!
//! dispatcher.dispatch(&RawInput::key_down(KeyCode::ArrowUp), &mut session);
//! assert_eq!(session.reticle().y, -1);
//!
//! let fast = RawInput::key_down_with(KeyCode::ArrowRight, KeyModifiers::SHIFT);
//! dispatcher.dispatch(&fast, &mut session);
//! assert_eq!(session.reticle().x, 8);
//! ```

mod config;
mod dispatcher;
mod error;
mod keyboard;
mod raw;

pub use config::{Direction, InputConfig};
pub use dispatcher::InputDispatcher;
pub use error::InputError;
pub use keyboard::{KeyCode, KeyModifiers, Modifier};
pub use raw::RawInput;

use projector_core::{TARGET_DRO_PANEL, TARGET_PROJECTOR_SCREEN, TARGET_STAGE_CONTROLS};

/// Pixels per key press without the fast modifier.
pub const DEFAULT_FINE_STEP: i32 = 1;

/// Pixels per key press with the fast modifier held.
pub const DEFAULT_FAST_STEP: i32 = 8;

/// Highlight targets that keep keyboard movement enabled during a tutorial.
pub const DEFAULT_MOVEMENT_TARGETS: [&str; 3] = [
    TARGET_DRO_PANEL,
    TARGET_STAGE_CONTROLS,
    TARGET_PROJECTOR_SCREEN,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn constants_are_reasonable() {
        assert!(DEFAULT_FINE_STEP > 0);
        assert!(DEFAULT_FAST_STEP > DEFAULT_FINE_STEP);
        assert!(DEFAULT_MOVEMENT_TARGETS.contains(&"stage-controls-grid"));
    }
}
