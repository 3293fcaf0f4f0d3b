//! Key bindings and movement settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use projector_core::Axis;

use crate::keyboard::{KeyCode, KeyModifiers, Modifier};
use crate::{InputError, DEFAULT_FAST_STEP, DEFAULT_FINE_STEP, DEFAULT_MOVEMENT_TARGETS};

/// Stage movement direction in screen terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Left | Direction::Right => Axis::X,
        }
    }

    /// Sign of the pixel delta. Screen y grows downwards, so up is negative.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }
}

/// Keyboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key → movement direction.
    pub bindings: BTreeMap<KeyCode, Direction>,

    /// Pixels per press.
    pub fine_step: i32,

    /// Pixels per press while `fast_modifier` is held.
    pub fast_step: i32,

    pub fast_modifier: Modifier,

    /// Highlight targets under which movement stays enabled during a tutorial.
    pub movement_targets: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        let mut config = Self {
            bindings: BTreeMap::new(),
            fine_step: DEFAULT_FINE_STEP,
            fast_step: DEFAULT_FAST_STEP,
            fast_modifier: Modifier::Shift,
            movement_targets: DEFAULT_MOVEMENT_TARGETS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        };

        config.bind(KeyCode::ArrowUp, Direction::Up);
        config.bind(KeyCode::ArrowDown, Direction::Down);
        config.bind(KeyCode::ArrowLeft, Direction::Left);
        config.bind(KeyCode::ArrowRight, Direction::Right);

        config
    }
}

impl InputConfig {
    /// Bind `key` to `direction`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyCode, direction: Direction) {
        self.bindings.insert(key, direction);
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<Direction> {
        self.bindings.remove(&key)
    }

    /// Add WASD alongside the arrow keys.
    pub fn with_wasd(mut self) -> Self {
        self.bind(KeyCode::KeyW, Direction::Up);
        self.bind(KeyCode::KeyA, Direction::Left);
        self.bind(KeyCode::KeyS, Direction::Down);
        self.bind(KeyCode::KeyD, Direction::Right);
        self
    }

    pub fn direction_for(&self, key: KeyCode) -> Option<Direction> {
        self.bindings.get(&key).copied()
    }

    /// Step size for a press with `modifiers` held.
    pub fn step_for(&self, modifiers: KeyModifiers) -> i32 {
        if modifiers.has(self.fast_modifier) {
            self.fast_step
        } else {
            self.fine_step
        }
    }

    /// Check if movement is enabled while `target` is highlighted.
    pub fn permits_target(&self, target: &str) -> bool {
        self.movement_targets.iter().any(|t| t == target)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, InputError> {
        let config: InputConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.fine_step <= 0 {
            return Err(InputError::InvalidStep {
                name: "fine_step",
                value: self.fine_step,
            });
        }
        if self.fast_step <= 0 {
            return Err(InputError::InvalidStep {
                name: "fast_step",
                value: self.fast_step,
            });
        }
        if self.fast_step < self.fine_step {
            return Err(InputError::FastSlowerThanFine {
                fine: self.fine_step,
                fast: self.fast_step,
            });
        }
        Ok(())
    }
}
