//! Instrument settings: magnification lens and display unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Fault;

/// Projection lens magnification.
///
/// Serialized as the bare integer level (`10`, `20`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Magnification {
    #[default]
    X10,
    X20,
    X50,
    X100,
}

impl Magnification {
    /// All lenses on the turret, lowest first.
    pub const ALL: [Magnification; 4] = [
        Magnification::X10,
        Magnification::X20,
        Magnification::X50,
        Magnification::X100,
    ];

    /// Integer magnification level.
    pub fn level(self) -> u32 {
        match self {
            Magnification::X10 => 10,
            Magnification::X20 => 20,
            Magnification::X50 => 50,
            Magnification::X100 => 100,
        }
    }

    /// Control id of the lens button (`mag-10x`).
    pub fn target_id(self) -> String {
        format!("mag-{}x", self.level())
    }
}

impl TryFrom<u32> for Magnification {
    type Error = Fault;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Magnification::ALL
            .into_iter()
            .find(|m| m.level() == level)
            .ok_or(Fault::UnsupportedMagnification(level))
    }
}

impl From<Magnification> for u32 {
    fn from(m: Magnification) -> Self {
        m.level()
    }
}

impl fmt::Display for Magnification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.level())
    }
}

/// Display unit label for the DRO.
///
/// Only the label changes; the underlying conversion stays in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "mm")]
    Millimetres,
    #[serde(rename = "µm", alias = "um")]
    Micrometres,
    #[serde(rename = "in")]
    Inches,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Millimetres => "mm",
            Unit::Micrometres => "µm",
            Unit::Inches => "in",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = Fault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mm" => Ok(Unit::Millimetres),
            "µm" | "um" => Ok(Unit::Micrometres),
            "in" => Ok(Unit::Inches),
            other => Err(Fault::UnknownUnit(other.to_string())),
        }
    }
}
