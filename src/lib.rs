//! Profile projector virtual lab.
//!
//! The measurement engine and tutorial state machine live in
//! [`projector_core`]; keyboard handling lives in [`projector_input`]. This
//! crate ties them together for headless use:
//!
//! - [`LabAssets`] loads config, catalogs and key bindings (YAML or built-in)
//! - [`SessionScript`] describes a sequence of user events with expectations
//! - [`SessionRunner`] plays a script against a fresh session
//! - [`report`] renders the outcome as text or JSON

mod assets;
pub mod report;
mod script;

pub use assets::{AssetPaths, LabAssets, LoadError};
pub use script::{
    EventFault, Expectation, ExpectationFailure, RunSummary, ScriptError, SessionEvent,
    SessionRunner, SessionScript,
};

pub use projector_core;
pub use projector_input;
