//! Guided tutorial scripts and the state machine that walks them.
//!
//! A script is an ordered list of steps with stable, non-contiguous ids.
//! Each step names the control the user must act on and carries an explicit
//! [`AdvanceRule`] describing what completes it:
//!
//! | Rule              | Completes when                                         |
//! |-------------------|--------------------------------------------------------|
//! | `Action`          | the user triggers the control named by `target_id`     |
//! | `AxisCrossing`    | a move on `axis` straddles `target` (snap + advance)   |
//! | `PointAlignment`  | both axes have been brought onto `(x, y)`              |
//! | `AngleComputed`   | the angle calculator produced a value (direct jump)    |
//! | `Terminal`        | never; the script is finished                          |

pub mod alignment;
mod catalog;
mod script;
mod state;

pub use catalog::TutorialCatalog;
pub use script::{AdvanceRule, MeasurementKind, Step, StepId, TutorialScript};
pub use state::TutorialState;
