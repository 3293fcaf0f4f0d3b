//! Tutorial catalog: the closed set of scripts a session can run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::CatalogError;
use crate::geometry::Axis;
use crate::sample::ReferenceField;
use crate::tutorial::{AdvanceRule, MeasurementKind, Step, TutorialScript};
use crate::{
    ANGLE_MEASURE, GEAR_OD, SCREW_OD, TARGET_ADD_POINT, TARGET_ANGLE_MODE_TOGGLE,
    TARGET_DRO_PANEL, TARGET_PROJECTOR_SCREEN, TARGET_STAGE_CONTROLS,
};

/// Gear silhouette edges on the y axis (pixels).
const GEAR_TOP_Y: i32 = -86;
const GEAR_BOTTOM_Y: i32 = 84;

/// Screw silhouette edges on the y axis (pixels).
const SCREW_TOP_Y: i32 = -34;
const SCREW_BOTTOM_Y: i32 = 46;

/// Thread flank capture points (pixels). In DRO millimetres these read
/// (13, -5.5), (7, 5.5), (-7, 5.5), (-13, -5.5).
const FLANK_POINTS: [(i32, i32); 4] = [(52, 22), (28, -22), (-28, -22), (-52, 22)];

/// File layout for YAML catalogs.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    tutorials: Vec<TutorialScript>,
}

/// Named tutorial scripts, listed in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TutorialCatalog {
    scripts: BTreeMap<String, TutorialScript>,
}

impl TutorialCatalog {
    /// Build a catalog, validating every script.
    pub fn new(scripts: Vec<TutorialScript>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for script in scripts {
            validate_script(&script)?;
            let name = script.name.clone();
            if map.insert(name.clone(), script).is_some() {
                return Err(CatalogError::DuplicateScript(name));
            }
        }
        Ok(Self { scripts: map })
    }

    /// The three scripts shipped with the lab.
    pub fn builtin() -> Self {
        let scripts = [gear_od(), screw_od(), angle_measure()]
            .into_iter()
            .map(|s| (s.name.clone(), s))
            .collect();
        Self { scripts }
    }

    /// Parse a catalog of the form `tutorials: [scripts]`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.tutorials)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn get(&self, name: &str) -> Option<&TutorialScript> {
        self.scripts.get(name)
    }

    /// Script names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }

    /// Scripts in stable order, for the tutorial selector.
    pub fn iter(&self) -> impl Iterator<Item = &TutorialScript> {
        self.scripts.values()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

fn validate_script(script: &TutorialScript) -> Result<(), CatalogError> {
    if script.steps.is_empty() {
        return Err(CatalogError::EmptyScript(script.name.clone()));
    }

    let mut ids = HashSet::new();
    for step in &script.steps {
        if step.id == 0 {
            return Err(CatalogError::ReservedStepId {
                script: script.name.clone(),
            });
        }
        if !ids.insert(step.id) {
            return Err(CatalogError::DuplicateStepId {
                script: script.name.clone(),
                id: step.id,
            });
        }
    }

    for step in &script.steps {
        if let AdvanceRule::AngleComputed { jump_to } = step.advance {
            if !ids.contains(&jump_to) {
                return Err(CatalogError::UnknownJumpTarget {
                    script: script.name.clone(),
                    step: step.id,
                    target: jump_to,
                });
            }
        }
    }
    Ok(())
}

fn gear_od() -> TutorialScript {
    TutorialScript {
        name: GEAR_OD.to_string(),
        title: "Gear Outer Diameter".to_string(),
        start_message: "Gear outer diameter: follow the highlighted controls.".to_string(),
        measurement: MeasurementKind::Diameter {
            reference: ReferenceField::Diameter,
        },
        required_sample: Some("gear".to_string()),
        steps: vec![
            Step::action(1, "sample-gear", "Select the Gear sample from the sample library."),
            Step::action(2, "mag-10x", "Set the magnification to 10x."),
            Step::action(
                3,
                TARGET_STAGE_CONTROLS,
                "Move the reticle up to the top edge of the gear (hold Shift to move faster).",
            )
            .on(AdvanceRule::AxisCrossing {
                axis: Axis::Y,
                target: GEAR_TOP_Y,
            }),
            Step::action(4, "zero-y-button", "Press Zero Y to take the top edge as reference."),
            Step::action(
                5,
                TARGET_STAGE_CONTROLS,
                "Move the reticle down to the bottom edge of the gear.",
            )
            .on(AdvanceRule::AxisCrossing {
                axis: Axis::Y,
                target: GEAR_BOTTOM_Y,
            }),
            Step::action(
                6,
                TARGET_DRO_PANEL,
                "The Y reading is the gear's outer diameter. Compare it with the reference value.",
            )
            .on(AdvanceRule::Terminal),
        ],
    }
}

fn screw_od() -> TutorialScript {
    TutorialScript {
        name: SCREW_OD.to_string(),
        title: "Screw Outer Diameter".to_string(),
        start_message: "Screw outer diameter: follow the highlighted controls.".to_string(),
        measurement: MeasurementKind::Diameter {
            reference: ReferenceField::ScrewDiameter,
        },
        required_sample: Some("screw".to_string()),
        steps: vec![
            Step::action(
                9,
                "sample-screw",
                "Select the Threaded Screw sample from the sample library.",
            ),
            Step::action(10, "mag-20x", "Set the magnification to 20x."),
            Step::action(
                11,
                TARGET_STAGE_CONTROLS,
                "Move the reticle up to the crest of the top thread.",
            )
            .on(AdvanceRule::AxisCrossing {
                axis: Axis::Y,
                target: SCREW_TOP_Y,
            }),
            Step::action(12, "zero-y-button", "Press Zero Y to take the top crest as reference."),
            Step::action(
                13,
                TARGET_STAGE_CONTROLS,
                "Move the reticle down to the crest of the bottom thread.",
            )
            .on(AdvanceRule::AxisCrossing {
                axis: Axis::Y,
                target: SCREW_BOTTOM_Y,
            }),
            Step::action(
                14,
                TARGET_DRO_PANEL,
                "The Y reading is the screw's outer diameter. Compare it with the reference value.",
            )
            .on(AdvanceRule::Terminal),
        ],
    }
}

fn angle_measure() -> TutorialScript {
    const ORDINALS: [&str; 4] = ["first", "second", "third", "fourth"];

    let mut steps = vec![
        Step::action(
            20,
            "sample-v-profile",
            "Select the V-Profile sample from the sample library.",
        ),
        Step::action(21, "mag-10x", "Set the magnification to 10x."),
        Step::action(22, TARGET_ANGLE_MODE_TOGGLE, "Switch on angle mode."),
    ];

    // Align / add pairs: 23+24, 25+26, 27+28, 29+30.
    for (i, (x, y)) in FLANK_POINTS.into_iter().enumerate() {
        let align_id = 23 + 2 * i as u32;
        let flank = if i < 2 { "left" } else { "right" };
        steps.push(
            Step::action(
                align_id,
                TARGET_PROJECTOR_SCREEN,
                &format!(
                    "Move the reticle onto the {} point of the {flank} flank.",
                    ORDINALS[i]
                ),
            )
            .on(AdvanceRule::PointAlignment { x, y }),
        );
        steps.push(Step::action(
            align_id + 1,
            TARGET_ADD_POINT,
            &format!("Press Add Point to capture point {}.", i + 1),
        ));
    }

    // The fourth point only completes once the angle has been computed.
    if let Some(last_add) = steps.last_mut() {
        last_add.advance = AdvanceRule::AngleComputed { jump_to: 31 };
    }

    steps.push(
        Step::action(
            31,
            TARGET_DRO_PANEL,
            "Measurement complete. Compare the included angle with the reference value.",
        )
        .on(AdvanceRule::Terminal),
    );

    TutorialScript {
        name: ANGLE_MEASURE.to_string(),
        title: "Thread Angle Measurement".to_string(),
        start_message: "Thread angle: capture two points on each flank.".to_string(),
        measurement: MeasurementKind::Angle,
        required_sample: Some("v-profile".to_string()),
        steps,
    }
}
