//! Sample reference data.
//!
//! Samples are read-only: the session only ever holds a clone of the one the
//! user picked, and uses its reference values to annotate measurements.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::error::CatalogError;
use crate::{Fault, EXPERIMENT_ID};

/// A sample that can be placed on the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screw_diameter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
}

/// Reference value a sample may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceField {
    Diameter,
    ScrewDiameter,
    Angle,
    Pitch,
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceField::Diameter => "diameter",
            ReferenceField::ScrewDiameter => "screw diameter",
            ReferenceField::Angle => "angle",
            ReferenceField::Pitch => "pitch",
        })
    }
}

impl Sample {
    /// Sample with only an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            diameter: None,
            screw_diameter: None,
            angle: None,
            pitch: None,
        }
    }

    pub fn with_reference(mut self, field: ReferenceField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            ReferenceField::Diameter => self.diameter = value,
            ReferenceField::ScrewDiameter => self.screw_diameter = value,
            ReferenceField::Angle => self.angle = value,
            ReferenceField::Pitch => self.pitch = value,
        }
        self
    }

    /// Control id of this sample's library button (`sample-gear`).
    pub fn target_id(&self) -> String {
        format!("sample-{}", self.id)
    }

    /// Look up a reference value.
    pub fn reference(&self, field: ReferenceField) -> Result<&str, Fault> {
        let value = match field {
            ReferenceField::Diameter => &self.diameter,
            ReferenceField::ScrewDiameter => &self.screw_diameter,
            ReferenceField::Angle => &self.angle,
            ReferenceField::Pitch => &self.pitch,
        };
        value.as_deref().ok_or_else(|| Fault::MissingReferenceField {
            sample: self.id.clone(),
            field,
        })
    }

    /// Reference diameter for `field`, falling back to the generic diameter.
    pub fn reference_diameter(&self, field: ReferenceField) -> Option<&str> {
        self.reference(field)
            .or_else(|_| self.reference(ReferenceField::Diameter))
            .ok()
    }
}

/// Samples grouped by experiment id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleCatalog {
    experiments: BTreeMap<String, Vec<Sample>>,
}

impl SampleCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The samples shipped with the profile projector lab.
    pub fn builtin() -> Self {
        let samples = vec![
            Sample::new("gear", "Gear")
                .with_reference(ReferenceField::Diameter, "44.00 mm")
                .with_reference(ReferenceField::Angle, "20°"),
            Sample::new("screw", "Threaded Screw")
                .with_reference(ReferenceField::ScrewDiameter, "17.00 mm")
                .with_reference(ReferenceField::Pitch, "0.8 mm"),
            Sample::new("v-profile", "V-Profile").with_reference(ReferenceField::Angle, "60.00°"),
        ];

        let mut catalog = Self::new();
        catalog.experiments.insert(EXPERIMENT_ID.to_string(), samples);
        catalog
    }

    /// Parse a catalog of the form `experiments: { <id>: [samples] }`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: SampleCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (experiment, samples) in &self.experiments {
            let mut seen = HashSet::new();
            for sample in samples {
                if !seen.insert(sample.id.as_str()) {
                    return Err(CatalogError::DuplicateSample {
                        experiment: experiment.clone(),
                        id: sample.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Samples offered for an experiment (empty if unknown).
    pub fn samples_for(&self, experiment_id: &str) -> &[Sample] {
        self.experiments
            .get(experiment_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find a sample by id within an experiment.
    pub fn find(&self, experiment_id: &str, sample_id: &str) -> Option<&Sample> {
        self.samples_for(experiment_id)
            .iter()
            .find(|s| s.id == sample_id)
    }
}
