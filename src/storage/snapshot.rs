use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CriterionSet, Dataset, LocationSet};

pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub criteria: CriterionSet,
    pub locations: LocationSet,
    /// Set when the snapshot was written by an explicit export
    #[serde(default, rename = "exportDate", skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

impl Snapshot {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            criteria: dataset.criteria().clone(),
            locations: dataset.locations().clone(),
            exported_at: None,
        }
    }

    pub fn exported(dataset: &Dataset) -> Self {
        Self {
            exported_at: Some(Utc::now()),
            ..Self::from_dataset(dataset)
        }
    }

    /// Validate and convert into a dataset.
    pub fn into_dataset(self) -> crate::error::Result<Dataset> {
        Dataset::new(self.criteria, self.locations)
    }
}
