//! Policy pipeline configuration from YAML

use crate::core::Stage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A pipeline defined by a security or compliance policy
///
/// Policy pipelines are parsed from policy YAML ahead of time and handed to
/// the merger whole. They exist only as merge input: the merger takes them by
/// value, and their jobs end up owned by the project pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyPipeline {
    /// Name of the policy this pipeline came from
    pub name: String,

    /// Stages in the order the policy defines them
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl PolicyPipeline {
    /// Create an empty policy pipeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Builder-style stage append
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Load a policy pipeline from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a policy pipeline from a YAML string
    ///
    /// Stage positions and job flags in the YAML are ignored; the merger
    /// recomputes both when the policy is merged into a project pipeline.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let pipeline: PolicyPipeline = serde_yaml::from_str(yaml)?;
        Ok(pipeline)
    }

    /// Total number of jobs across all stages
    pub fn job_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.jobs.len()).sum()
    }
}
