//! Pipeline creation context - evaluation mode and attached policies

use crate::core::policy::PolicyPipeline;
use crate::core::stages::is_reserved_stage;
use serde::{Deserialize, Serialize};

/// How the pipeline being created will be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// A regular pipeline that will run
    #[default]
    Run,

    /// A dry-run pipeline built to validate a policy before it is saved
    PolicyValidation,
}

/// Creation context for a pipeline
///
/// Carries the evaluation mode and the policy pipelines attached to the
/// project. Every decision the creation flow needs (inject reserved stages,
/// allow a stage name) is derived from these two fields, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineContext {
    /// Why this pipeline is being created
    pub evaluation_mode: EvaluationMode,

    /// Policy pipelines that apply to the project
    #[serde(default)]
    pub policy_pipelines: Vec<PolicyPipeline>,
}

impl PipelineContext {
    /// Create a context for a regular pipeline run
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for validating a policy before it is saved
    pub fn for_policy_validation() -> Self {
        Self {
            evaluation_mode: EvaluationMode::PolicyValidation,
            policy_pipelines: Vec::new(),
        }
    }

    /// Builder-style policy attachment
    pub fn with_policy_pipelines(mut self, pipelines: Vec<PolicyPipeline>) -> Self {
        self.policy_pipelines = pipelines;
        self
    }

    /// Attach one more policy pipeline
    pub fn attach_policy_pipeline(&mut self, pipeline: PolicyPipeline) {
        self.policy_pipelines.push(pipeline);
    }

    /// Hand the attached policies to the merger, consuming the context
    pub fn into_policy_pipelines(self) -> Vec<PolicyPipeline> {
        self.policy_pipelines
    }

    /// Whether this pipeline exists to validate a policy
    pub fn is_policy_evaluation_mode(&self) -> bool {
        self.evaluation_mode == EvaluationMode::PolicyValidation
    }

    /// Whether any policy pipelines are attached
    pub fn has_attached_policies(&self) -> bool {
        !self.policy_pipelines.is_empty()
    }

    /// Whether the reserved policy stages belong in the declared stage list
    pub fn should_inject_reserved_stages(&self) -> bool {
        self.is_policy_evaluation_mode() || self.has_attached_policies()
    }

    /// Whether the project may declare a stage with this name
    ///
    /// Regular runs reject the reserved policy stage names; a policy
    /// validation pipeline may use any name.
    pub fn is_stage_name_allowed(&self, name: &str) -> bool {
        self.is_policy_evaluation_mode() || !is_reserved_stage(name)
    }
}
