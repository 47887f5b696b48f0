//! policy-pipeline - policy-driven stage and job merging for CI pipelines
//!
//! Projects declare their stage order; security and compliance policies
//! contribute extra pipelines. At pipeline creation time the policies are
//! merged into the project pipeline: their jobs move into same-named stages,
//! stages the project declared but never used are materialized, and stages
//! the project never declared are dropped.

pub mod core;
pub mod merge;

// Re-export commonly used types
pub use crate::core::{
    DeclaredStages, EvaluationMode, Job, Pipeline, PipelineContext, PolicyPipeline, Stage,
};
pub use crate::merge::{DuplicateJobNameError, StageJobMerger};
