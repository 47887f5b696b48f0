//! Merges policy pipeline stages and jobs into a project pipeline

use crate::core::{DeclaredStages, Pipeline, PolicyPipeline, Stage};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Job names clashed after merging policy jobs into the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate job names in merged pipeline: {}", .names.join(", "))]
pub struct DuplicateJobNameError {
    /// Each clashing name once, in the order first seen
    pub names: Vec<String>,
}

/// Merges the stages and jobs of policy pipelines into a project pipeline
///
/// The merger owns the policy pipelines outright: their jobs are moved into
/// the project pipeline, never copied, so a merged policy pipeline cannot be
/// merged again. Each pipeline creation attempt builds a fresh merger, calls
/// [`merge`](Self::merge) once, and drops it.
pub struct StageJobMerger<'a> {
    pipeline: &'a mut Pipeline,
    declared_stages: &'a DeclaredStages,
    policy_pipelines: Vec<PolicyPipeline>,
}

impl<'a> StageJobMerger<'a> {
    pub fn new(
        pipeline: &'a mut Pipeline,
        policy_pipelines: Vec<PolicyPipeline>,
        declared_stages: &'a DeclaredStages,
    ) -> Self {
        Self {
            pipeline,
            declared_stages,
            policy_pipelines,
        }
    }

    /// Merge every policy pipeline into the project pipeline
    ///
    /// Policy stages merge into same-named pipeline stages. A stage the
    /// project declared but never used is created at its declared position;
    /// a stage the project never declared is dropped together with its jobs.
    /// Once every policy is merged, job names are checked for uniqueness
    /// across the whole pipeline.
    ///
    /// On error the pipeline must be discarded: jobs injected before the
    /// check failed are still in it.
    pub fn merge(self) -> Result<(), DuplicateJobNameError> {
        let Self {
            pipeline,
            declared_stages,
            policy_pipelines,
        } = self;

        // Declared positions do not change during a merge; index them once.
        // A name declared twice keeps its first index.
        let mut declared_positions: HashMap<&str, usize> = HashMap::new();
        for (position, name) in declared_stages.names().iter().enumerate() {
            declared_positions.entry(name.as_str()).or_insert(position);
        }

        for policy in policy_pipelines {
            let PolicyPipeline { name, stages } = policy;
            debug!("Merging policy pipeline: {} ({} stages)", name, stages.len());

            for mut policy_stage in stages {
                let jobs = std::mem::take(&mut policy_stage.jobs);

                let Some(stage) = Self::find_or_create_stage(
                    &mut pipeline.stages,
                    policy_stage,
                    &declared_positions,
                ) else {
                    continue;
                };

                for mut job in jobs {
                    job.execution_policy_job = true;
                    trace!("Injecting policy job: {} into stage: {}", job.name, stage.name);
                    stage.adopt(job);
                }
            }
        }

        Self::check_job_name_uniqueness(pipeline)
    }

    /// Find the pipeline stage matching a policy stage, creating it if the
    /// project declared the name
    ///
    /// Returns `None` for stage names the project never declared; the policy
    /// stage and its position in the policy are forgotten.
    fn find_or_create_stage<'p>(
        stages: &'p mut IndexMap<String, Stage>,
        policy_stage: Stage,
        declared_positions: &HashMap<&str, usize>,
    ) -> Option<&'p mut Stage> {
        match stages.entry(policy_stage.name.clone()) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => {
                let Some(&position) = declared_positions.get(entry.key().as_str()) else {
                    debug!(
                        "Dropping policy stage not declared by the project: {}",
                        entry.key()
                    );
                    return None;
                };

                debug!(
                    "Materializing declared stage for policy jobs: {} (position {})",
                    entry.key(),
                    position
                );
                Some(entry.insert(Stage {
                    position,
                    jobs: Vec::new(),
                    ..policy_stage
                }))
            }
        }
    }

    /// Check that no two jobs in the pipeline share a name
    fn check_job_name_uniqueness(pipeline: &Pipeline) -> Result<(), DuplicateJobNameError> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for job in pipeline.jobs() {
            *counts.entry(job.name.as_str()).or_insert(0) += 1;
        }

        let names: Vec<String> = counts
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(name, _)| name.to_string())
            .collect();

        if names.is_empty() {
            Ok(())
        } else {
            Err(DuplicateJobNameError { names })
        }
    }
}
