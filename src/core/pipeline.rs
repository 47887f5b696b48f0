//! Pipeline domain model

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project pipeline under construction
///
/// Created by the pipeline-creation orchestrator from the project's own CI
/// configuration, mutated in place by the merger, and persisted afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Unique pipeline ID, assigned at creation
    pub id: Uuid,

    /// When the pipeline was created
    pub created_at: DateTime<Utc>,

    /// Stages keyed by name
    ///
    /// Map order carries no meaning; a stage's true order is its `position`.
    pub stages: IndexMap<String, Stage>,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            stages: IndexMap::new(),
        }
    }

    /// Add a stage, keyed by its name (replaces any same-named stage)
    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.insert(stage.name.clone(), stage);
    }

    /// Builder-style variant of [`add_stage`](Self::add_stage)
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.add_stage(stage);
        self
    }

    /// Get a stage by name
    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.get(name)
    }

    /// Get a mutable stage by name
    pub fn stage_mut(&mut self, name: &str) -> Option<&mut Stage> {
        self.stages.get_mut(name)
    }

    /// All stages sorted by position
    pub fn stages_in_order(&self) -> Vec<&Stage> {
        let mut stages: Vec<&Stage> = self.stages.values().collect();
        stages.sort_by_key(|stage| stage.position);
        stages
    }

    /// Iterate over every job across every stage
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.stages.values().flat_map(|stage| stage.jobs.iter())
    }

    /// Total number of jobs across all stages
    pub fn job_count(&self) -> usize {
        self.jobs().count()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// A single stage of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name, unique within its pipeline
    pub name: String,

    /// Index of this stage in the project's declared stage order
    #[serde(default)]
    pub position: usize,

    /// Jobs in display order
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Stage {
    /// Create an empty stage at the given position
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
            jobs: Vec::new(),
        }
    }

    /// Builder-style variant of [`adopt`](Self::adopt)
    pub fn with_job(mut self, job: Job) -> Self {
        self.adopt(job);
        self
    }

    /// Take ownership of a job, rebinding it to this stage
    ///
    /// The job's `stage_idx` is rewritten to this stage's position and the
    /// job is appended to the stage's job list. Taking the job by value is
    /// what makes this a move: the job cannot remain in another stage's list.
    pub fn adopt(&mut self, mut job: Job) {
        job.stage_idx = self.position;
        self.jobs.push(job);
    }
}

/// A single CI job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job name, unique across the entire pipeline
    pub name: String,

    /// Position of the owning stage, kept in sync when the job moves
    #[serde(default)]
    pub stage_idx: usize,

    /// True when the job was injected from a policy pipeline
    #[serde(default)]
    pub execution_policy_job: bool,
}

impl Job {
    /// Create a job; `stage_idx` is rebound when a stage adopts it
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stage_idx: 0,
            execution_policy_job: false,
        }
    }
}
