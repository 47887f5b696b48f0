//! Declared stage order and reserved policy stages

use serde::{Deserialize, Serialize};

/// Stage prepended for policy jobs that must run before everything else
pub const POLICY_PRE_STAGE: &str = ".pipeline-policy-pre";

/// Stage appended for policy jobs that must run after everything else
pub const POLICY_POST_STAGE: &str = ".pipeline-policy-post";

/// Stage names reserved for policy use
pub const RESERVED_STAGES: [&str; 2] = [POLICY_PRE_STAGE, POLICY_POST_STAGE];

/// Whether a stage name is reserved for policy use
pub fn is_reserved_stage(name: &str) -> bool {
    RESERVED_STAGES.contains(&name)
}

/// The project's declared stage order
///
/// A stage's position in the pipeline is its index in this list. The merger
/// consults it both to order the stages it creates and to decide whether a
/// policy stage may materialize at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclaredStages(Vec<String>);

impl DeclaredStages {
    /// Create a declared stage list from stage names in order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Index of the first declaration of `name`, if declared
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|declared| declared == name)
    }

    /// Whether `name` is declared
    pub fn contains(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Number of declared stages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no stages are declared
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Declared names in order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Copy of this list with the reserved policy stages injected
    ///
    /// `.pipeline-policy-pre` is prepended and `.pipeline-policy-post` is
    /// appended, each only when not already present, so re-applying this to
    /// an already-injected list leaves it unchanged.
    pub fn with_reserved_stages(mut self) -> Self {
        if !self.contains(POLICY_PRE_STAGE) {
            self.0.insert(0, POLICY_PRE_STAGE.to_string());
        }
        if !self.contains(POLICY_POST_STAGE) {
            self.0.push(POLICY_POST_STAGE.to_string());
        }
        self
    }
}

impl From<Vec<String>> for DeclaredStages {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl<S: Into<String>> FromIterator<S> for DeclaredStages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
