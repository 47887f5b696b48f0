//! Policy pipeline merging

pub mod merger;

pub use merger::{DuplicateJobNameError, StageJobMerger};
