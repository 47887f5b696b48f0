//! Core domain models
//!
//! This module defines the fundamental data structures that represent
//! pipelines, stages, jobs, and the context they are created in.

pub mod context;
pub mod pipeline;
pub mod policy;
pub mod stages;

pub use context::*;
pub use pipeline::*;
pub use policy::*;
pub use stages::*;
