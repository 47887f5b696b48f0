//! Scenario-based tests for policy pipeline merging

mod reserved_stages;
