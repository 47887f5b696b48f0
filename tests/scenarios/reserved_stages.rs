//! Test: Reserved Stages - context decisions and reserved stage availability

use crate::helpers::*;
use policy_pipeline::{DeclaredStages, EvaluationMode, Pipeline, PipelineContext, StageJobMerger};

/// Reserved names are not allowed in ordinary project configuration
#[test]
fn test_reserved_names_rejected_in_normal_mode() {
    let context = PipelineContext::new();

    assert!(context.is_stage_name_allowed("build"));
    assert!(!context.is_stage_name_allowed(".pipeline-policy-pre"));
    assert!(!context.is_stage_name_allowed(".pipeline-policy-post"));
}

/// In policy validation mode every stage name is allowed
#[test]
fn test_policy_validation_mode_permits_reserved_names() {
    let context = PipelineContext::for_policy_validation();

    assert_eq!(context.evaluation_mode, EvaluationMode::PolicyValidation);
    assert!(context.is_stage_name_allowed(".pipeline-policy-pre"));
    assert!(context.is_stage_name_allowed(".pipeline-policy-post"));
    assert!(context.is_stage_name_allowed("build"));
}

/// Without policies or validation mode the declared list stays as written
#[test]
fn test_no_injection_without_policies() {
    let context = PipelineContext::new();
    assert!(!context.should_inject_reserved_stages());

    let declared = effective_declared(&context, &["build", "test"]);
    assert_eq!(declared.names(), ["build", "test"]);
}

/// Attached policies force the reserved stages into the declared list
#[test]
fn test_attached_policies_force_injection() {
    let context =
        PipelineContext::new().with_policy_pipelines(vec![policy("p", "test", &["sast"])]);
    assert!(context.should_inject_reserved_stages());

    let declared = effective_declared(&context, &["build", "test"]);
    assert_eq!(
        declared.names(),
        [".pipeline-policy-pre", "build", "test", ".pipeline-policy-post"]
    );
}

/// Validation mode forces injection even with no policies attached
#[test]
fn test_validation_mode_forces_injection() {
    let context = PipelineContext::for_policy_validation();
    assert!(context.should_inject_reserved_stages());

    let declared = effective_declared(&context, &["build"]);
    assert_eq!(
        declared.names(),
        [".pipeline-policy-pre", "build", ".pipeline-policy-post"]
    );
}

/// Policy jobs can land in both reserved stages once they are injected
#[test]
fn test_policy_jobs_land_in_reserved_stages() {
    init_tracing();

    let context = PipelineContext::new().with_policy_pipelines(vec![
        policy("guard policy", ".pipeline-policy-pre", &["license-check"]),
        policy("audit policy", ".pipeline-policy-post", &["audit-log"]),
    ]);

    let declared = effective_declared(&context, &["build"]);
    let mut pipeline = Pipeline::new().with_stage(project_stage(&declared, "build", &["compile"]));

    StageJobMerger::new(&mut pipeline, context.into_policy_pipelines(), &declared)
        .merge()
        .unwrap();

    assert_eq!(
        stage_names_in_order(&pipeline),
        [".pipeline-policy-pre", "build", ".pipeline-policy-post"]
    );
    assert_eq!(job_names(&pipeline, ".pipeline-policy-pre"), ["license-check"]);
    assert_eq!(job_names(&pipeline, ".pipeline-policy-post"), ["audit-log"]);

    assert_positions_match_declared(&pipeline, &declared);
    assert_stage_idx_consistent(&pipeline);
}

/// Without injection a policy targeting a reserved stage is dropped
#[test]
fn test_reserved_stage_dropped_when_not_injected() {
    let declared = DeclaredStages::new(["build"]);
    let mut pipeline = Pipeline::new().with_stage(project_stage(&declared, "build", &["compile"]));

    let policies = vec![policy("audit policy", ".pipeline-policy-post", &["audit-log"])];

    StageJobMerger::new(&mut pipeline, policies, &declared)
        .merge()
        .unwrap();

    assert!(pipeline.stage(".pipeline-policy-post").is_none());
    assert_eq!(pipeline.job_count(), 1);
}
