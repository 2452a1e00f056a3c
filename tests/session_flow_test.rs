use serde_json::{json, Value};
use unified_reasoning::*;

fn thought(number: i32, total: i32, stage: &str) -> ThoughtParams {
    ThoughtParams {
        thought: format!("Thought number {}", number),
        thought_number: number,
        total_thoughts: total,
        next_thought_needed: number < total,
        stage: stage.to_string(),
        is_revision: None,
        revises_thought: None,
        branch_from_thought: None,
        branch_id: None,
        needs_more_thoughts: None,
        score: None,
        tags: None,
    }
}

fn envelope<T: serde::Serialize>(result: ReasoningResult<T>) -> Value {
    serde_json::to_value(Envelope::from(result)).expect("envelope serializes")
}

#[test]
fn test_importance_threshold_scenario() {
    let mut session = ThinkingSession::default();

    let mut first = thought(1, 3, "Problem Definition");
    first.score = Some(0.8);
    first.tags = Some(vec!["a".to_string()]);
    session.capture(first).unwrap();

    let mut second = thought(2, 3, "Analysis");
    second.branch_from_thought = Some(1);
    second.branch_id = Some("b1".to_string());
    second.score = Some(0.6);
    second.tags = Some(vec!["a".to_string()]);
    session.capture(second).unwrap();

    // #2 scored below 0.7 and never reached long-term memory
    let related = session.retrieve_relevant(1).unwrap();
    assert_eq!(related.related_count, 0);
    assert!(related.related_thoughts.is_empty());
    assert_eq!(session.branch_thoughts("b1"), Some(&[2][..]));
}

#[test]
fn test_stage_spellings_resolve_alike() {
    let mut session = ThinkingSession::default();
    for (number, stage) in ["PROBLEM_DEFINITION", "problem definition", "Problem Definition"]
        .into_iter()
        .enumerate()
    {
        let captured = session.capture(thought(number as i32 + 1, 3, stage)).unwrap();
        assert_eq!(captured.stage, Stage::ProblemDefinition);
    }
}

#[test]
fn test_invalid_stage_envelope() {
    let mut session = ThinkingSession::default();
    let value = envelope(session.capture(thought(1, 1, "not-a-stage")));

    assert_eq!(value["status"], "failed");
    assert_eq!(value["error_kind"], "InvalidStage");
    let message = value["error"].as_str().unwrap();
    for stage in Stage::ALL {
        assert!(message.contains(stage.label()));
    }
}

#[test]
fn test_validation_envelopes() {
    let mut session = ThinkingSession::default();

    let mut revision = thought(2, 3, "Refinement");
    revision.revises_thought = Some(2);
    let value = envelope(session.capture(revision));
    assert_eq!(value["error_kind"], "ValidationError");
    assert!(value["error"].as_str().unwrap().contains("revise"));

    let value = envelope(session.capture(thought(4, 3, "Plan")));
    assert_eq!(value["error_kind"], "ValidationError");

    let mut edge = thought(1, 1, "Plan");
    edge.score = Some(1.0);
    assert_eq!(envelope(session.capture(edge))["status"], "success");

    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_quality_review_of_ideation() {
    let mut session = ThinkingSession::default();
    let mut idea = thought(1, 2, "Ideation");
    idea.score = Some(0.8);
    session.capture(idea).unwrap();

    let value = envelope(session.evaluate_quality(1));
    assert_eq!(value["status"], "success");
    assert_eq!(value["thought_number"], 1);
    let creativity = value["metrics"]["creativity"].as_f64().unwrap();
    assert!((creativity - 0.672).abs() < 1e-9);
    assert!((value["metrics"]["coherence"].as_f64().unwrap() - 0.8).abs() < 1e-9);
    assert!(value["suggestions"].as_array().unwrap().len() >= 1);
}

#[test]
fn test_reasoning_tags_per_stage() {
    let mut session = ThinkingSession::default();
    session.capture(thought(1, 3, "Ideation")).unwrap();
    session.capture(thought(2, 3, "Analysis")).unwrap();
    session.capture(thought(3, 3, "Evaluation")).unwrap();

    let apply = |session: &mut ThinkingSession, id| {
        session
            .apply_reasoning(ApplyReasoningParams {
                thought_id: id,
                reasoning_type: None,
            })
            .unwrap()
            .tags
    };
    assert_eq!(apply(&mut session, 1), vec!["creative"]);
    assert_eq!(apply(&mut session, 2), vec!["deductive"]);
    assert_eq!(apply(&mut session, 3), vec!["deductive"]);
}

#[test]
fn test_branch_not_found_envelope() {
    let mut session = ThinkingSession::default();
    let value = envelope(session.branch(BranchParams {
        parent_thought_id: 9,
        branch_id: "x".to_string(),
    }));
    assert_eq!(value["status"], "failed");
    assert_eq!(value["error_kind"], "NotFound");
    assert_eq!(value["error"], "Parent thought with ID 9 not found");
}

#[test]
fn test_summary_shapes() {
    let mut session = ThinkingSession::default();
    assert_eq!(
        envelope::<SummaryResponse>(Ok(session.summary())),
        json!({"status": "success", "summary": "No thoughts recorded yet"})
    );

    let mut only = thought(1, 1, "Conclusion");
    only.score = Some(0.5);
    session.capture(only).unwrap();

    let value = envelope::<SummaryResponse>(Ok(session.summary()));
    assert_eq!(value["summary"]["total_thoughts"], 1);
    assert_eq!(value["summary"]["stages"]["Conclusion"]["average_score"], 0.5);
    assert_eq!(value["summary"]["stages"]["Conclusion"]["count"], 1);
    assert_eq!(value["summary"]["timeline"][0]["stage"], "Conclusion");
    assert_eq!(value["summary"]["memory"]["short_term_count"], 1);
}

#[test]
fn test_think_envelope_is_unified() {
    let mut session = ThinkingSession::default();
    let mut params = thought(1, 2, "Evaluation");
    params.score = Some(0.9);
    params.tags = Some(vec!["risk".to_string()]);

    let value = envelope(session.think(params));
    assert_eq!(value["status"], "success");
    assert_eq!(value["current_thought"]["tags"], json!(["risk", "deductive"]));
    assert_eq!(value["analysis"]["reasoning_pattern"], "deductive");
    assert_eq!(value["analysis"]["related_thoughts_count"], 0);
    assert_eq!(value["context"]["thought_history_length"], 1);
    assert_eq!(value["context"]["current_stage"], "Evaluation");
}

#[test]
fn test_independent_sessions() {
    let mut left = ThinkingSession::default();
    let right = ThinkingSession::default();
    left.capture(thought(1, 1, "Plan")).unwrap();

    assert_eq!(left.history().len(), 1);
    assert!(right.history().is_empty());
    assert_ne!(left.id(), right.id());
}
