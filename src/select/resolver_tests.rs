use super::*;
use crate::select::test_support::{many, one, Answer, ScriptedPrompter};

fn names(items: &[&str]) -> CandidateSet<String> {
    items.iter().map(|name| Candidate::named(*name)).collect()
}

fn request() -> SelectRequest {
    SelectRequest::new(ResourceKind::Service, "application demo", "Which service?")
}

#[test]
fn empty_candidates_fail_with_not_found() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let err = selector
        .select_one(&request(), names(&[]))
        .expect_err("empty set");
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "no services found in application demo");
    assert_eq!(prompt.call_count(), 0);
}

#[test]
fn single_candidate_is_returned_without_prompting() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let chosen = selector
        .select_one(&request(), names(&["api"]))
        .expect("single candidate");
    assert_eq!(chosen.value, "api");
    assert_eq!(prompt.call_count(), 0);
}

#[test]
fn single_candidate_with_extra_option_still_prompts() {
    let prompt = ScriptedPrompter::new(vec![one("Use an existing image instead")]);
    let selector = Selector::new(&prompt);
    let req = request().extra_option("Use an existing image instead");
    let choice = selector.choose(&req, names(&["api"])).expect("choice");
    assert_eq!(choice, Choice::Extra("Use an existing image instead".to_string()));
    assert_eq!(
        prompt.calls()[0].options,
        vec!["api", "Use an existing image instead"]
    );
}

#[test]
fn extras_alone_are_offered_when_no_candidates_exist() {
    let prompt = ScriptedPrompter::new(vec![one("Create a new application")]);
    let selector = Selector::new(&prompt);
    let req = request().extra_option("Create a new application");
    let choice = selector.choose(&req, names(&[])).expect("choice");
    assert_eq!(choice, Choice::Extra("Create a new application".to_string()));
}

#[test]
fn chosen_label_maps_back_to_candidate_value() {
    let prompt = ScriptedPrompter::new(vec![one("api (prod)")]);
    let selector = Selector::new(&prompt);
    let set = CandidateSet::new(vec![
        Candidate::qualified("api", "test", 1),
        Candidate::qualified("api", "prod", 2),
    ]);
    let chosen = selector.select_one(&request(), set).expect("chosen");
    assert_eq!(chosen.value, 2);
    assert_eq!(prompt.calls()[0].options, vec!["api (test)", "api (prod)"]);
}

#[test]
fn prompt_failure_is_wrapped_with_action() {
    let prompt = ScriptedPrompter::new(vec![Answer::Fail("interrupted".to_string())]);
    let selector = Selector::new(&prompt);
    let err = selector
        .select_one(&request(), names(&["api", "web"]))
        .expect_err("prompt error");
    assert!(matches!(err, SelectError::Prompt { .. }));
    assert_eq!(err.to_string(), "select service: interrupted");
}

#[test]
fn unexpected_answer_is_rejected() {
    let prompt = ScriptedPrompter::new(vec![one("db")]);
    let selector = Selector::new(&prompt);
    let err = selector
        .select_one(&request(), names(&["api", "web"]))
        .expect_err("unknown answer");
    assert!(matches!(err, SelectError::UnknownChoice { .. }));
}

fn cascade() -> CascadeRequest<'static> {
    let mut req = CascadeRequest::new(ResourceKind::Environment, "application demo", |round| {
        format!("Which environment should be {}?", ordinal(round))
    });
    req.stop_label = "[No additional environments]".to_string();
    req
}

#[test]
fn cascading_selection_preserves_selection_order_and_shrinks_pool() {
    let prompt = ScriptedPrompter::new(vec![
        one("env2"),
        one("env1"),
        one("[No additional environments]"),
    ]);
    let selector = Selector::new(&prompt);
    let picked = selector
        .select_cascading(&cascade(), names(&["env1", "env2", "env3"]))
        .expect("cascade");
    let picked: Vec<String> = picked.into_iter().map(|c| c.value).collect();
    assert_eq!(picked, vec!["env2", "env1"]);

    let calls = prompt.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[0].options,
        vec!["env1", "env2", "env3", "[No additional environments]"]
    );
    assert_eq!(calls[1].options, vec!["env1", "env3", "[No additional environments]"]);
    assert_eq!(calls[2].options, vec!["env3", "[No additional environments]"]);
    assert_eq!(calls[0].message, "Which environment should be first?");
    assert_eq!(calls[2].message, "Which environment should be third?");
}

#[test]
fn cascading_selection_ends_without_stop_prompt_once_pool_is_exhausted() {
    let prompt = ScriptedPrompter::new(vec![one("env2"), one("env1")]);
    let selector = Selector::new(&prompt);
    let picked = selector
        .select_cascading(&cascade(), names(&["env1", "env2"]))
        .expect("cascade");
    assert_eq!(picked.len(), 2);
    assert_eq!(prompt.call_count(), 2);
}

#[test]
fn cascading_selection_without_confirm_takes_last_candidate() {
    let prompt = ScriptedPrompter::new(vec![one("env1")]);
    let selector = Selector::new(&prompt);
    let mut req = cascade();
    req.confirm_last = false;
    let picked = selector
        .select_cascading(&req, names(&["env1", "env2"]))
        .expect("cascade");
    let picked: Vec<String> = picked.into_iter().map(|c| c.value).collect();
    assert_eq!(picked, vec!["env1", "env2"]);
    assert_eq!(prompt.call_count(), 1);
}

#[test]
fn cascading_selection_of_empty_pool_is_not_found() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let err = selector
        .select_cascading(&cascade(), names(&[]))
        .expect_err("empty");
    assert!(err.is_not_found());
}

#[test]
fn cascading_failure_returns_no_partial_selection() {
    let prompt = ScriptedPrompter::new(vec![one("env1"), Answer::Fail("interrupted".to_string())]);
    let selector = Selector::new(&prompt);
    let err = selector
        .select_cascading(&cascade(), names(&["env1", "env2", "env3"]))
        .expect_err("prompt failure");
    assert_eq!(err.to_string(), "select environments: interrupted");
}

#[test]
fn cascading_never_returns_a_candidate_twice() {
    let pool = ["a", "b", "c", "d"];
    let prompt = ScriptedPrompter::new(vec![one("c"), one("a"), one("d"), one("b")]);
    let selector = Selector::new(&prompt);
    let picked = selector
        .select_cascading(&cascade(), names(&pool))
        .expect("cascade");
    let mut values: Vec<String> = picked.into_iter().map(|c| c.value).collect();
    assert!(values.len() <= pool.len());
    assert_eq!(values, vec!["c", "a", "d", "b"]);
    values.sort();
    values.dedup();
    assert_eq!(values.len(), pool.len());
}

#[test]
fn multi_select_splits_candidates_from_extras() {
    let prompt = ScriptedPrompter::new(vec![many(&["web", "Enter custom path", "api"])]);
    let selector = Selector::new(&prompt);
    let req = request().extra_option("Enter custom path");
    let (picked, extras) = selector
        .select_many(&req, names(&["api", "web"]), &[])
        .expect("multi select");
    let picked: Vec<String> = picked.into_iter().map(|c| c.value).collect();
    assert_eq!(picked, vec!["web", "api"]);
    assert_eq!(extras, vec!["Enter custom path"]);
}

#[test]
fn ordinals_cover_small_and_large_rounds() {
    assert_eq!(ordinal(1), "first");
    assert_eq!(ordinal(10), "tenth");
    assert_eq!(ordinal(11), "11th");
    assert_eq!(ordinal(21), "21st");
    assert_eq!(ordinal(112), "112th");
}

#[test]
fn candidate_named_like_an_extra_option_is_refused() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let req = request().extra_option("new");
    let err = selector
        .choose(&req, names(&["new", "other"]))
        .expect_err("colliding option");
    assert!(matches!(err, SelectError::DuplicateOption { ref label } if label == "new"));
    assert_eq!(prompt.call_count(), 0);
}

#[test]
fn bare_and_qualified_labels_that_render_alike_are_refused() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let set = CandidateSet::new(vec![
        Candidate::new("a (x)", 1),
        Candidate::qualified("a", "x", 2),
        Candidate::qualified("a", "y", 3),
    ]);
    let err = selector.select_one(&request(), set).expect_err("ambiguous labels");
    assert!(matches!(err, SelectError::DuplicateOption { ref label } if label == "a (x)"));
    assert_eq!(prompt.call_count(), 0);
}

#[test]
fn multi_select_refuses_candidate_shadowing_an_extra() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let req = request().extra_option("Enter custom path");
    let err = selector
        .select_many(&req, names(&["site", "Enter custom path"]), &[])
        .expect_err("colliding option");
    assert!(matches!(err, SelectError::DuplicateOption { .. }));
    assert_eq!(prompt.call_count(), 0);
}

#[test]
fn cascading_refuses_candidate_named_like_the_stop_option() {
    let prompt = ScriptedPrompter::silent();
    let selector = Selector::new(&prompt);
    let err = selector
        .select_cascading(&cascade(), names(&["env1", "[No additional environments]"]))
        .expect_err("colliding stop option");
    assert!(matches!(err, SelectError::DuplicateOption { .. }));
    assert_eq!(prompt.call_count(), 0);
}
