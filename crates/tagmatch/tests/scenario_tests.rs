//! End-to-end matching scenarios over a request-status union.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use tagmatch::{
    builtins, init_tracing, match_value, predicate_failed, CaseBuilder, MatchErrorKind, Matcher,
    Matchers, Pattern, Union, Value,
};

fn pretty_please() -> Union {
    Union::new("_type", ["idle", "workingOnIt", "success", "failure"]).expect("valid union")
}

fn bob() -> Value {
    let user = Value::record_from([
        ("name", Value::string("Bob")),
        ("age", Value::Int(40)),
        ("address", Value::string("aaaa")),
        (
            "friends",
            Value::list(vec![
                Value::string("Bob"),
                Value::string("Alice"),
                Value::string("Gina"),
            ]),
        ),
    ]);
    pretty_please()
        .variant("success", [("value", user)])
        .expect("declared tag")
}

#[test]
fn array_guard_resolves_to_true() {
    init_tracing();
    let union = pretty_please();
    let value = bob();
    let friends_is_array = Pattern::fields([(
        "value",
        Pattern::fields([("friends", &builtins().array)]),
    )]);

    let result = union
        .match_on(&value)
        .case_for("success", friends_is_array, |_| true)
        .expect("guard evaluates")
        .partial();
    assert_eq!(result, Some(true));
}

#[test]
fn index_guard_falls_through_to_any() {
    init_tracing();
    let union = pretty_please();
    let value = bob();
    let first_friend_is_sue = Pattern::fields([(
        "value",
        Pattern::fields([("friends", Pattern::fields([("0", "Sue")]))]),
    )]);

    let result = union
        .match_on(&value)
        .case_for("success", first_friend_is_sue, |_| "A")
        .and_then(|b| b.case_for("success", Pattern::any(), |_| "B"))
        .expect("guards evaluate")
        .partial();
    assert_eq!(result, Some("B"));
}

#[test]
fn sequence_guards_pick_matching_prefix() {
    let union = pretty_please();
    let value = bob();
    let friends = |names: &[&str]| {
        Pattern::fields([(
            "value",
            Pattern::fields([("friends", Pattern::seq(names.iter().copied()))]),
        )])
    };

    let result = union
        .match_on(&value)
        .case_for("success", friends(&["Bob", "Sue"]), |_| "sue")
        .and_then(|b| b.case_for("success", friends(&["Bob", "Alice"]), |_| "alice"))
        .expect("guards evaluate")
        .partial();
    assert_eq!(result, Some("alice"));
}

#[test]
fn full_coverage_returns_each_handler() {
    let union = pretty_please();
    for tag in union.tags() {
        let value = union
            .variant(tag, Vec::<(String, Value)>::new())
            .expect("declared tag");
        let result = union
            .match_on(&value)
            .case_for("idle", Pattern::any(), |_| "idle")
            .and_then(|b| b.case_for("workingOnIt", Pattern::any(), |_| "workingOnIt"))
            .and_then(|b| b.case_for("success", Pattern::any(), |_| "success"))
            .and_then(|b| b.case_for("failure", Pattern::any(), |_| "failure"))
            .and_then(CaseBuilder::exhaustive)
            .expect("fully covered");
        assert_eq!(result, tag.as_str());
    }
}

#[test]
fn exhaustive_with_rejecting_guard_is_an_error() {
    let union = pretty_please();
    let value = bob();
    let err = union
        .match_on(&value)
        .case_for("idle", Pattern::any(), |_| 0)
        .and_then(|b| b.case_for("workingOnIt", Pattern::any(), |_| 1))
        .and_then(|b| {
            b.case_for(
                "success",
                Pattern::fields([("value", Pattern::fields([("age", 41_i64)]))]),
                |_| 2,
            )
        })
        .and_then(|b| b.case_for("failure", Pattern::any(), |_| 3))
        .and_then(CaseBuilder::exhaustive)
        .expect_err("guard rejects the only success case");
    assert_eq!(
        err.kind,
        MatchErrorKind::UnresolvedExhaustive {
            tag: Some("success".to_string())
        }
    );
}

#[test]
fn refinement_as_guard() {
    let union = pretty_please();
    let is_complete = union
        .refinement(["success", "failure"])
        .expect("declared tags");
    assert!(match_value(&Pattern::from(&is_complete), &bob()).expect("total"));

    let idle = union
        .variant("idle", Vec::<(String, Value)>::new())
        .expect("declared tag");
    assert!(!match_value(&Pattern::from(is_complete), &idle).expect("total"));
}

#[test]
fn throwing_predicate_surfaces_from_case_for() {
    let union = pretty_please();
    let value = bob();
    let strict_age = Matcher::try_new("strict_age", |v| match v.as_int() {
        Some(age) => Ok(age >= 18),
        None => Err(predicate_failed("strict_age", "age must be an int")),
    });
    let by_name = Pattern::fields([("value", Pattern::fields([("name", strict_age)]))]);

    let err = union
        .match_on(&value)
        .case_for("success", by_name, |_| "adult")
        .expect_err("predicate fails");
    assert_eq!(
        err.kind,
        MatchErrorKind::PredicateFailure {
            matcher: "strict_age".to_string(),
            message: "age must be an int".to_string()
        }
    );
}

#[test]
fn array_of_guard_on_payload() {
    let union = pretty_please();
    let value = bob();
    let all_strings = Pattern::fields([(
        "value",
        Pattern::fields([("friends", Matchers::array_of(&builtins().string))]),
    )]);
    let all_numbers = Pattern::fields([(
        "value",
        Pattern::fields([("friends", Matchers::array_of(&builtins().number))]),
    )]);

    let result = union
        .match_on(&value)
        .case_for("success", all_numbers, |_| "numbers")
        .and_then(|b| b.case_for("success", all_strings, |_| "strings"))
        .expect("guards evaluate")
        .partial();
    assert_eq!(result, Some("strings"));
}

#[test]
fn custom_discriminant() {
    let option = Union::new("_tag", ["None", "Some"]).expect("valid union");
    let some = option
        .variant("Some", [("value", Value::Int(16))])
        .expect("declared tag");

    let rendered = option
        .match_on(&some)
        .case_for("Some", Pattern::any(), |v| {
            format!("some: {}", v.get("value").cloned().unwrap_or(Value::Null))
        })
        .and_then(|b| b.case_for("None", Pattern::any(), |_| "none".to_string()))
        .and_then(CaseBuilder::exhaustive)
        .expect("fully covered");
    assert_eq!(rendered, "some: 16");
}
