use super::*;
use crate::errors::{predicate_failed, MatchErrorKind};
use crate::matcher::{builtins, Matcher};
use pretty_assertions::assert_eq;
use std::cell::Cell;

fn please() -> Union {
    match Union::new("_type", ["idle", "workingOnIt", "success", "failure"]) {
        Ok(u) => u,
        Err(e) => panic!("{e}"),
    }
}

fn success(value: Value) -> Value {
    Value::tagged("_type", "success", [("value", value)])
}

fn idle() -> Value {
    Value::tagged("_type", "idle", Vec::<(String, Value)>::new())
}

/// Register an always-accepting case for every tag except `skip`.
fn cover_rest<'a>(
    mut builder: CaseBuilder<'a, &'static str>,
    skip: &str,
) -> CaseBuilder<'a, &'static str> {
    for tag in ["idle", "workingOnIt", "success", "failure"] {
        if tag != skip {
            builder = match builder.case_for(tag, Pattern::any(), |_| "rest") {
                Ok(b) => b,
                Err(e) => panic!("{e}"),
            };
        }
    }
    builder
}

#[test]
fn resolves_handler_for_matching_tag() {
    let u = please();
    let v = idle();
    let result = u
        .match_on(&v)
        .case_for("success", Pattern::any(), |_| "success")
        .and_then(|b| b.case_for("idle", Pattern::any(), |_| "idle"))
        .and_then(|b| b.case_for("workingOnIt", Pattern::any(), |_| "working"))
        .and_then(|b| b.case_for("failure", Pattern::any(), |_| "failure"))
        .and_then(CaseBuilder::exhaustive);
    assert_eq!(result.ok(), Some("idle"));
}

#[test]
fn tag_match_alone_does_not_resolve() {
    let u = please();
    let v = success(Value::Int(1));
    let builder = u
        .match_on(&v)
        .case_for("success", Pattern::fields([("value", 2_i64)]), |_| "two");
    let builder = match builder {
        Ok(b) => b,
        Err(e) => panic!("{e}"),
    };
    assert!(!builder.is_resolved());
    assert_eq!(builder.state(), &CaseState::Searching);
}

#[test]
fn first_match_wins() {
    let u = please();
    let v = success(Value::Int(1));
    let second_ran = Cell::new(false);
    let result = u
        .match_on(&v)
        .case_for("success", Pattern::any(), |_| "first")
        .and_then(|b| {
            b.case_for("success", Pattern::any(), |_| {
                second_ran.set(true);
                "second"
            })
        })
        .map(CaseBuilder::partial);
    assert_eq!(result.ok(), Some(Some("first")));
    assert!(!second_ran.get());
}

#[test]
fn handler_runs_exactly_once() {
    let u = please();
    let v = success(Value::Int(1));
    let calls = Cell::new(0);
    let builder = u.match_on(&v).case_for("success", Pattern::any(), |_| {
        calls.set(calls.get() + 1);
    });
    let builder = builder.and_then(|b| b.case_for("idle", Pattern::any(), |_| ()));
    assert!(builder.is_ok());
    assert_eq!(calls.get(), 1);
}

#[test]
fn handler_receives_the_tagged_value() {
    let u = please();
    let v = success(Value::string("payload"));
    let result = u
        .match_on(&v)
        .case_for("success", Pattern::any(), |v| v.get("value").cloned())
        .map(CaseBuilder::partial);
    assert_eq!(result.ok(), Some(Some(Some(Value::string("payload")))));
}

#[test]
fn partial_returns_none_when_unresolved() {
    let u = please();
    let v = idle();
    let result = u
        .match_on(&v)
        .case_for("success", Pattern::any(), |_| 1)
        .map(CaseBuilder::partial);
    assert_eq!(result.ok(), Some(None));
}

#[test]
fn exhaustive_fails_loudly_when_guard_rejects() {
    let u = please();
    let v = success(Value::Int(1));
    let builder = u
        .match_on(&v)
        .case_for("success", Pattern::fields([("value", "never")]), |_| "success");
    let builder = match builder {
        Ok(b) => cover_rest(b, "success"),
        Err(e) => panic!("{e}"),
    };
    let err = builder.exhaustive().err().map(|e| e.kind);
    assert_eq!(
        err,
        Some(MatchErrorKind::UnresolvedExhaustive {
            tag: Some("success".to_string())
        })
    );
}

#[test]
fn exhaustive_requires_every_tag() {
    let u = please();
    let v = idle();
    let builder = u
        .match_on(&v)
        .case_for("idle", Pattern::any(), |_| "idle")
        .and_then(|b| b.case_for("success", Pattern::any(), |_| "success"));
    let err = builder.and_then(CaseBuilder::exhaustive).err().map(|e| e.kind);
    assert_eq!(
        err,
        Some(MatchErrorKind::IncompleteCases {
            missing: vec!["workingOnIt".to_string(), "failure".to_string()]
        })
    );
}

#[test]
fn undeclared_tag_fails_fast() {
    let u = please();
    let v = idle();
    let err = u
        .match_on(&v)
        .case_for("loading", Pattern::any(), |_| 0)
        .err()
        .map(|e| e.kind);
    assert_eq!(
        err,
        Some(MatchErrorKind::UndeclaredTag {
            tag: "loading".to_string()
        })
    );
}

#[test]
fn untagged_value_never_resolves() {
    let u = please();
    let v = Value::record_from([("value", Value::Int(1))]);
    let builder = cover_rest(u.match_on(&v), "");
    assert!(!builder.is_resolved());
    let err = builder.exhaustive().err().map(|e| e.kind);
    assert_eq!(err, Some(MatchErrorKind::UnresolvedExhaustive { tag: None }));
}

#[test]
fn resolved_builder_skips_later_guards() {
    let u = please();
    let v = success(Value::Int(1));
    let boom = Matcher::try_new("boom", |_| Err(predicate_failed("boom", "evaluated")));
    let result = u
        .match_on(&v)
        .case_for("success", Pattern::any(), |_| "ok")
        .and_then(|b| b.case_for("success", boom, |_| "boom"))
        .map(CaseBuilder::partial);
    assert_eq!(result.ok(), Some(Some("ok")));
}

#[test]
fn predicate_failure_aborts_the_chain() {
    let u = please();
    let v = success(Value::Int(1));
    let boom = Matcher::try_new("boom", |_| Err(predicate_failed("boom", "evaluated")));
    let err = u
        .match_on(&v)
        .case_for("success", Pattern::fields([("value", boom)]), |_| "boom")
        .err()
        .map(|e| e.kind);
    assert_eq!(
        err,
        Some(MatchErrorKind::PredicateFailure {
            matcher: "boom".to_string(),
            message: "evaluated".to_string()
        })
    );
}

#[test]
fn predicate_for_other_tag_is_never_evaluated() {
    let u = please();
    let v = idle();
    let boom = Matcher::try_new("boom", |_| Err(predicate_failed("boom", "evaluated")));
    let result = u
        .match_on(&v)
        .case_for("success", boom, |_| "boom")
        .map(CaseBuilder::partial);
    assert_eq!(result.ok(), Some(None));
}

#[test]
fn cloned_snapshots_branch_independently() {
    let u = please();
    let v = success(Value::Int(1));
    let base = match u
        .match_on(&v)
        .case_for("idle", Pattern::any(), |_| "idle")
    {
        Ok(b) => b,
        Err(e) => panic!("{e}"),
    };

    let left = base
        .clone()
        .case_for("success", Pattern::fields([("value", 1_i64)]), |_| "left")
        .map(CaseBuilder::partial);
    let right = base
        .clone()
        .case_for("success", Pattern::fields([("value", 2_i64)]), |_| "right")
        .map(CaseBuilder::partial);

    assert_eq!(left.ok(), Some(Some("left")));
    assert_eq!(right.ok(), Some(None));
    assert!(!base.is_resolved());
}

#[test]
fn covered_tags_follow_declaration_order() {
    let u = please();
    let v = idle();
    let builder = u
        .match_on(&v)
        .case_for("failure", Pattern::any(), |_| ())
        .and_then(|b| b.case_for("idle", Pattern::any(), |_| ()));
    let builder = match builder {
        Ok(b) => b,
        Err(e) => panic!("{e}"),
    };
    let covered: Vec<&str> = builder.covered_tags().collect();
    assert_eq!(covered, vec!["idle", "failure"]);
}

#[test]
fn builtin_guards_filter_payloads() {
    let u = please();
    let v = success(Value::list(vec![Value::string("a")]));
    let result = u
        .match_on(&v)
        .case_for("success", Pattern::fields([("value", &builtins().string)]), |_| "string")
        .and_then(|b| b.case_for("success", Pattern::fields([("value", &builtins().array)]), |_| "array"))
        .map(CaseBuilder::partial);
    assert_eq!(result.ok(), Some(Some("array")));
}
