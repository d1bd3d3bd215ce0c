//! Deep matching: does a pattern accept a value?
//!
//! Rules are tried top-down and the first applicable one decides:
//!
//! 1. `Predicate`: the matcher's verdict.
//! 2. `Literal` holding a callable: call it with the value, read truthiness.
//! 3. `Literal(Null)`: never matches.
//! 4. `Literal` scalar: exact equality (`Value::equals`). An aggregate
//!    literal matches the very same allocation, and otherwise behaves as
//!    the field or positional pattern it lifts to.
//! 5. `Fields` / `Sequence` against an aggregate: every listed key or
//!    position must exist in the value and match recursively. Unlisted keys
//!    are wildcards, so an empty pattern accepts any aggregate.
//! 6. Anything else: no match.
//!
//! Predicate failures abort the whole evaluation.

use tagmatch_value::Value;
use tracing::trace;

use crate::config::MatchConfig;
use crate::errors::{depth_limit_exceeded, predicate_failed, MatchResult};
use crate::matcher::Pattern;

/// Decide whether `pattern` accepts `value`, using the global configuration.
pub fn match_value(pattern: &Pattern, value: &Value) -> MatchResult<bool> {
    match_value_with(pattern, value, MatchConfig::global())
}

/// Decide whether `pattern` accepts `value` under an explicit configuration.
pub fn match_value_with(pattern: &Pattern, value: &Value, config: &MatchConfig) -> MatchResult<bool> {
    check(pattern, value, 0, config.max_depth)
}

fn check(pattern: &Pattern, value: &Value, depth: usize, limit: usize) -> MatchResult<bool> {
    if depth > limit {
        return Err(depth_limit_exceeded(limit));
    }

    match pattern {
        Pattern::Predicate(matcher) => matcher.test(value),

        Pattern::Literal(literal @ Value::FunctionVal(_, name)) => literal
            .call(std::slice::from_ref(value))
            .map(|result| result.is_truthy())
            .map_err(|message| predicate_failed(name, message)),

        Pattern::Literal(Value::Null) => Ok(false),

        Pattern::Literal(literal) if literal.is_aggregate() => {
            if literal.ptr_eq(value) {
                return Ok(true);
            }
            check(&Pattern::from(literal.clone()), value, depth, limit)
        }

        Pattern::Literal(literal) => Ok(literal.equals(value)),

        Pattern::Fields(fields) => {
            if !value.is_aggregate() {
                return Ok(false);
            }
            for (key, sub) in fields {
                let Some(field) = value.get(key) else {
                    trace!(field = key.as_str(), "field absent");
                    return Ok(false);
                };
                if !check(sub, field, depth + 1, limit)? {
                    trace!(field = key.as_str(), "field rejected");
                    return Ok(false);
                }
            }
            Ok(true)
        }

        Pattern::Sequence(items) => {
            if !value.is_aggregate() {
                return Ok(false);
            }
            for (index, sub) in items.iter().enumerate() {
                let Some(item) = value.get_index(index) else {
                    trace!(index, "position absent");
                    return Ok(false);
                };
                if !check(sub, item, depth + 1, limit)? {
                    trace!(index, "position rejected");
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }
}
