//! Patterns and the built-in predicate library.
//!
//! A `Pattern` is a value-shaped template. Its variants are closed, so the
//! deep-match algorithm dispatches on the variant instead of sniffing for a
//! marker at runtime:
//!
//! - `Literal` compares by equality (a callable literal is invoked instead)
//! - `Predicate` runs a `Matcher`
//! - `Fields` constrains the listed fields and ignores the rest
//! - `Sequence` constrains the listed positions and ignores the rest
//!
//! The built-in matchers live in a `Matchers` table built once on first use
//! and shared for the rest of the process (see `builtins()`).

// Predicate closures are shared between clones of the same pattern
#![expect(
    clippy::disallowed_types,
    reason = "Arc shares immutable predicate closures between pattern clones"
)]

use std::fmt;
use std::sync::{Arc, OnceLock};

use tagmatch_value::Value;

use crate::errors::MatchResult;

/// Predicate signature stored inside a `Matcher`.
type PredicateFn = dyn Fn(&Value) -> MatchResult<bool> + Send + Sync;

/// A named boolean test over values.
///
/// Predicates are expected to be total. A predicate that fails anyway
/// (returns `Err`) aborts the enclosing match; the failure is never turned
/// into `false`.
#[derive(Clone)]
pub struct Matcher {
    name: Arc<str>,
    predicate: Arc<PredicateFn>,
}

impl Matcher {
    /// Wrap a total predicate.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::try_new(name, move |v| Ok(predicate(v)))
    }

    /// Wrap a predicate that may fail.
    pub fn try_new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> MatchResult<bool> + Send + Sync + 'static,
    {
        Matcher {
            name: Arc::from(name.into()),
            predicate: Arc::new(predicate),
        }
    }

    /// Name shown in logs and error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the predicate.
    #[inline]
    pub fn test(&self, value: &Value) -> MatchResult<bool> {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({})", self.name)
    }
}

/// Template filtering a value beyond its tag.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Scalar or aggregate compared by equality; callables are invoked.
    Literal(Value),
    /// Opaque predicate.
    Predicate(Matcher),
    /// Subset filter over named fields.
    Fields(Vec<(String, Pattern)>),
    /// Subset filter over positions.
    Sequence(Vec<Pattern>),
}

impl Pattern {
    /// Pattern accepting every value.
    pub fn any() -> Self {
        Pattern::Predicate(builtins().any.clone())
    }

    /// The null literal. Never matches anything, not even `Value::Null`.
    pub fn null() -> Self {
        Pattern::Literal(Value::Null)
    }

    /// Build a field pattern from `(name, sub-pattern)` pairs.
    ///
    /// # Example
    ///
    /// ```text
    /// let p = Pattern::fields([("value", Pattern::fields([("friends", builtins().array.clone())]))]);
    /// ```
    pub fn fields<K, P, I>(fields: I) -> Self
    where
        K: Into<String>,
        P: Into<Pattern>,
        I: IntoIterator<Item = (K, P)>,
    {
        Pattern::Fields(
            fields
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        )
    }

    /// Build a positional pattern.
    pub fn seq<P, I>(items: I) -> Self
    where
        P: Into<Pattern>,
        I: IntoIterator<Item = P>,
    {
        Pattern::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Whether this pattern is an opaque predicate rather than plain data.
    pub fn is_matcher(&self) -> bool {
        matches!(self, Pattern::Predicate(_))
    }
}

// Conversions

impl From<Value> for Pattern {
    /// Lift plain data into a pattern: records become field patterns, lists
    /// become positional patterns, everything else is a literal.
    fn from(value: Value) -> Self {
        match &value {
            Value::Record(fields) => {
                let mut entries: Vec<(String, Pattern)> = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Pattern::from(v.clone())))
                    .collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                Pattern::Fields(entries)
            }
            Value::List(items) => {
                Pattern::Sequence(items.iter().cloned().map(Pattern::from).collect())
            }
            _ => Pattern::Literal(value),
        }
    }
}

impl From<Matcher> for Pattern {
    fn from(matcher: Matcher) -> Self {
        Pattern::Predicate(matcher)
    }
}

impl From<&Matcher> for Pattern {
    fn from(matcher: &Matcher) -> Self {
        Pattern::Predicate(matcher.clone())
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Value::string(s))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Value::string(s))
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Pattern::Literal(Value::Int(n))
    }
}

impl From<f64> for Pattern {
    fn from(f: f64) -> Self {
        Pattern::Literal(Value::Float(f))
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Value::Bool(b))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::Predicate(matcher) => write!(f, "{}", matcher.name()),
            Pattern::Fields(fields) => {
                write!(f, "{{")?;
                for (i, (k, p)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {p}")?;
                }
                write!(f, "}}")
            }
            Pattern::Sequence(items) => {
                write!(f, "[")?;
                for (i, p) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, "]")
            }
        }
    }
}

// Built-in matchers

/// The built-in predicate library.
pub struct Matchers {
    /// Accepts every value.
    pub any: Matcher,
    /// Accepts strings.
    pub string: Matcher,
    /// Accepts integers and floats.
    pub number: Matcher,
    /// Accepts booleans.
    pub boolean: Matcher,
    /// Accepts callable values.
    pub function: Matcher,
    /// Accepts lists.
    pub array: Matcher,
}

impl Matchers {
    fn new() -> Self {
        Matchers {
            any: Matcher::new("any", |_| true),
            string: Matcher::new("string", |v| matches!(v, Value::Str(_))),
            number: Matcher::new("number", Value::is_number),
            boolean: Matcher::new("boolean", |v| v.as_bool().is_some()),
            function: Matcher::new("function", Value::is_callable),
            array: Matcher::new("array", |v| matches!(v, Value::List(_))),
        }
    }

    /// Lists whose every element satisfies `element`.
    ///
    /// Vacuously true for an empty list. Stops at the first rejected element.
    pub fn array_of(element: &Matcher) -> Matcher {
        let element = element.clone();
        Matcher::try_new(format!("arrayOf({})", element.name()), move |v| {
            let Some(items) = v.as_list() else {
                return Ok(false);
            };
            for item in items {
                if !element.test(item)? {
                    return Ok(false);
                }
            }
            Ok(true)
        })
    }
}

static BUILTINS: OnceLock<Matchers> = OnceLock::new();

/// Get the built-in matcher library (lazily initialized, never mutated).
pub fn builtins() -> &'static Matchers {
    BUILTINS.get_or_init(Matchers::new)
}
