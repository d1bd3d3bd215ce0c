//! Ordered case evaluation over one tagged value.
//!
//! A `CaseBuilder` registers `(tag, pattern, handler)` triples in call order
//! and resolves to the first one whose tag equals the value's tag *and*
//! whose pattern accepts the value. Tag equality alone does not resolve a
//! case.
//!
//! # States
//!
//! - `Searching`: no case has fired yet.
//! - `Resolved`: a handler ran; every later `case_for` is a no-op.
//!
//! Each `case_for` consumes the builder and returns the next snapshot. To
//! branch a partially built chain, clone it first (requires `Z: Clone`).
//!
//! # Finalizers
//!
//! - `exhaustive()` requires every declared tag to have been registered at
//!   least once, and fails with `UnresolvedExhaustive` if nothing fired.
//! - `partial()` returns `None` when nothing fired.
//!
//! # Example
//!
//! ```text
//! let list = Pattern::fields([("value", &builtins().array)]);
//! let answer = please
//!     .match_on(&value)
//!     .case_for("success", list, |_| true)?
//!     .case_for("success", Pattern::any(), |_| false)?
//!     .case_for("idle", Pattern::any(), |_| false)?
//!     .exhaustive()?;
//! ```

use tagmatch_value::Value;
use tracing::{debug, trace};

use crate::deep_match::match_value;
use crate::errors::{incomplete_cases, unresolved_exhaustive, MatchResult};
use crate::matcher::Pattern;
use crate::union::Union;

/// Whether a case has fired yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseState<Z> {
    /// No case has matched so far.
    Searching,
    /// A case matched; holds its handler's result.
    Resolved(Z),
}

/// Chainable case accumulator for one tagged value.
#[derive(Clone, Debug)]
pub struct CaseBuilder<'a, Z> {
    union: &'a Union,
    value: &'a Value,
    state: CaseState<Z>,
    /// Indexed by declaration position in `union`.
    covered: Vec<bool>,
}

impl<'a, Z> CaseBuilder<'a, Z> {
    /// Start searching over `value`.
    pub fn new(union: &'a Union, value: &'a Value) -> Self {
        CaseBuilder {
            union,
            value,
            state: CaseState::Searching,
            covered: vec![false; union.tags().len()],
        }
    }

    /// Register a case.
    ///
    /// The tag must be declared. If the builder is still searching, the
    /// value's tag equals `tag`, and `pattern` accepts the value, `handler`
    /// runs once and its result becomes the final value.
    ///
    /// A predicate failure inside `pattern` is returned as the error and the
    /// builder is dropped with it.
    #[tracing::instrument(level = "trace", skip_all, fields(tag = tag))]
    pub fn case_for<P, F>(mut self, tag: &str, pattern: P, handler: F) -> MatchResult<Self>
    where
        P: Into<Pattern>,
        F: FnOnce(&'a Value) -> Z,
    {
        let index = self.union.require(tag)?;
        self.covered[index] = true;

        if let CaseState::Resolved(_) = self.state {
            return Ok(self);
        }

        if self.value.tag(self.union.discriminant()) != Some(tag) {
            trace!("tag differs");
            return Ok(self);
        }

        let pattern = pattern.into();
        if !match_value(&pattern, self.value)? {
            trace!(%pattern, "guard rejected value");
            return Ok(self);
        }

        debug!(%pattern, "case resolved");
        self.state = CaseState::Resolved(handler(self.value));
        Ok(self)
    }

    /// Whether a case has fired.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, CaseState::Resolved(_))
    }

    /// Current state.
    pub fn state(&self) -> &CaseState<Z> {
        &self.state
    }

    /// Tags registered so far, in declaration order.
    pub fn covered_tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.union
            .tags()
            .iter()
            .zip(&self.covered)
            .filter(|(_, seen)| **seen)
            .map(|(tag, _)| tag.as_str())
    }

    /// Finish a chain that claims to cover every declared tag.
    pub fn exhaustive(self) -> MatchResult<Z> {
        let missing = self.union.missing(&self.covered);
        if !missing.is_empty() {
            return Err(incomplete_cases(missing));
        }

        match self.state {
            CaseState::Resolved(result) => Ok(result),
            CaseState::Searching => {
                let tag = self.value.tag(self.union.discriminant());
                Err(unresolved_exhaustive(tag))
            }
        }
    }

    /// Finish a chain that may legitimately match nothing.
    pub fn partial(self) -> Option<Z> {
        match self.state {
            CaseState::Resolved(result) => Some(result),
            CaseState::Searching => None,
        }
    }
}

#[cfg(test)]
mod tests;
