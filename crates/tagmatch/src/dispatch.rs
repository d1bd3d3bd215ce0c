//! Tag-only dispatch.
//!
//! The simple counterpart of `CaseBuilder`: a table from tag to handler,
//! consulted by the value's tag alone. `TotalDispatch` must map every
//! declared tag; `PartialDispatch` maps a subset and hands everything else
//! to a fallback.

use tagmatch_value::Value;
use tracing::debug;

use crate::errors::{incomplete_cases, invalid_union, unmatched_tag, MatchResult};
use crate::union::Union;

type Handler<'u, Z> = Box<dyn Fn(&Value) -> Z + 'u>;

/// Builder for a `TotalDispatch`.
pub struct TotalDispatchBuilder<'u, Z> {
    union: &'u Union,
    handlers: Vec<Option<Handler<'u, Z>>>,
}

impl<'u, Z> TotalDispatchBuilder<'u, Z> {
    /// Map `tag` to `handler`. A later mapping for the same tag replaces
    /// the earlier one.
    pub fn on<F>(mut self, tag: &str, handler: F) -> MatchResult<Self>
    where
        F: Fn(&Value) -> Z + 'u,
    {
        let index = self.union.require(tag)?;
        self.handlers[index] = Some(Box::new(handler));
        Ok(self)
    }

    /// Finish the table. Every declared tag must be mapped.
    pub fn build(self) -> MatchResult<TotalDispatch<'u, Z>> {
        let covered: Vec<bool> = self.handlers.iter().map(Option::is_some).collect();
        let missing = self.union.missing(&covered);
        if !missing.is_empty() {
            return Err(incomplete_cases(missing));
        }
        Ok(TotalDispatch {
            union: self.union,
            handlers: self.handlers,
        })
    }
}

/// Dispatch table covering every declared tag.
pub struct TotalDispatch<'u, Z> {
    union: &'u Union,
    handlers: Vec<Option<Handler<'u, Z>>>,
}

impl<Z> TotalDispatch<'_, Z> {
    /// Run the handler for `value`'s tag.
    ///
    /// A value whose tag has no handler (an undeclared tag) is an
    /// `UnmatchedTag` error.
    pub fn apply(&self, value: &Value) -> MatchResult<Z> {
        let tag = self.union.tag_of(value)?;
        let handler = self
            .union
            .position(tag)
            .and_then(|index| self.handlers.get(index))
            .and_then(Option::as_ref);
        match handler {
            Some(handler) => {
                debug!(tag, "dispatching");
                Ok(handler(value))
            }
            None => Err(unmatched_tag(tag)
                .with_note(format!("declared tags: {}", self.union.tags().join(", ")))),
        }
    }
}

/// Dispatch table over a subset of tags, with a fallback.
pub struct PartialDispatch<'u, Z> {
    union: &'u Union,
    handlers: Vec<Option<Handler<'u, Z>>>,
    fallback: Handler<'u, Z>,
}

impl<'u, Z> PartialDispatch<'u, Z> {
    /// Map `tag` to `handler`. A later mapping for the same tag replaces
    /// the earlier one.
    pub fn on<F>(mut self, tag: &str, handler: F) -> MatchResult<Self>
    where
        F: Fn(&Value) -> Z + 'u,
    {
        let index = self.union.require(tag)?;
        self.handlers[index] = Some(Box::new(handler));
        Ok(self)
    }

    /// Run the mapped handler for `value`'s tag, or the fallback with the
    /// original value.
    pub fn apply(&self, value: &Value) -> Z {
        let handler = value
            .tag(self.union.discriminant())
            .and_then(|tag| self.union.position(tag))
            .and_then(|index| self.handlers.get(index))
            .and_then(Option::as_ref);
        if let Some(handler) = handler {
            debug!("dispatching to mapped handler");
            handler(value)
        } else {
            debug!("dispatching to fallback");
            (self.fallback)(value)
        }
    }
}

impl Union {
    /// Start a total dispatch table.
    pub fn dispatch<'u, Z>(&'u self) -> TotalDispatchBuilder<'u, Z> {
        TotalDispatchBuilder {
            union: self,
            handlers: std::iter::repeat_with(|| None).take(self.tags().len()).collect(),
        }
    }

    /// Start a partial dispatch table with `fallback` for unmapped tags.
    pub fn dispatch_partial<'u, Z, F>(&'u self, fallback: F) -> PartialDispatch<'u, Z>
    where
        F: Fn(&Value) -> Z + 'u,
    {
        PartialDispatch {
            union: self,
            handlers: std::iter::repeat_with(|| None).take(self.tags().len()).collect(),
            fallback: Box::new(fallback),
        }
    }

    /// Item-first form of `TotalDispatch::apply`.
    ///
    /// The table must have been built from this union.
    pub fn switch<Z>(&self, value: &Value, table: &TotalDispatch<'_, Z>) -> MatchResult<Z> {
        if table.union != self {
            return Err(invalid_union("dispatch table was built for a different union"));
        }
        table.apply(value)
    }

    /// Item-first form of `PartialDispatch::apply`.
    ///
    /// The table must have been built from this union.
    pub fn switch_partial<Z>(&self, value: &Value, table: &PartialDispatch<'_, Z>) -> MatchResult<Z> {
        if table.union != self {
            return Err(invalid_union("dispatch table was built for a different union"));
        }
        Ok(table.apply(value))
    }
}
