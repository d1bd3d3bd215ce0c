//! Tagmatch - structural pattern matching over tagged values.
//!
//! This crate provides:
//! - Patterns and the built-in predicate library (`Pattern`, `Matcher`, `builtins`)
//! - The deep-match algorithm (`match_value`)
//! - Ordered, guard-aware case evaluation (`CaseBuilder`)
//! - Declared tag sets (`Union`) and tag-only dispatch tables
//! - Structured errors (`MatchError`, `MatchErrorKind`)
//!
//! # Architecture
//!
//! Data flows one way: a `CaseBuilder` holds one tagged value and, for each
//! registered case whose tag matches, asks `match_value` whether the case's
//! pattern accepts the value. `match_value` consults matchers but never
//! calls back into the builder.
//!
//! Everything is synchronous and pure apart from the handlers the caller
//! supplies. Values are immutable (`Heap`-backed), so one value can feed any
//! number of builders.

mod case;
mod config;
mod deep_match;
mod dispatch;
mod errors;
mod matcher;
mod union;

use std::sync::Once;

pub use case::{CaseBuilder, CaseState};
pub use config::{MatchConfig, MAX_DEPTH_ENV};
pub use deep_match::{match_value, match_value_with};
pub use dispatch::{PartialDispatch, TotalDispatch, TotalDispatchBuilder};
pub use errors::{MatchError, MatchErrorKind, MatchResult};
pub use matcher::{builtins, Matcher, Matchers, Pattern};
pub use tagmatch_value::{FunctionValFn, Value};
pub use union::Union;

// Re-export error constructors for predicate authors
pub use errors::{
    depth_limit_exceeded, incomplete_cases, invalid_union, missing_discriminant, predicate_failed,
    undeclared_tag, unmatched_tag, unresolved_exhaustive,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set;
/// enable with `RUST_LOG=tagmatch=debug` or `RUST_LOG=tagmatch=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A host may already have installed a global subscriber.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
