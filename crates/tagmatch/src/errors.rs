//! Error types for matching and dispatch.
//!
//! # Structured Error Categories
//!
//! `MatchErrorKind` carries the typed category; `MatchError` wraps it with a
//! rendered message and optional notes. Factory functions (e.g.
//! `unmatched_tag()`) are the public way to build errors and populate both.
//!
//! Every error here is a programmer error rather than a transient condition:
//! nothing is retried, and `CaseBuilder::partial` is the only path that
//! turns "no case matched" into an ordinary value.

use std::fmt;

/// Result of a fallible match operation.
pub type MatchResult<T> = Result<T, MatchError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchErrorKind {
    // Dispatch
    /// A total dispatcher has no handler for the value's tag.
    UnmatchedTag { tag: String },
    /// The value has no string at the discriminant field.
    MissingDiscriminant { discriminant: String },

    // Case builder
    /// `exhaustive()` was reached while still searching.
    UnresolvedExhaustive { tag: Option<String> },
    /// Some declared tags never received a case or handler.
    IncompleteCases { missing: Vec<String> },
    /// A case or handler names a tag outside the declared set.
    UndeclaredTag { tag: String },

    // Pattern
    /// A predicate or bare callable failed while being evaluated.
    PredicateFailure { matcher: String, message: String },
    /// Pattern recursion went deeper than the configured limit.
    DepthLimitExceeded { limit: usize },

    // Declaration
    /// A union declaration is malformed.
    InvalidUnion { reason: String },
}

impl fmt::Display for MatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedTag { tag } => write!(f, "no handler for tag `{tag}`"),
            Self::MissingDiscriminant { discriminant } => {
                write!(f, "value has no string discriminant `{discriminant}`")
            }
            Self::UnresolvedExhaustive { tag: Some(tag) } => write!(
                f,
                "exhaustive match resolved no case: every case for tag `{tag}` rejected the value"
            ),
            Self::UnresolvedExhaustive { tag: None } => {
                write!(f, "exhaustive match resolved no case: value is untagged")
            }
            Self::IncompleteCases { missing } => {
                let tag_word = if missing.len() == 1 { "tag" } else { "tags" };
                write!(f, "non-exhaustive cases: missing {tag_word} ")?;
                for (i, tag) in missing.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "`{tag}`")?;
                }
                Ok(())
            }
            Self::UndeclaredTag { tag } => write!(f, "tag `{tag}` is not declared"),
            Self::PredicateFailure { matcher, message } => {
                write!(f, "predicate `{matcher}` failed: {message}")
            }
            Self::DepthLimitExceeded { limit } => {
                write!(f, "pattern nesting exceeds depth limit ({limit})")
            }
            Self::InvalidUnion { reason } => write!(f, "invalid union: {reason}"),
        }
    }
}

/// Matching error.
#[derive(Clone, Debug)]
pub struct MatchError {
    /// Structured error category.
    pub kind: MatchErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Additional context, rendered after the message.
    pub notes: Vec<String>,
}

impl MatchError {
    fn from_kind(kind: MatchErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    /// Attach a context note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MatchError {}

// Factory functions

/// A total dispatcher was given a value whose tag it has no handler for.
#[cold]
pub fn unmatched_tag(tag: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::UnmatchedTag {
        tag: tag.to_string(),
    })
}

/// The value carries no string at the discriminant field.
#[cold]
pub fn missing_discriminant(discriminant: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::MissingDiscriminant {
        discriminant: discriminant.to_string(),
    })
}

/// `exhaustive()` found the builder still searching.
#[cold]
pub fn unresolved_exhaustive(tag: Option<&str>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::UnresolvedExhaustive {
        tag: tag.map(str::to_string),
    })
}

/// Declared tags were left without a case or handler.
#[cold]
pub fn incomplete_cases(missing: Vec<String>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::IncompleteCases { missing })
}

/// A tag outside the declared set was used.
#[cold]
pub fn undeclared_tag(tag: &str) -> MatchError {
    MatchError::from_kind(MatchErrorKind::UndeclaredTag {
        tag: tag.to_string(),
    })
}

/// A predicate failed during evaluation.
#[cold]
pub fn predicate_failed(matcher: &str, message: impl Into<String>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::PredicateFailure {
        matcher: matcher.to_string(),
        message: message.into(),
    })
}

/// Pattern recursion passed the configured limit.
#[cold]
pub fn depth_limit_exceeded(limit: usize) -> MatchError {
    MatchError::from_kind(MatchErrorKind::DepthLimitExceeded { limit })
}

/// A union declaration was rejected.
#[cold]
pub fn invalid_union(reason: impl Into<String>) -> MatchError {
    MatchError::from_kind(MatchErrorKind::InvalidUnion {
        reason: reason.into(),
    })
}
