//! Declared tag sets.
//!
//! A `Union` names the discriminant field and the closed set of tags a
//! tagged value may carry. It is the runtime stand-in for a sum type
//! declaration: case builders and dispatchers check coverage against it.

use rustc_hash::FxHashSet;
use tagmatch_value::Value;

use crate::case::CaseBuilder;
use crate::errors::{invalid_union, missing_discriminant, undeclared_tag, MatchResult};
use crate::matcher::Matcher;

/// A closed set of tags under one discriminant field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Union {
    discriminant: String,
    tags: Vec<String>,
}

impl Union {
    /// Declare a union.
    ///
    /// Fails on an empty discriminant, an empty tag list, or a repeated tag.
    pub fn new<T, I>(discriminant: impl Into<String>, tags: I) -> MatchResult<Self>
    where
        T: Into<String>,
        I: IntoIterator<Item = T>,
    {
        let discriminant = discriminant.into();
        if discriminant.is_empty() {
            return Err(invalid_union("discriminant field name is empty"));
        }

        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        if tags.is_empty() {
            return Err(invalid_union("no tags declared"));
        }

        let mut seen = FxHashSet::default();
        for tag in &tags {
            if !seen.insert(tag.as_str()) {
                return Err(invalid_union(format!("tag `{tag}` declared twice")));
            }
        }

        Ok(Union { discriminant, tags })
    }

    /// The discriminant field name.
    pub fn discriminant(&self) -> &str {
        &self.discriminant
    }

    /// Declared tags, in declaration order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether `tag` is declared.
    pub fn contains(&self, tag: &str) -> bool {
        self.position(tag).is_some()
    }

    /// Declaration index of `tag`.
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    /// Declaration index of `tag`, or `UndeclaredTag`.
    pub(crate) fn require(&self, tag: &str) -> MatchResult<usize> {
        self.position(tag).ok_or_else(|| undeclared_tag(tag))
    }

    /// Build a tagged record for a declared tag.
    pub fn variant<K, I>(&self, tag: &str, fields: I) -> MatchResult<Value>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        self.require(tag)?;
        Ok(Value::tagged(&self.discriminant, tag, fields))
    }

    /// Read the tag of `value`.
    pub fn tag_of<'v>(&self, value: &'v Value) -> MatchResult<&'v str> {
        value
            .tag(&self.discriminant)
            .ok_or_else(|| missing_discriminant(&self.discriminant))
    }

    /// Declared tags missing from `covered`, in declaration order.
    ///
    /// `covered` is indexed by declaration position.
    pub(crate) fn missing(&self, covered: &[bool]) -> Vec<String> {
        self.tags
            .iter()
            .zip(covered)
            .filter(|(_, seen)| !**seen)
            .map(|(tag, _)| tag.clone())
            .collect()
    }

    /// A matcher accepting values whose tag is one of `tags`.
    ///
    /// Every tag must be declared. Values without a tag are rejected.
    ///
    /// # Example
    ///
    /// ```text
    /// let is_complete = union.refinement(["success", "failure"])?;
    /// ```
    pub fn refinement<T, I>(&self, tags: I) -> MatchResult<Matcher>
    where
        T: AsRef<str>,
        I: IntoIterator<Item = T>,
    {
        let mut accepted: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref();
            self.require(tag)?;
            if !accepted.iter().any(|t| t == tag) {
                accepted.push(tag.to_string());
            }
        }

        let name = format!("refinement({})", accepted.join(" | "));
        let discriminant = self.discriminant.clone();
        Ok(Matcher::new(name, move |v| {
            v.tag(&discriminant)
                .is_some_and(|tag| accepted.iter().any(|t| t == tag))
        }))
    }

    /// Start a case builder over `value`.
    pub fn match_on<'a, Z>(&'a self, value: &'a Value) -> CaseBuilder<'a, Z> {
        CaseBuilder::new(self, value)
    }
}
