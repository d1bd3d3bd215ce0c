//! Tagmatch Value - dynamic values for the tagmatch structural match engine.
//!
//! This crate provides:
//! - The runtime value model (`Value`) that patterns are matched against
//! - `Heap<T>`, the only way heap-backed values are allocated
//! - Plain callable values (`FunctionValFn`), used as bare-function patterns
//!
//! # Tagged Values
//!
//! A tagged value is a `Value::Record` whose discriminant field holds a
//! string tag. Which field is the discriminant is decided by the caller, so
//! `Value::tag` takes the field name rather than assuming one.

mod value;

pub use value::{FunctionValFn, Heap, Value};
