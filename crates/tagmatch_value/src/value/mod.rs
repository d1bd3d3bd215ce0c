//! Runtime values inspected by the match engine.
//!
//! # Heap Enforcement
//!
//! All heap allocations go through factory methods on `Value`. The `Heap<T>`
//! wrapper has a private constructor, so external code cannot build heap
//! values directly:
//!
//! ```text
//! let s = Value::string("hello");                        // OK
//! let list = Value::list(vec![]);                        // OK
//! let ok = Value::tagged("_type", "idle", Vec::new());   // OK
//! let s = Value::Str(Heap::new(...));                    // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Aggregates
//!
//! Records and lists are the two aggregate kinds. Both answer field lookups
//! through `Value::get`: records by key, lists by decimal index. This is what
//! lets a field pattern such as `{0: "Sue"}` reach into a list.

mod heap;

use std::fmt;

use rustc_hash::FxHashMap;

pub use heap::Heap;

/// Plain callable signature.
///
/// A function value in pattern position is called with the candidate value
/// and its result is read for truthiness.
pub type FunctionValFn = fn(&[Value]) -> Result<Value, String>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),

    // Heap Types (use Heap<T> for enforced Arc usage)
    /// String value.
    Str(Heap<String>),
    /// Ordered list of values.
    List(Heap<Vec<Value>>),
    /// Record from field names to values.
    Record(Heap<FxHashMap<String, Value>>),

    /// Plain callable value with a display name.
    FunctionVal(FunctionValFn, &'static str),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    ///
    /// # Example
    ///
    /// ```text
    /// let friends = Value::list(vec![Value::string("Bob"), Value::string("Alice")]);
    /// ```
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a record value from an existing map.
    #[inline]
    pub fn record(fields: FxHashMap<String, Value>) -> Self {
        Value::Record(Heap::new(fields))
    }

    /// Create a record value from `(name, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones with the same name.
    pub fn record_from<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map: FxHashMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::record(map)
    }

    /// Create a tagged record: `fields` plus `discriminant: tag`.
    ///
    /// The discriminant is written last, so a payload field with the same
    /// name cannot shadow the tag.
    ///
    /// # Example
    ///
    /// ```text
    /// let ok = Value::tagged("_type", "success", [("value", Value::Int(1))]);
    /// ```
    pub fn tagged<K, I>(discriminant: &str, tag: &str, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map: FxHashMap<String, Value> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        map.insert(discriminant.to_string(), Value::string(tag));
        Value::record(map)
    }

    /// Create a callable value.
    #[inline]
    pub fn function(f: FunctionValFn, name: &'static str) -> Self {
        Value::FunctionVal(f, name)
    }
}

// Value Methods

impl Value {
    /// Check if this value is truthy.
    ///
    /// `Null`, `false`, zero, NaN and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => !f.is_nan() && f.abs() > 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Record(_) | Value::FunctionVal(..) => true,
        }
    }

    /// Try to convert to an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a float. Integers widen, possibly rounding.
    #[allow(
        clippy::cast_precision_loss,
        reason = "callers asking for a float accept rounding of large ints"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to convert to a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to convert to a record.
    pub fn as_record(&self) -> Option<&FxHashMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Whether this is an integer or a float.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Whether this is a record or a list.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Value::Record(_) | Value::List(_))
    }

    /// Whether this value can be invoked with `call`.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::FunctionVal(..))
    }

    /// Look up a field of an aggregate.
    ///
    /// Records are looked up by key. Lists are looked up by index when `key`
    /// is a decimal index (`"0"`, `"12"`). Every other value has no fields.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.get(key),
            Value::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Look up a position of an aggregate.
    ///
    /// The positional counterpart of `get`: lists by index, records by the
    /// index rendered as a key.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::List(items) => items.get(index),
            Value::Record(fields) => fields.get(index.to_string().as_str()),
            _ => None,
        }
    }

    /// Read the tag stored at `discriminant`, if this is a tagged record.
    pub fn tag(&self, discriminant: &str) -> Option<&str> {
        match self {
            Value::Record(fields) => fields.get(discriminant).and_then(Value::as_str),
            _ => None,
        }
    }

    /// Invoke a callable value.
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        match self {
            Value::FunctionVal(f, _) => f(args),
            other => Err(format!("{} is not callable", other.type_name())),
        }
    }

    /// Whether both values share one heap allocation.
    ///
    /// Scalars never do; use `equals` to compare by content.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Heap::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::FunctionVal(..) => "function",
        }
    }

    /// Check structural equality with another value.
    ///
    /// Unlike `==`, integers and floats compare numerically. The comparison
    /// is exact: a float equals an integer only if it holds that integer.
    #[allow(clippy::float_cmp, reason = "literal equality is exact")]
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(n), Value::Float(f)) | (Value::Float(f), Value::Int(n)) => {
                int_equals_float(*n, *f)
            }
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Record(a), Value::Record(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| v.equals(w)))
            }
            _ => self == other,
        }
    }

    /// Record keys in sorted order, for deterministic rendering.
    fn sorted_entries(fields: &FxHashMap<String, Value>) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = fields.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Exact int/float comparison. No rounding on either side.
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "the range check makes the cast back to i64 exact"
)]
fn int_equals_float(n: i64, f: f64) -> bool {
    // 2^63; i64::MIN converts exactly, i64::MAX does not.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-BOUND..BOUND).contains(&f) && f as i64 == n
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Trait Implementations

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Record(fields) => {
                f.write_str("Record(")?;
                f.debug_map()
                    .entries(Value::sorted_entries(fields))
                    .finish()?;
                f.write_str(")")
            }
            Value::FunctionVal(_, name) => write!(f, "FunctionVal({name})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in Value::sorted_entries(fields).into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::FunctionVal(_, name) => write!(f, "<function {name}>"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::FunctionVal(fa, name_a), Value::FunctionVal(fb, name_b)) => {
                name_a == name_b && std::ptr::fn_addr_eq(*fa, *fb)
            }
            _ => false,
        }
    }
}
