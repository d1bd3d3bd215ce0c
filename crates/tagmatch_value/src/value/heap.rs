//! Heap wrapper for enforced Arc usage.
//!
//! `Heap<T>` wraps `Arc<T>` and is the only way to allocate heap values in
//! the `Value` system. The constructor is `pub(super)`, so all allocations go
//! through the factory methods on `Value`.

// Arc is the intentional implementation detail of Heap<T>
#![expect(clippy::disallowed_types, reason = "Arc is the whole point of Heap<T>")]

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A heap-allocated, reference-counted value wrapper.
///
/// Cloning a `Heap` shares the allocation; values are never mutated after
/// construction, which is what makes tagged values safe to hand to any
/// number of case builders at once.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    /// Create a new heap-allocated value.
    ///
    /// Only visible within the value module.
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}
