//! Point-in-time export of a set's elements.
//!
//! A `Snapshot` is the flat array produced by
//! [`ChainedSet::to_array`](crate::ChainedSet::to_array) wrapped for
//! iteration. It borrows the set, so the set cannot be mutated while the
//! snapshot lives, and it never reflects anything that happens afterwards.

use core::iter::FusedIterator;

/// Flat array of element references taken from a set.
///
/// `iter()` can be called any number of times; `into_iter()` consumes the
/// snapshot.
#[derive(Debug)]
pub struct Snapshot<'a, T> {
    elements: Vec<&'a T>,
}

impl<'a, T> Snapshot<'a, T> {
    pub(crate) fn new(elements: Vec<&'a T>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a T] {
        &self.elements
    }

    /// Restartable iteration over the captured references.
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, &'a T>> {
        self.elements.iter().copied()
    }

    pub fn into_vec(self) -> Vec<&'a T> {
        self.elements
    }
}

/// One-shot iterator returned by `Snapshot::into_iter`.
#[derive(Debug)]
pub struct IntoIter<'a, T> {
    inner: std::vec::IntoIter<&'a T>,
}

impl<'a, T> Iterator for IntoIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<'_, T> {}

impl<T> FusedIterator for IntoIter<'_, T> {}

impl<'a, T> IntoIterator for Snapshot<'a, T> {
    type Item = &'a T;
    type IntoIter = IntoIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.elements.into_iter(),
        }
    }
}

impl<'s, 'a, T> IntoIterator for &'s Snapshot<'a, T> {
    type Item = &'a T;
    type IntoIter = core::iter::Copied<core::slice::Iter<'s, &'a T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
