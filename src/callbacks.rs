//! Element callbacks: bucket addressing, equivalence, and release.
//!
//! A set knows nothing about its elements beyond these three capabilities.
//! Each has a default for ordinary `Hash + Eq` values and a blanket impl for
//! closures, so callers can pass `|x: &u64, n| (*x as usize) % n` directly.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Maps an element to a bucket index for a given bucket count.
///
/// Must be deterministic for a fixed `(element, buckets)` pair and agree with
/// the set's [`Equivalence`]: equivalent elements land in the same bucket.
/// Indices outside `0..buckets` are reduced modulo `buckets`.
pub trait BucketHasher<T: ?Sized> {
    fn bucket(&self, element: &T, buckets: usize) -> usize;
}

impl<T: ?Sized, F> BucketHasher<T> for F
where
    F: Fn(&T, usize) -> usize,
{
    #[inline]
    fn bucket(&self, element: &T, buckets: usize) -> usize {
        self(element, buckets)
    }
}

/// Default addressing: hash with a `BuildHasher`, then reduce.
#[derive(Clone, Debug, Default)]
pub struct StdBucketHasher<S = DefaultHashBuilder> {
    build: S,
}

impl<S> StdBucketHasher<S> {
    pub fn with_hasher(build: S) -> Self {
        Self { build }
    }
}

impl<T, S> BucketHasher<T> for StdBucketHasher<S>
where
    T: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn bucket(&self, element: &T, buckets: usize) -> usize {
        (self.build.hash_one(element) % buckets as u64) as usize
    }
}

/// Decides whether a stored element and a probe are the same set member.
pub trait Equivalence<T: ?Sized> {
    fn equivalent(&self, stored: &T, probe: &T) -> bool;
}

impl<T: ?Sized, F> Equivalence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equivalent(&self, stored: &T, probe: &T) -> bool {
        self(stored, probe)
    }
}

/// Equivalence through `PartialEq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EqEquivalence;

impl<T: ?Sized + PartialEq> Equivalence<T> for EqEquivalence {
    #[inline]
    fn equivalent(&self, stored: &T, probe: &T) -> bool {
        stored == probe
    }
}

/// Receives each element exactly once when the set relinquishes it through
/// `remove`, `clear`, or drop.
pub trait Release<T> {
    fn release(&mut self, element: T);
}

impl<T, F> Release<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn release(&mut self, element: T) {
        self(element)
    }
}

/// No release hook: the element is dropped.
///
/// For borrowed or otherwise non-owning element types this leaves ownership
/// with the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl<T> Release<T> for Discard {
    #[inline]
    fn release(&mut self, element: T) {
        drop(element);
    }
}
