//! ChainedSet: the public set type.
//!
//! Owns a [`BucketArray`] and layers the policy on top of it: addressing an
//! element to a bucket, incremental load accounting, throttled growth, and
//! handing elements to the release callback when the set gives them up.
//!
//! Load is kept as a running ratio. Every insert adds `1 / capacity` and
//! every removal subtracts it, so the ratio is never recomputed from `len`.
//! Inserts only look at it once more than `check_interval` mutations have
//! accumulated; growth is therefore lazy and may trail the threshold by up
//! to that many operations.

use crate::bucket_array::{BucketArray, Iter};
use crate::callbacks::{BucketHasher, Discard, EqEquivalence, Equivalence, Release, StdBucketHasher};
use crate::config::{SetConfig, DEFAULT_CAPACITY};
use crate::error::{InsertError, Result, SetError};
use crate::reentrancy::DebugReentrancy;
use crate::snapshot::Snapshot;
use crate::stats::SetStats;
use core::fmt;
use core::hash::Hash;

/// Outcome of a growth attempt. Only `Grown` changes the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Growth {
    Grown { from: usize, to: usize },
    AtMaximum,
    AllocationFailed,
}

#[inline]
fn bucket_index<T, H: BucketHasher<T>>(hasher: &H, element: &T, buckets: usize) -> usize {
    hasher.bucket(element, buckets) % buckets
}

/// A hash set with separately chained buckets.
///
/// `H` maps elements to buckets, `E` decides equivalence, and `R` receives
/// each element exactly once when the set relinquishes it (on
/// [`remove`](Self::remove), [`clear`](Self::clear), or drop). The defaults
/// give ordinary `Hash + Eq` semantics with elements simply dropped.
///
/// ```
/// use chained_set::ChainedSet;
///
/// let mut set = ChainedSet::new();
/// assert!(set.add("a"));
/// assert!(!set.add("a"));
/// assert!(set.contains(&"a"));
/// assert_eq!(set.len(), 1);
/// ```
pub struct ChainedSet<T, H = StdBucketHasher, E = EqEquivalence, R = Discard>
where
    R: Release<T>,
{
    buckets: BucketArray<T>,
    hasher: H,
    equivalence: E,
    release: R,
    load: f64,
    increment: f64,
    load_factor: f64,
    mutations: usize,
    check_interval: usize,
    max_capacity: usize,
    resizes: u64,
    reentrancy: DebugReentrancy,
}

impl<T: Hash + Eq> ChainedSet<T> {
    /// Empty set with default parameters and callbacks.
    pub fn new() -> Self {
        Self::from_parts(
            BucketArray::new(DEFAULT_CAPACITY),
            SetConfig::default(),
            StdBucketHasher::default(),
            EqEquivalence,
            Discard,
        )
    }

    /// Empty set with default callbacks and the given parameters.
    pub fn with_config(config: SetConfig) -> Result<Self> {
        Self::create(config, StdBucketHasher::default(), EqEquivalence, Discard)
    }
}

impl<T: Hash + Eq> Default for ChainedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H, E, R> ChainedSet<T, H, E, R>
where
    R: Release<T>,
{
    /// Build a set from explicit parameters and callbacks.
    ///
    /// `config` is normalized first (see [`SetConfig::normalized`]). Fails
    /// only if the bucket array cannot be allocated.
    pub fn create(config: SetConfig, hasher: H, equivalence: E, release: R) -> Result<Self> {
        let config = config.normalized();
        let buckets = BucketArray::with_buckets(config.initial_capacity)
            .map_err(|e| SetError::allocation("bucket array", config.initial_capacity, e))?;
        Ok(Self::from_parts(buckets, config, hasher, equivalence, release))
    }

    fn from_parts(buckets: BucketArray<T>, config: SetConfig, hasher: H, equivalence: E, release: R) -> Self {
        let increment = 1.0 / buckets.bucket_count() as f64;
        Self {
            buckets,
            hasher,
            equivalence,
            release,
            load: 0.0,
            increment,
            load_factor: config.load_factor,
            mutations: 0,
            check_interval: config.check_interval,
            max_capacity: config.max_capacity,
            resizes: 0,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.len() == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.bucket_count()
    }

    /// Running occupancy ratio.
    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Release every element and empty all chains. The bucket array is kept.
    pub fn clear(&mut self) {
        let release = &mut self.release;
        for element in self.buckets.drain() {
            release.release(element);
        }
        self.load = 0.0;
        self.mutations = 0;
    }

    /// Borrowing iterator over the stored elements, in bucket order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.buckets.iter()
    }

    /// Collect a reference to every element into a freshly allocated vector
    /// of exactly `len()` slots. Empty sets yield an empty vector.
    pub fn to_array(&self) -> Result<Vec<&T>> {
        let len = self.len();
        let mut out = Vec::new();
        out.try_reserve_exact(len)
            .map_err(|e| SetError::allocation("snapshot array", len, e))?;
        out.extend(self.buckets.iter());
        Ok(out)
    }

    /// [`to_array`](Self::to_array) wrapped for iteration.
    pub fn snapshot(&self) -> Result<Snapshot<'_, T>> {
        self.to_array().map(Snapshot::new)
    }

    pub fn stats(&self) -> SetStats {
        let mut occupied_buckets = 0;
        let mut longest_chain = 0;
        for chain in self.buckets.chains() {
            let n = chain.count();
            if n > 0 {
                occupied_buckets += 1;
                longest_chain = longest_chain.max(n);
            }
        }
        SetStats {
            len: self.len(),
            capacity: self.capacity(),
            load: self.load,
            load_factor: self.load_factor,
            occupied_buckets,
            longest_chain,
            resizes: self.resizes,
        }
    }
}

impl<T, H, E, R> ChainedSet<T, H, E, R>
where
    H: BucketHasher<T>,
    E: Equivalence<T>,
    R: Release<T>,
{
    fn bucket_of(&self, element: &T) -> usize {
        bucket_index(&self.hasher, element, self.buckets.bucket_count())
    }

    fn locate(&self, bucket: usize, probe: &T) -> Option<&T> {
        let equivalence = &self.equivalence;
        self.buckets
            .find(bucket, |stored| equivalence.equivalent(stored, probe))
    }

    pub fn contains(&self, element: &T) -> bool {
        let _g = self.reentrancy.enter();
        let bucket = self.bucket_of(element);
        self.locate(bucket, element).is_some()
    }

    /// Stored element equivalent to `element`, if any.
    pub fn get(&self, element: &T) -> Option<&T> {
        let _g = self.reentrancy.enter();
        let bucket = self.bucket_of(element);
        self.locate(bucket, element)
    }

    /// Insert `element`, returning `false` if an equivalent one is already
    /// stored or its link could not be allocated. A rejected element is
    /// dropped without reaching the release callback; use
    /// [`insert`](Self::insert) to get it back instead.
    pub fn add(&mut self, element: T) -> bool {
        self.insert(element).is_ok()
    }

    /// Insert `element`, handing it back inside the error if an equivalent
    /// one is already stored or its link could not be allocated. Neither
    /// failure changes the contents or the mutation count.
    pub fn insert(&mut self, element: T) -> core::result::Result<(), InsertError<T>> {
        self.maybe_grow();
        let _g = self.reentrancy.enter();
        let bucket = self.bucket_of(&element);
        if self.locate(bucket, &element).is_some() {
            return Err(InsertError::Duplicate(element));
        }
        if let Err((element, _err)) = self.buckets.push_front(bucket, element) {
            log_warn!("insert rejected: link allocation failed: {}", _err);
            return Err(InsertError::AllocationFailure(element));
        }
        self.load += self.increment;
        self.mutations = self.mutations.saturating_add(1);
        Ok(())
    }

    /// Remove the element equivalent to `element` and pass it to the release
    /// callback. Returns `false` if there was none.
    pub fn remove(&mut self, element: &T) -> bool {
        match self.take(element) {
            Some(removed) => {
                self.release.release(removed);
                true
            }
            None => false,
        }
    }

    /// Remove the element equivalent to `element` and return it to the
    /// caller; the release callback does not run.
    pub fn take(&mut self, element: &T) -> Option<T> {
        let _g = self.reentrancy.enter();
        let bucket = self.bucket_of(element);
        let equivalence = &self.equivalence;
        let removed = self
            .buckets
            .unlink(bucket, |stored| equivalence.equivalent(stored, element))?;
        self.load -= self.increment;
        self.mutations = self.mutations.saturating_add(1);
        Some(removed)
    }

    fn maybe_grow(&mut self) {
        if self.mutations > self.check_interval {
            self.mutations = 0;
            if self.load > self.load_factor {
                // Skipped growth is logged by grow and leaves longer chains.
                self.grow();
            }
        }
    }

    /// Double the bucket count (up to the ceiling) and relink every element.
    /// Never fails the caller: at the ceiling or on allocation failure the
    /// set keeps its current buckets.
    pub(crate) fn grow(&mut self) -> Growth {
        let _g = self.reentrancy.enter();
        let from = self.buckets.bucket_count();
        let to = from.saturating_mul(2).min(self.max_capacity);
        if to <= from {
            log_debug!("growth skipped: {} buckets is the ceiling", from);
            return Growth::AtMaximum;
        }
        let hasher = &self.hasher;
        if let Err(_err) = self
            .buckets
            .relink(to, |element, buckets| bucket_index(hasher, element, buckets))
        {
            log_warn!("growth from {} to {} buckets skipped: {}", from, to, _err);
            return Growth::AllocationFailed;
        }
        self.load *= from as f64 / to as f64;
        self.increment = 1.0 / to as f64;
        self.mutations = 0;
        self.resizes += 1;
        log_debug!("grew from {} to {} buckets, load now {:.3}", from, to, self.load);
        Growth::Grown { from, to }
    }

    /// Panics unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let buckets = self.buckets.bucket_count();
        assert!(buckets <= self.max_capacity);
        let mut reachable = 0;
        let mut seen: Vec<&T> = Vec::new();
        for (bucket, chain) in self.buckets.chains().enumerate() {
            for element in chain {
                assert_eq!(bucket_index(&self.hasher, element, buckets), bucket, "element in wrong bucket");
                assert!(
                    !seen.iter().any(|other| self.equivalence.equivalent(*other, element)),
                    "equivalent elements stored twice"
                );
                seen.push(element);
                reachable += 1;
            }
        }
        assert_eq!(reachable, self.len(), "len disagrees with chain traversal");
        let exact = self.len() as f64 / buckets as f64;
        assert!((self.load - exact).abs() < 1e-6, "load {} drifted from {}", self.load, exact);
    }
}

impl<T, H, E, R> Drop for ChainedSet<T, H, E, R>
where
    R: Release<T>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, H, E, R> fmt::Debug for ChainedSet<T, H, E, R>
where
    T: fmt::Debug,
    R: Release<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, H, E, R> Extend<T> for ChainedSet<T, H, E, R>
where
    H: BucketHasher<T>,
    E: Equivalence<T>,
    R: Release<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for ChainedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T, H, E, R> IntoIterator for &'a ChainedSet<T, H, E, R>
where
    R: Release<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
