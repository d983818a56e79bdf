//! Step-by-step construction of a [`ChainedSet`].

use crate::callbacks::{Discard, EqEquivalence, Release, StdBucketHasher};
use crate::chained_set::ChainedSet;
use crate::config::SetConfig;
use crate::error::Result;

/// Collects parameters and callbacks, then builds the set.
///
/// ```
/// use chained_set::SetBuilder;
///
/// let mut set = SetBuilder::new()
///     .capacity(4)
///     .load_factor(0.5)
///     .hasher(|x: &u32, n: usize| *x as usize % n)
///     .build::<u32>()
///     .unwrap();
/// assert!(set.add(9));
/// assert_eq!(set.capacity(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct SetBuilder<H = StdBucketHasher, E = EqEquivalence, R = Discard> {
    config: SetConfig,
    hasher: H,
    equivalence: E,
    release: R,
}

impl SetBuilder {
    pub fn new() -> Self {
        Self {
            config: SetConfig::default(),
            hasher: StdBucketHasher::default(),
            equivalence: EqEquivalence,
            release: Discard,
        }
    }
}

impl Default for SetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, E, R> SetBuilder<H, E, R> {
    /// Replace every numeric parameter at once.
    pub fn config(mut self, config: SetConfig) -> Self {
        self.config = config;
        self
    }

    pub fn capacity(mut self, initial_capacity: usize) -> Self {
        self.config.initial_capacity = initial_capacity;
        self
    }

    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.config.load_factor = load_factor;
        self
    }

    pub fn check_interval(mut self, check_interval: usize) -> Self {
        self.config.check_interval = check_interval;
        self
    }

    pub fn max_capacity(mut self, max_capacity: usize) -> Self {
        self.config.max_capacity = max_capacity;
        self
    }

    pub fn hasher<H2>(self, hasher: H2) -> SetBuilder<H2, E, R> {
        SetBuilder {
            config: self.config,
            hasher,
            equivalence: self.equivalence,
            release: self.release,
        }
    }

    pub fn equivalence<E2>(self, equivalence: E2) -> SetBuilder<H, E2, R> {
        SetBuilder {
            config: self.config,
            hasher: self.hasher,
            equivalence,
            release: self.release,
        }
    }

    pub fn release<R2>(self, release: R2) -> SetBuilder<H, E, R2> {
        SetBuilder {
            config: self.config,
            hasher: self.hasher,
            equivalence: self.equivalence,
            release,
        }
    }

    pub fn build<T>(self) -> Result<ChainedSet<T, H, E, R>>
    where
        R: Release<T>,
    {
        ChainedSet::create(self.config, self.hasher, self.equivalence, self.release)
    }
}
