//! `Set`: the operation set shared by set implementations.
//!
//! Callers that only need membership semantics can take `&mut dyn Set<T>`
//! and stay independent of the hashing and release strategy in use.

use crate::callbacks::{BucketHasher, Equivalence, Release};
use crate::chained_set::ChainedSet;
use crate::error::Result;

pub trait Set<T> {
    /// Insert `element`; `false` if an equivalent one is already present.
    fn add(&mut self, element: T) -> bool;

    fn contains(&self, element: &T) -> bool;

    /// Remove and release the element equivalent to `element`.
    fn remove(&mut self, element: &T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// References to every element, in no particular order.
    fn to_array(&self) -> Result<Vec<&T>>;
}

impl<T, H, E, R> Set<T> for ChainedSet<T, H, E, R>
where
    H: BucketHasher<T>,
    E: Equivalence<T>,
    R: Release<T>,
{
    fn add(&mut self, element: T) -> bool {
        ChainedSet::add(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        ChainedSet::contains(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        ChainedSet::remove(self, element)
    }

    fn len(&self) -> usize {
        ChainedSet::len(self)
    }

    fn clear(&mut self) {
        ChainedSet::clear(self)
    }

    fn to_array(&self) -> Result<Vec<&T>> {
        ChainedSet::to_array(self)
    }
}
