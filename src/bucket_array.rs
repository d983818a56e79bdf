//! BucketArray: chain heads plus an arena of links.
//!
//! Links live in a `SlotMap` and point at each other by generational key, so
//! a chain is a key-linked list threaded through the arena. Growth allocates
//! a new head array and relinks every existing link into it; elements never
//! move and no link is recreated. This layer knows nothing about load or
//! thresholds: callers decide when to relink and how elements map to
//! buckets.

use slotmap::{DefaultKey, SlotMap};
use std::collections::TryReserveError;

#[derive(Debug)]
struct Link<T> {
    element: T,
    next: Option<DefaultKey>,
}

#[derive(Debug)]
pub(crate) struct BucketArray<T> {
    heads: Vec<Option<DefaultKey>>,
    links: SlotMap<DefaultKey, Link<T>>,
    /// Makes the next link reservation fail.
    #[cfg(test)]
    pub(crate) fail_next_reserve: bool,
}

fn empty_heads(buckets: usize) -> Result<Vec<Option<DefaultKey>>, TryReserveError> {
    let mut heads = Vec::new();
    heads.try_reserve_exact(buckets)?;
    heads.resize(buckets, None);
    Ok(heads)
}

impl<T> BucketArray<T> {
    pub(crate) fn new(buckets: usize) -> Self {
        Self {
            heads: vec![None; buckets],
            links: SlotMap::with_key(),
            #[cfg(test)]
            fail_next_reserve: false,
        }
    }

    pub(crate) fn with_buckets(buckets: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            heads: empty_heads(buckets)?,
            links: SlotMap::with_key(),
            #[cfg(test)]
            fail_next_reserve: false,
        })
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.links.len()
    }

    /// First link in `bucket` whose element satisfies `matches`.
    pub(crate) fn find(&self, bucket: usize, mut matches: impl FnMut(&T) -> bool) -> Option<&T> {
        self.chain(bucket).find(|e| matches(*e))
    }

    /// Prepend `element` to the chain of `bucket`.
    ///
    /// The arena slot is reserved first; if that fails the element is handed
    /// back and the array is unchanged.
    pub(crate) fn push_front(&mut self, bucket: usize, element: T) -> Result<(), (T, TryReserveError)> {
        if let Err(e) = self.reserve_link() {
            return Err((element, e));
        }
        let next = self.heads[bucket];
        let key = self.links.insert(Link { element, next });
        self.heads[bucket] = Some(key);
        Ok(())
    }

    fn reserve_link(&mut self) -> Result<(), TryReserveError> {
        #[cfg(test)]
        if core::mem::take(&mut self.fail_next_reserve) {
            return Vec::<u64>::new().try_reserve_exact(usize::MAX);
        }
        self.links.try_reserve(1)
    }

    /// Unlink and return the first element in `bucket` satisfying `matches`.
    ///
    /// The predecessor (or head) is repointed before the link leaves the
    /// arena, so the chain is never left referring to a dead key.
    pub(crate) fn unlink(&mut self, bucket: usize, mut matches: impl FnMut(&T) -> bool) -> Option<T> {
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.heads[bucket];
        while let Some(key) = cur {
            let link = &self.links[key];
            if matches(&link.element) {
                let next = link.next;
                match prev {
                    None => self.heads[bucket] = next,
                    Some(p) => self.links[p].next = next,
                }
                return self.links.remove(key).map(|link| link.element);
            }
            prev = cur;
            cur = link.next;
        }
        None
    }

    /// Move every link into a fresh head array of `buckets` chains, placing
    /// each element at `index(element, buckets)`.
    ///
    /// On allocation failure nothing changes.
    pub(crate) fn relink(
        &mut self,
        buckets: usize,
        index: impl Fn(&T, usize) -> usize,
    ) -> Result<(), TryReserveError> {
        let mut heads = empty_heads(buckets)?;
        for head in self.heads.iter_mut() {
            let mut cur = head.take();
            while let Some(key) = cur {
                let link = &mut self.links[key];
                cur = link.next;
                let target = index(&link.element, buckets);
                link.next = heads[target];
                heads[target] = Some(key);
            }
        }
        self.heads = heads;
        Ok(())
    }

    /// Empty every chain and yield the stored elements. Heads are reset
    /// before the first element is yielded; the head array is kept.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.heads.fill(None);
        self.links.drain().map(|(_, link)| link.element)
    }

    pub(crate) fn chain(&self, bucket: usize) -> Chain<'_, T> {
        Chain {
            links: &self.links,
            cursor: self.heads[bucket],
        }
    }

    pub(crate) fn chains(&self) -> impl Iterator<Item = Chain<'_, T>> + '_ {
        (0..self.heads.len()).map(move |bucket| self.chain(bucket))
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            heads: self.heads.iter(),
            links: &self.links,
            cursor: None,
            remaining: self.links.len(),
        }
    }
}

/// Elements of one chain, head first.
pub(crate) struct Chain<'a, T> {
    links: &'a SlotMap<DefaultKey, Link<T>>,
    cursor: Option<DefaultKey>,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let links = self.links;
        let link = &links[self.cursor?];
        self.cursor = link.next;
        Some(&link.element)
    }
}

/// Iterator over every stored element, bucket by bucket.
///
/// Created by [`ChainedSet::iter`](crate::ChainedSet::iter). Order follows
/// the bucket layout and changes when the set grows.
pub struct Iter<'a, T> {
    heads: core::slice::Iter<'a, Option<DefaultKey>>,
    links: &'a SlotMap<DefaultKey, Link<T>>,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.cursor {
                let links = self.links;
                let link = &links[key];
                self.cursor = link.next;
                self.remaining -= 1;
                return Some(&link.element);
            }
            self.cursor = *self.heads.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> core::iter::FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn modulo(x: &u32, n: usize) -> usize {
        (*x as usize) % n
    }

    fn filled(buckets: usize, items: impl IntoIterator<Item = u32>) -> BucketArray<u32> {
        let mut a = BucketArray::with_buckets(buckets).unwrap();
        for x in items {
            a.push_front(modulo(&x, buckets), x).unwrap();
        }
        a
    }

    #[test]
    fn push_front_prepends() {
        let a = filled(4, [1, 5, 9]);
        let chain: Vec<u32> = a.chain(1).copied().collect();
        assert_eq!(chain, vec![9, 5, 1]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.chain(0).count(), 0);
    }

    #[test]
    fn failed_reserve_hands_element_back() {
        let mut a = filled(4, [1, 5]);
        a.fail_next_reserve = true;
        let (back, _err) = a.push_front(1, 9).unwrap_err();
        assert_eq!(back, 9);
        assert_eq!(a.len(), 2);
        let chain: Vec<u32> = a.chain(1).copied().collect();
        assert_eq!(chain, vec![5, 1]);
        a.push_front(1, 9).unwrap();
        assert_eq!(a.chain(1).next(), Some(&9));
    }

    #[test]
    fn unlink_head_middle_and_tail() {
        for (victim, rest) in [(9, vec![5, 1]), (5, vec![9, 1]), (1, vec![9, 5])] {
            let mut a = filled(4, [1, 5, 9]);
            assert_eq!(a.unlink(1, |x| *x == victim), Some(victim));
            let chain: Vec<u32> = a.chain(1).copied().collect();
            assert_eq!(chain, rest);
            assert_eq!(a.len(), 2);
        }
    }

    #[test]
    fn unlink_missing_is_none() {
        let mut a = filled(4, [1, 5]);
        assert_eq!(a.unlink(1, |x| *x == 13), None);
        assert_eq!(a.unlink(2, |_| true), None);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn find_scans_only_its_chain() {
        let a = filled(4, [1, 2, 5]);
        assert_eq!(a.find(1, |x| *x == 5), Some(&5));
        assert_eq!(a.find(2, |x| *x == 5), None);
    }

    #[test]
    fn relink_places_every_element_by_new_index() {
        let mut a = filled(2, 0..20);
        a.relink(8, modulo).unwrap();
        assert_eq!(a.bucket_count(), 8);
        assert_eq!(a.len(), 20);
        for (bucket, chain) in a.chains().enumerate() {
            for x in chain {
                assert_eq!(modulo(x, 8), bucket);
            }
        }
        let mut all: Vec<u32> = a.iter().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn relink_failure_leaves_array_untouched() {
        let mut a = filled(4, 0..10);
        assert!(a.relink(usize::MAX, modulo).is_err());
        assert_eq!(a.bucket_count(), 4);
        for (bucket, chain) in a.chains().enumerate() {
            for x in chain {
                assert_eq!(modulo(x, 4), bucket);
            }
        }
        assert_eq!(a.iter().count(), 10);
    }

    #[test]
    fn oversized_head_array_is_an_error() {
        assert!(BucketArray::<u32>::with_buckets(usize::MAX).is_err());
    }

    #[test]
    fn drain_empties_chains_and_keeps_buckets() {
        let mut a = filled(4, 0..10);
        let mut out: Vec<u32> = a.drain().collect();
        out.sort_unstable();
        assert_eq!(out, (0..10).collect::<Vec<_>>());
        assert_eq!(a.len(), 0);
        assert_eq!(a.bucket_count(), 4);
        assert!(a.chains().all(|mut c| c.next().is_none()));
    }

    #[test]
    fn iter_reports_exact_size() {
        let a = filled(3, 0..7);
        let mut it = a.iter();
        assert_eq!(it.len(), 7);
        it.next();
        assert_eq!(it.len(), 6);
        assert_eq!(it.count(), 6);
    }
}
