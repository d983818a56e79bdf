//! Error types for fallible set operations.
//!
//! Allocation of bulk arrays is surfaced as [`SetError`]. A missing element
//! or a rejected insert is a normal outcome reported through `bool` or
//! `Option`; `insert` is the one entry point that hands a rejected element
//! back to the caller.

use core::fmt;
use std::collections::TryReserveError;

/// Failures reported by [`ChainedSet`](crate::ChainedSet) construction and export.
#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("failed to allocate {what} of {requested} slots")]
    AllocationFailure {
        what: &'static str,
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

impl SetError {
    pub(crate) fn allocation(what: &'static str, requested: usize, source: TryReserveError) -> Self {
        SetError::AllocationFailure {
            what,
            requested,
            source,
        }
    }
}

pub type Result<T> = core::result::Result<T, SetError>;

/// Returned by [`ChainedSet::insert`](crate::ChainedSet::insert) when the
/// element was not adopted. Carries the rejected element so ownership returns
/// to the caller.
pub enum InsertError<T> {
    /// An equivalent element is already stored.
    Duplicate(T),
    /// No room could be reserved for the element's link. The set is unchanged.
    AllocationFailure(T),
}

impl<T> InsertError<T> {
    /// Recover the element that was not adopted.
    pub fn into_element(self) -> T {
        match self {
            InsertError::Duplicate(element) | InsertError::AllocationFailure(element) => element,
        }
    }
}

impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Duplicate(_) => f.write_str("Duplicate(..)"),
            InsertError::AllocationFailure(_) => f.write_str("AllocationFailure(..)"),
        }
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::Duplicate(_) => f.write_str("equivalent element already present"),
            InsertError::AllocationFailure(_) => f.write_str("failed to allocate a link for the element"),
        }
    }
}

impl<T> std::error::Error for InsertError<T> {}
