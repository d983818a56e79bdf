//! chained-set: a single-threaded hash set with separately chained buckets,
//! throttled load-factor growth, and caller-supplied element callbacks.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the chain mechanics and the growth policy in separate
//!   layers so each can be checked on its own.
//! - Layers:
//!   - BucketArray<T>: chain heads plus a slotmap arena of links. Knows how
//!     to find, prepend, unlink, drain, and relink into a larger head
//!     array. Never decides when to grow.
//!   - ChainedSet<T, H, E, R>: public type. Addresses elements to buckets,
//!     keeps the running load, throttles growth checks, and passes
//!     relinquished elements to the release callback.
//!   - Snapshot<'a, T>: flat array of element references for export and
//!     iteration.
//!
//! Callbacks
//! - `BucketHasher<T>`: `(element, bucket_count) -> index`. Out-of-range
//!   indices are reduced modulo the bucket count.
//! - `Equivalence<T>`: must agree with the hasher; equivalent elements have
//!   to land in the same bucket for every bucket count.
//! - `Release<T>`: receives each element exactly once on remove, clear, or
//!   drop. Rejected duplicates and elements returned by `take` never reach
//!   it.
//! - Closures implement all three, so ad hoc strategies need no newtypes.
//!
//! Growth
//! - Load is accumulated in steps of `1 / capacity` rather than recomputed.
//! - An insert checks the load only after more than `check_interval`
//!   mutations (default 100) since the previous check. Above the load
//!   factor the bucket count doubles, clamped to the ceiling (2^27 at
//!   most), and every link is relinked in place: no element is moved,
//!   cloned, or dropped.
//! - Growth is best effort. At the ceiling or when the new head array
//!   cannot be allocated the set keeps its buckets and chains get longer.
//!
//! Constraints
//! - Single-threaded: the set is `Send` when its parts are, never `Sync`.
//!   Wrap it in a mutex for shared access.
//! - Reentrancy: a debug-only guard panics if a hash or equivalence
//!   callback re-enters the set it is running for.
//! - Snapshots borrow the set; mutation is impossible while one is alive.

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

mod bucket_array;
pub mod builder;
pub mod callbacks;
pub mod chained_set;
mod chained_set_proptest;
pub mod config;
pub mod error;
mod reentrancy;
pub mod set;
pub mod snapshot;
pub mod stats;

// Public surface
pub use bucket_array::Iter;
pub use builder::SetBuilder;
pub use callbacks::{BucketHasher, Discard, EqEquivalence, Equivalence, Release, StdBucketHasher};
pub use chained_set::ChainedSet;
pub use config::{SetConfig, DEFAULT_CAPACITY, DEFAULT_CHECK_INTERVAL, DEFAULT_LOAD_FACTOR, MAX_CAPACITY};
pub use error::{InsertError, Result, SetError};
pub use set::Set;
pub use snapshot::Snapshot;
pub use stats::SetStats;
