//! Debug-only reentrancy detection for structural sections.
//!
//! Bucket addressing and equivalence are caller code that runs while chains
//! are being walked or relinked. If such a callback reaches back into the
//! same set (through a raw pointer or interior mutability) the chains may
//! be observed half-linked. Debug builds panic on the nested entry; release
//! builds compile the check away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Embedded in a set; guard structural sections with
/// `let _g = self.reentrancy.enter();`.
#[derive(Debug)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // !Sync in every build profile, Send is kept so callers can move a set
    // behind an external mutex.
    _not_sync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _not_sync: PhantomData,
        }
    }

    /// Mark a structural section. Debug builds panic if one is already open.
    #[inline]
    pub fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: set callback re-entered the set"
            );
            ReentrancyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ReentrancyGuard { _z: PhantomData }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// Closes the section on drop.
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
