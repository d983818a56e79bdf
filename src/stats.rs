//! Read-only occupancy report.

/// Snapshot of a set's bookkeeping and chain shape, from
/// [`ChainedSet::stats`](crate::ChainedSet::stats).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SetStats {
    pub len: usize,
    pub capacity: usize,
    /// Incrementally maintained load (`len / capacity`, up to rounding).
    pub load: f64,
    pub load_factor: f64,
    /// Buckets with a non-empty chain.
    pub occupied_buckets: usize,
    pub longest_chain: usize,
    /// Completed growths since construction.
    pub resizes: u64,
}

impl SetStats {
    /// Mean chain length over occupied buckets; `0.0` for an empty set.
    pub fn mean_chain(&self) -> f64 {
        if self.occupied_buckets == 0 {
            0.0
        } else {
            self.len as f64 / self.occupied_buckets as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SetStats;

    #[test]
    fn mean_chain_handles_empty() {
        assert_eq!(SetStats::default().mean_chain(), 0.0);
        let s = SetStats {
            len: 6,
            occupied_buckets: 4,
            ..SetStats::default()
        };
        assert_eq!(s.mean_chain(), 1.5);
    }
}
