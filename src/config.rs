//! Construction parameters and their defaults.

/// Bucket count used when no initial capacity is requested.
pub const DEFAULT_CAPACITY: usize = 16;
/// Hard ceiling on the bucket count (2^27).
pub const MAX_CAPACITY: usize = 1 << 27;
/// Load above which growth is attempted.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
/// Mutations allowed between two load checks.
pub const DEFAULT_CHECK_INTERVAL: usize = 100;

// Load factors at or below this are treated as unset.
const MIN_LOAD_FACTOR: f64 = 0.000_001;

/// Tuning knobs for a [`ChainedSet`](crate::ChainedSet).
///
/// Out-of-range values are not errors: [`SetConfig::normalized`] replaces
/// them with defaults or clamps them, and every constructor goes through it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetConfig {
    /// Initial bucket count. `0` selects [`DEFAULT_CAPACITY`].
    pub initial_capacity: usize,
    /// Growth threshold. Values `<= 1e-6` (and NaN) select
    /// [`DEFAULT_LOAD_FACTOR`].
    pub load_factor: f64,
    /// A load check runs on insert once more than this many mutations
    /// happened since the previous check. `0` checks on every insert.
    pub check_interval: usize,
    /// Growth ceiling. `0` or anything above [`MAX_CAPACITY`] selects
    /// [`MAX_CAPACITY`].
    pub max_capacity: usize,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            check_interval: DEFAULT_CHECK_INTERVAL,
            max_capacity: MAX_CAPACITY,
        }
    }
}

impl SetConfig {
    pub fn new(initial_capacity: usize, load_factor: f64) -> Self {
        Self {
            initial_capacity,
            load_factor,
            ..Self::default()
        }
    }

    pub fn with_check_interval(mut self, check_interval: usize) -> Self {
        self.check_interval = check_interval;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Apply the fallback and clamping rules.
    pub fn normalized(self) -> Self {
        let max_capacity = if self.max_capacity == 0 || self.max_capacity > MAX_CAPACITY {
            MAX_CAPACITY
        } else {
            self.max_capacity
        };
        let initial_capacity = if self.initial_capacity == 0 {
            log_debug!("initial capacity unset, using {}", DEFAULT_CAPACITY);
            DEFAULT_CAPACITY
        } else {
            self.initial_capacity
        }
        .min(max_capacity);
        // `!(x > min)` also catches NaN.
        let load_factor = if !(self.load_factor > MIN_LOAD_FACTOR) {
            log_debug!(
                "load factor {} out of range, using {}",
                self.load_factor,
                DEFAULT_LOAD_FACTOR
            );
            DEFAULT_LOAD_FACTOR
        } else {
            self.load_factor
        };
        Self {
            initial_capacity,
            load_factor,
            check_interval: self.check_interval,
            max_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_normalization() {
        assert_eq!(SetConfig::default().normalized(), SetConfig::default());
    }

    #[test]
    fn zero_capacity_and_tiny_load_factor_fall_back() {
        let c = SetConfig::new(0, 0.000_000_1).normalized();
        assert_eq!(c.initial_capacity, DEFAULT_CAPACITY);
        assert_eq!(c.load_factor, DEFAULT_LOAD_FACTOR);

        let c = SetConfig::new(8, -1.0).normalized();
        assert_eq!(c.initial_capacity, 8);
        assert_eq!(c.load_factor, DEFAULT_LOAD_FACTOR);

        let c = SetConfig::new(8, f64::NAN).normalized();
        assert_eq!(c.load_factor, DEFAULT_LOAD_FACTOR);
    }

    #[test]
    fn capacity_is_clamped_to_ceiling() {
        let c = SetConfig::new(MAX_CAPACITY * 4, 0.5).normalized();
        assert_eq!(c.initial_capacity, MAX_CAPACITY);
        assert_eq!(c.load_factor, 0.5);

        let c = SetConfig::new(64, 0.5).with_max_capacity(32).normalized();
        assert_eq!(c.initial_capacity, 32);
        assert_eq!(c.max_capacity, 32);

        let c = SetConfig::default().with_max_capacity(0).normalized();
        assert_eq!(c.max_capacity, MAX_CAPACITY);
        let c = SetConfig::default().with_max_capacity(usize::MAX).normalized();
        assert_eq!(c.max_capacity, MAX_CAPACITY);
    }

    #[test]
    fn check_interval_passes_through() {
        let c = SetConfig::default().with_check_interval(0).normalized();
        assert_eq!(c.check_interval, 0);
    }
}
