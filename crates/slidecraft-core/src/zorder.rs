//! Stacking order for component elements.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of ever-increasing z-index values.
pub trait ZIndexSource {
    /// Consume and return the next z-index.
    fn next(&self) -> u64;
}

impl<T: ZIndexSource + ?Sized> ZIndexSource for &T {
    fn next(&self) -> u64 {
        (**self).next()
    }
}

/// Monotonic z-index counter. Never resets.
#[derive(Debug, Default)]
pub struct ZTracker {
    counter: AtomicU64,
}

impl ZTracker {
    /// Create a counter whose first value is 1.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter whose first value is `last + 1`.
    pub const fn starting_at(last: u64) -> Self {
        Self {
            counter: AtomicU64::new(last),
        }
    }

    /// Process-wide counter shared by every slide.
    pub fn global() -> &'static ZTracker {
        static GLOBAL: ZTracker = ZTracker::new();
        &GLOBAL
    }

    /// Last value handed out.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl ZIndexSource for ZTracker {
    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_is_monotonic() {
        let tracker = ZTracker::new();
        let values: Vec<u64> = (0..5).map(|_| tracker.next()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(tracker.current(), 5);
    }

    #[test]
    fn test_global_is_shared() {
        let a = ZTracker::global().next();
        let b = (&ZTracker::global()).next();
        assert!(b > a);
    }
}
