use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter namespacing list-query cache keys.
///
/// Every successful mutation bumps it once, so list keys built before the
/// bump are never addressed again.
#[derive(Debug, Default)]
pub struct ListGeneration(AtomicU64);

impl ListGeneration {
    /// Starts at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Current value.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Increments by one and returns the new value.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_starts_at_zero() {
        let generation = ListGeneration::new();
        assert_eq!(generation.current(), 0);
        assert_eq!(generation.bump(), 1);
        assert_eq!(generation.current(), 1);
    }

    #[test]
    fn test_concurrent_bumps_are_distinct() {
        let generation = Arc::new(ListGeneration::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generation = Arc::clone(&generation);
                std::thread::spawn(move || (0..250).map(|_| generation.bump()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate generation {}", value);
            }
        }
        assert_eq!(seen.len(), 2000);
        assert_eq!(generation.current(), 2000);
    }
}
