use core::time::Duration;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Uniform randomness handed to every engine.
///
/// `Seeded` sources replay the same sequence for the same seed, which is what the tests and the
/// `--seed` page option rely on. `System` sources are seeded from host entropy (in the browser,
/// `Math.random`), so the crate never reaches for an OS generator itself.
#[derive(Clone, Debug)]
pub enum RandomSource {
    Seeded { seed: u64, rng: SmallRng },
    System(SmallRng),
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn system(entropy: u64) -> Self {
        Self::System(SmallRng::seed_from_u64(entropy))
    }

    pub const fn seed(&self) -> Option<u64> {
        match self {
            Self::Seeded { seed, .. } => Some(*seed),
            Self::System(_) => None,
        }
    }

    fn rng(&mut self) -> &mut SmallRng {
        match self {
            Self::Seeded { rng, .. } => rng,
            Self::System(rng) => rng,
        }
    }

    /// Uniform index in `0..upper`. `upper` must be non-zero.
    pub fn below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0, "empty range");
        self.rng().random_range(0..upper)
    }

    pub fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.rng().random_range(low..=high)
    }

    /// Uniform duration in `[low, high]` at millisecond resolution.
    pub fn duration_between(&mut self, low: Duration, high: Duration) -> Duration {
        let low_ms = low.as_millis() as u64;
        let high_ms = high.as_millis() as u64;
        if low_ms >= high_ms {
            return low;
        }
        Duration::from_millis(self.rng().random_range(low_ms..=high_ms))
    }

    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            None
        } else {
            Some(items[self.below(items.len())])
        }
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(self.rng());
    }

    /// Derives an independent source of the same variant, so one seed can feed several engines.
    pub fn fork(&mut self) -> Self {
        let seed: u64 = self.rng().random();
        match self {
            Self::Seeded { .. } => Self::seeded(seed),
            Self::System(_) => Self::system(seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_same_sequence() {
        let mut a = RandomSource::seeded(7);
        let mut b = RandomSource::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.below(100), b.below(100));
        }
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut source = RandomSource::system(12345);
        for _ in 0..500 {
            let value = source.range_inclusive(1, 100);
            assert!((1..=100).contains(&value));

            let delay =
                source.duration_between(Duration::from_millis(1100), Duration::from_millis(2200));
            assert!(delay >= Duration::from_millis(1100));
            assert!(delay <= Duration::from_millis(2200));
        }
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut source = RandomSource::seeded(3);
        let mut items = [1, 2, 3, 4, 5, 6, 7, 8];
        source.shuffle(&mut items);
        items.sort_unstable();
        assert_eq!(items, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn fork_keeps_variant() {
        let mut seeded = RandomSource::seeded(1);
        assert!(seeded.fork().seed().is_some());

        let mut system = RandomSource::system(1);
        assert!(system.fork().seed().is_none());
    }

    #[test]
    fn choose_on_empty_slice_is_none() {
        let mut source = RandomSource::seeded(0);
        let empty: [u8; 0] = [];
        assert_eq!(source.choose(&empty), None);
    }
}
