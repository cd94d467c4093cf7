use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Mixed into the seed so the bulk stream never mirrors the scalar one.
const BULK_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// The single randomness source of a world.
///
/// Holds two independent streams derived from one seed: a scalar stream for
/// per-agent draws, shuffles and range picks, and a bulk stream for
/// vectorized sampling during initialization. Keeping them apart means the
/// number of bulk samples taken never shifts the scalar sequence.
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    scalar: StdRng,
    bulk: StdRng,
}

impl SimRng {
    /// Seed both streams.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            scalar: StdRng::seed_from_u64(seed),
            bulk: StdRng::seed_from_u64(seed ^ BULK_STREAM_SALT),
        }
    }

    /// Replace both streams at once; no state from the old seed survives.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// The seed both streams were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Direct access to the scalar stream.
    pub fn scalar(&mut self) -> &mut StdRng {
        &mut self.scalar
    }

    /// Direct access to the bulk stream.
    pub fn bulk(&mut self) -> &mut StdRng {
        &mut self.bulk
    }

    // -----------------------------------------------------------------------
    // Scalar draws
    // -----------------------------------------------------------------------

    /// Uniform float in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.scalar.random::<f64>()
    }

    /// One Bernoulli trial: `true` with probability `p`.
    ///
    /// Always consumes exactly one draw, so the stream position does not
    /// depend on `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Uniform integer in `0..n`. `n` must be positive.
    pub fn below(&mut self, n: u32) -> u32 {
        self.scalar.random_range(0..n)
    }

    /// Uniform integer in `lo..=hi`.
    pub fn between(&mut self, lo: i64, hi: i64) -> i64 {
        self.scalar.random_range(lo..=hi)
    }

    /// Uniform float in `[lo, hi)`, or `lo` when the interval is empty.
    ///
    /// Consumes one draw either way.
    pub fn uniform_between(&mut self, lo: f64, hi: f64) -> f64 {
        let u = self.uniform();
        if hi > lo { lo + u * (hi - lo) } else { lo }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.scalar);
    }

    // -----------------------------------------------------------------------
    // Bulk draws
    // -----------------------------------------------------------------------

    /// `count` samples from a normal distribution, drawn from the bulk
    /// stream. A zero (or negative) spread returns the mean without drawing.
    pub fn normal_samples(&mut self, mean: f64, std_dev: f64, count: usize) -> Vec<f64> {
        if std_dev <= 0.0 {
            return vec![mean; count];
        }
        (0..count)
            .map(|_| {
                // Box-Muller: the cosine branch of each pair.
                let u1 = self.bulk.random::<f64>().max(f64::MIN_POSITIVE);
                let u2 = self.bulk.random::<f64>();
                let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
                mean + z * std_dev
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
        }
        assert_eq!(a.normal_samples(0.0, 1.0, 10), b.normal_samples(0.0, 1.0, 10));
    }

    #[test]
    fn reseed_restores_fresh_streams() {
        let mut rng = SimRng::new(1);
        let first: Vec<f64> = (0..5).map(|_| rng.uniform()).collect();
        let _ = rng.normal_samples(3.0, 1.0, 4);

        rng.reseed(1);
        let again: Vec<f64> = (0..5).map(|_| rng.uniform()).collect();
        assert_eq!(first, again);
        assert_eq!(rng.seed(), 1);
    }

    #[test]
    fn bulk_draws_leave_scalar_stream_alone() {
        let mut a = SimRng::new(11);
        let mut b = SimRng::new(11);
        let _ = a.normal_samples(0.0, 1.0, 100);
        assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimRng::new(3);
        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
        }
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = SimRng::new(5);
        for _ in 0..200 {
            assert!(rng.below(4) < 4);
            let v = rng.between(-1, 1);
            assert!((-1..=1).contains(&v));
            let f = rng.uniform_between(0.25, 0.5);
            assert!((0.25..0.5).contains(&f));
        }
        assert_eq!(rng.uniform_between(0.3, 0.3), 0.3);
    }

    #[test]
    fn empty_interval_still_consumes_a_draw() {
        let mut a = SimRng::new(21);
        let mut b = SimRng::new(21);
        assert_eq!(a.uniform_between(0.0, 0.0), 0.0);
        b.uniform();
        assert_eq!(a.uniform().to_bits(), b.uniform().to_bits());
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = SimRng::new(9);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn normal_samples_center_on_mean() {
        let mut rng = SimRng::new(2024);
        let samples = rng.normal_samples(25.0, 8.0, 5000);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 25.0).abs() < 0.5, "mean was {mean}");
    }

    #[test]
    fn zero_spread_returns_mean() {
        let mut rng = SimRng::new(0);
        assert_eq!(rng.normal_samples(4.0, 0.0, 3), vec![4.0, 4.0, 4.0]);
    }
}
