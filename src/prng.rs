//! Deterministic pseudo-random fill support, used by property tests and by
//! callers populating a tensor with sample data.
//!
//! The generator itself is `xoroshiro128+`: the same algorithm that keeps
//! a deterministic game simulation reproducible across platforms keeps
//! this crate's randomized test fixtures reproducible across runs. A full
//! random-number-generation surface (arbitrary distributions, reseeding
//! policies) is out of scope; this module only provides what
//! [`crate::scalar::FixedValue::from_real`]-based fixtures need: uniform
//! integers and, from them, uniform and roughly-normal reals.

/// Stateful `xoroshiro128+` pseudo-random number generator for deterministic
/// fixtures.
///
/// Not cryptographically secure; matching seeds yield identical sequences
/// across supported platforms.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

impl Prng {
    /// Constructs a PRNG from two 64-bit seeds.
    #[must_use]
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        let mut state = [seed0, seed1];
        if state[0] == 0 && state[1] == 0 {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    /// Constructs a PRNG from a single 64-bit seed via `SplitMix64`
    /// expansion.
    #[must_use]
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let mut state = [splitmix64(&mut sm_state), splitmix64(&mut sm_state)];
        if state[0] == 0 && state[1] == 0 {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }

    /// Returns the next float in `[0, 1)`.
    #[must_use]
    pub fn next_f64(&mut self) -> f64 {
        let raw = self.next_u64();
        (raw >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns the next integer in the inclusive range `[min, max]`, via
    /// rejection sampling to avoid modulo bias.
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "invalid range: {min}..={max}");
        let span = (max - min) as u64 + 1;
        if span == 1 {
            return min;
        }
        let value = if span.is_power_of_two() {
            self.next_u64() & (span - 1)
        } else {
            let bound = u64::MAX - u64::MAX % span;
            loop {
                let candidate = self.next_u64();
                if candidate < bound {
                    break candidate % span;
                }
            }
        };
        #[allow(clippy::cast_possible_wrap)]
        let offset = value as i64 + min;
        offset
    }

    /// A real number uniformly distributed on `[lo, hi)`.
    #[must_use]
    pub fn next_uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// A real number approximately normally distributed, via a 12-sample
    /// Irwin-Hall approximation (cheap, seed-deterministic, good enough for
    /// generating varied test fixtures rather than statistically rigorous
    /// sampling).
    #[must_use]
    pub fn next_normal(&mut self, mean: f64, stddev: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.next_f64()).sum();
        mean + (sum - 6.0) * stddev
    }
}
