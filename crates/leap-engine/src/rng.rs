//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic and injectable, so cosmetic randomness can be replayed in tests.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1].
    pub fn unit_f32(&mut self) -> f32 {
        // 24 bits of mantissa, inclusive of both ends.
        (self.next_u64() >> 40) as f32 / ((1u64 << 24) - 1) as f32
    }

    /// Uniform float in the closed range [lo, hi].
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        (lo + self.unit_f32() * (hi - lo)).clamp(lo.min(hi), lo.max(hi))
    }
}
