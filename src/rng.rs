// Tiny RNG (no external crate) for the static-noise scene.

/// Xorshift32. Fast and good enough for visual noise.
#[derive(Clone)]
pub struct Rng32 {
    state: u32,
}

impl Rng32 {
    /// Any seed works; zero is nudged because xorshift would stay at zero forever.
    pub fn from_seed(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    /// Seed from the wall clock so each run looks different.
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
            .unwrap_or(0xC0FFEE);
        Self::from_seed(nanos)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in [0, bound). `bound` must be non-zero.
    #[inline]
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng32::from_seed(42);
        let mut b = Rng32::from_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = Rng32::from_seed(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn below_stays_in_bounds() {
        let mut rng = Rng32::from_seed(7);
        assert!((0..1000).all(|_| rng.below(1920) < 1920));
    }
}
