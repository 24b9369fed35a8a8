pub mod rand {
    /// Seed used when the caller passes 0, which would lock xorshift at 0.
    const FALLBACK_SEED: u64 = 88172645463325252;

    /// Xorshift64 generator. Small, seedable and cheap to clone, so every
    /// Dense layer can own the seed that reproduces its initial weights.
    #[derive(Clone, Debug)]
    pub struct XorShift64 {
        state: u64,
    }

    impl XorShift64 {
        pub fn new(seed: u64) -> Self {
            Self {
                state: if seed == 0 { FALLBACK_SEED } else { seed },
            }
        }

        pub fn next_u64(&mut self) -> u64 {
            let mut x = self.state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.state = x;
            x
        }

        /// Float in [0, 1) with 53 bits of randomness.
        pub fn gen_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) * (1.0 / (1u64 << 53) as f64)
        }

        /// Float drawn uniformly from [low, high).
        pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
            low + (high - low) * self.gen_f64()
        }

        pub fn gen_range(&mut self, start: usize, end: usize) -> usize {
            if start >= end {
                return start;
            }
            let range = (end - start) as u64;
            // Simple modulo, slight bias possible but fine for shuffling
            start + (self.next_u64() % range) as usize
        }

        // Fisher-Yates shuffle
        pub fn shuffle<T>(&mut self, slice: &mut [T]) {
            for i in (1..slice.len()).rev() {
                let j = self.gen_range(0, i + 1);
                slice.swap(i, j);
            }
        }
    }

    /// Seed taken from the OS. Falls back to the clock if the OS source is
    /// unavailable.
    pub fn entropy_seed() -> u64 {
        let mut seed_buf = [0u8; 8];
        match getrandom::getrandom(&mut seed_buf) {
            Ok(()) => u64::from_le_bytes(seed_buf),
            Err(_) => std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(FALLBACK_SEED),
        }
    }

}
