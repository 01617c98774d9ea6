use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random source for one game session. Holding the seed makes a whole
/// game reproducible tick for tick.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random<T>(&mut self) -> T
    where
        rand::distr::StandardUniform: rand::distr::Distribution<T>,
    {
        self.rng.random()
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(99);
        let mut b = SessionRng::new(99);
        for _ in 0..32 {
            assert_eq!(
                a.random_range(0..1000usize),
                b.random_range(0..1000usize)
            );
        }
    }

    #[test]
    fn test_seed_is_kept() {
        let rng = SessionRng::new(7);
        assert_eq!(rng.seed(), 7);
    }
}
