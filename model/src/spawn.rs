use rand::seq::SliceRandom;
use rand::Rng;

/// Value distribution of freshly spawned tiles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SpawnPolicy {
    /// 2 or 4 with equal probability.
    Uniform,
    /// 2 with probability 0.9, 4 with probability 0.1.
    Classic,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy::Uniform
    }
}

const SPAWN_VALUES: [u32; 2] = [2, 4];

impl SpawnPolicy {
    pub fn pick_value<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        match self {
            SpawnPolicy::Uniform => *SPAWN_VALUES.choose(rng).unwrap_or(&2),
            SpawnPolicy::Classic => {
                if rng.gen_bool(0.9) {
                    2
                } else {
                    4
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SpawnPolicy;
    use rand::{rngs::StdRng, SeedableRng};

    fn histogram(policy: SpawnPolicy) -> (usize, usize) {
        let mut rng = StdRng::seed_from_u64(2048);
        let mut twos = 0;
        let mut fours = 0;
        for _ in 0..10_000 {
            match policy.pick_value(&mut rng) {
                2 => twos += 1,
                4 => fours += 1,
                v => panic!("unexpected spawn value {}", v),
            }
        }
        (twos, fours)
    }

    #[test]
    fn uniform_is_balanced() {
        let (twos, fours) = histogram(SpawnPolicy::Uniform);
        assert!(twos > 4_500 && fours > 4_500, "{} / {}", twos, fours);
    }

    #[test]
    fn classic_prefers_two() {
        let (twos, fours) = histogram(SpawnPolicy::Classic);
        assert!(twos > 8_500, "{} / {}", twos, fours);
        assert!(fours > 500, "{} / {}", twos, fours);
    }

    #[test]
    fn default_is_uniform() {
        assert_eq!(SpawnPolicy::default(), SpawnPolicy::Uniform);
    }
}
