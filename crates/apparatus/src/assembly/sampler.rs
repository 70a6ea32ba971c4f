use rand::Rng;

use super::types::Direction;

/// Weighted direction policy, selected by how many directions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionSampler {
    /// North or South, 50/50. Used for unpaired parts on the symmetry axis.
    Vertical,
    /// North 25%, East 50%, South 25%. West is only reached by mirroring East.
    Symmetric,
    /// All four directions, 25% each.
    Any,
}

const VERTICAL: [(Direction, f64); 2] = [(Direction::North, 0.5), (Direction::South, 0.5)];
const SYMMETRIC: [(Direction, f64); 3] = [
    (Direction::North, 0.25),
    (Direction::East, 0.5),
    (Direction::South, 0.25),
];
const ANY: [(Direction, f64); 4] = [
    (Direction::North, 0.25),
    (Direction::East, 0.25),
    (Direction::South, 0.25),
    (Direction::West, 0.25),
];

impl DirectionSampler {
    /// Policy for a direction count of 2, 3 or 4. Any other count is a programming error.
    pub fn with_count(count: usize) -> Self {
        match count {
            2 => Self::Vertical,
            3 => Self::Symmetric,
            4 => Self::Any,
            other => panic!("no direction policy for {other} directions"),
        }
    }

    /// Exact probability of each direction. Weights sum to 1.
    pub fn weights(self) -> &'static [(Direction, f64)] {
        match self {
            Self::Vertical => &VERTICAL,
            Self::Symmetric => &SYMMETRIC,
            Self::Any => &ANY,
        }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        let table = self.weights();
        let mut roll: f64 = rng.random();
        for &(dir, weight) in table {
            if roll < weight {
                return dir;
            }
            roll -= weight;
        }
        // Rounding can leave a sliver past the last bucket.
        table[table.len() - 1].0
    }
}

/// Draw a direction from the policy for `count` directions.
pub fn random_dir<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Direction {
    DirectionSampler::with_count(count).sample(rng)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const SAMPLES: usize = 10_000;
    // Roughly four standard deviations at p = 0.25 with 10k draws.
    const TOLERANCE: f64 = 0.02;

    fn frequencies(count: usize, seed: u64) -> HashMap<Direction, f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut hits: HashMap<Direction, usize> = HashMap::new();
        for _ in 0..SAMPLES {
            *hits.entry(random_dir(count, &mut rng)).or_default() += 1;
        }
        hits.into_iter()
            .map(|(dir, n)| (dir, n as f64 / SAMPLES as f64))
            .collect()
    }

    fn assert_close(freq: &HashMap<Direction, f64>, dir: Direction, expected: f64) {
        let actual = freq.get(&dir).copied().unwrap_or(0.0);
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "{dir}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn weights_sum_to_one() {
        for sampler in [
            DirectionSampler::Vertical,
            DirectionSampler::Symmetric,
            DirectionSampler::Any,
        ] {
            let total: f64 = sampler.weights().iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn two_directions_split_north_south() {
        let freq = frequencies(2, 11);
        assert_eq!(freq.len(), 2);
        assert_close(&freq, Direction::North, 0.5);
        assert_close(&freq, Direction::South, 0.5);
    }

    #[test]
    fn three_directions_favor_east() {
        let freq = frequencies(3, 12);
        assert_eq!(freq.len(), 3);
        assert!(!freq.contains_key(&Direction::West));
        assert_close(&freq, Direction::East, 0.5);
        assert_close(&freq, Direction::North, 0.25);
        assert_close(&freq, Direction::South, 0.25);
    }

    #[test]
    fn four_directions_are_uniform() {
        let freq = frequencies(4, 13);
        for dir in Direction::ALL {
            assert_close(&freq, dir, 0.25);
        }
    }

    #[test]
    #[should_panic(expected = "no direction policy")]
    fn unsupported_count_panics() {
        DirectionSampler::with_count(5);
    }
}
