pub mod completion;
pub mod config;
pub mod export;
pub mod simulate;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Reproducible RNG when a seed is given, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
