mod neighborhood;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::types::Part;

/// Helper to create an uncolored part.
fn part(id: u32, x: i32, y: i32, w: i32, h: i32) -> Part {
    Part::new(id, x, y, w, h, None)
}

/// Deterministic RNG for a test.
fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A small mirrored layout on a 6x4 grid.
///
/// ```text
///   0 1 2 3 4 5
/// 0 A A C C B B     A/B pair (id 1), C centered (id 3)
/// 1 D . C C . E     D/E pair (id 2)
/// 2 F F F G G G     F/G pair (id 4)
/// 3 . H . . I .     H/I pair (id 5)
/// ```
fn mirrored_layout() -> Vec<Part> {
    vec![
        part(1, 0, 0, 2, 1),
        part(1, 4, 0, 2, 1),
        part(2, 0, 1, 1, 1),
        part(2, 5, 1, 1, 1),
        part(3, 2, 0, 2, 2),
        part(4, 0, 2, 3, 1),
        part(4, 3, 2, 3, 1),
        part(5, 1, 3, 1, 1),
        part(5, 4, 3, 1, 1),
    ]
}
