use super::types::{Bounds, Direction};

/// Whether two boxes have identical corners.
pub fn equals(a: &Bounds, b: &Bounds) -> bool {
    a.x1 == b.x1 && a.y1 == b.y1 && a.x2 == b.x2 && a.y2 == b.y2
}

/// Whether `b` sits directly against the side of `a` facing `dir`.
///
/// The facing edges must coincide and the spans on the perpendicular axis must overlap
/// strictly; boxes touching only at a corner are not neighbors, and a box is never its own
/// neighbor.
pub fn is_neighbor(a: &Bounds, b: &Bounds, dir: Direction) -> bool {
    if equals(a, b) {
        return false;
    }
    match dir {
        Direction::North => b.y2 == a.y1 && b.x1 < a.x2 && b.x2 > a.x1,
        Direction::East => b.x1 == a.x2 && b.y1 < a.y2 && b.y2 > a.y1,
        Direction::South => b.y1 == a.y2 && b.x1 < a.x2 && b.x2 > a.x1,
        Direction::West => b.x2 == a.x1 && b.y1 < a.y2 && b.y2 > a.y1,
    }
}
