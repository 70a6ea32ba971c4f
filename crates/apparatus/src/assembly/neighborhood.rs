use super::apparatus::Apparatus;
use super::geometry::{equals, is_neighbor};
use super::types::{Direction, PartId};

/// Grow `seed` into the maximal group of parts reachable through `dir`-adjacency.
///
/// The result starts with the (deduplicated) seed in its given order, followed by reached
/// parts in discovery order. Membership is decided by bounding-box equality, so no two
/// members ever share the same box.
pub fn expand(seed: &[PartId], apparatus: &Apparatus, dir: Direction) -> Vec<PartId> {
    let mut members: Vec<PartId> = Vec::with_capacity(seed.len());
    for &id in seed {
        push_unique(&mut members, id, apparatus);
    }

    // Only parts added in the previous round can contribute new neighbors.
    let mut frontier = 0;
    while frontier < members.len() {
        let round_end = members.len();
        for i in frontier..round_end {
            let origin = apparatus.part(members[i]).bounds;
            for candidate in apparatus.ids() {
                if is_neighbor(&origin, &apparatus.part(candidate).bounds, dir) {
                    push_unique(&mut members, candidate, apparatus);
                }
            }
        }
        frontier = round_end;
    }
    members
}

fn push_unique(members: &mut Vec<PartId>, id: PartId, apparatus: &Apparatus) {
    let bounds = apparatus.part(id).bounds;
    if !members
        .iter()
        .any(|&m| equals(&apparatus.part(m).bounds, &bounds))
    {
        members.push(id);
    }
}
