use super::*;
use crate::assembly::apparatus::Apparatus;
use crate::assembly::neighborhood::expand;
use crate::assembly::types::{Direction, PartId};

fn ids(raw: &[usize]) -> Vec<PartId> {
    raw.iter().copied().map(PartId).collect()
}

fn sorted(mut members: Vec<PartId>) -> Vec<PartId> {
    members.sort();
    members
}

#[test]
fn east_chain_crosses_the_center_part() {
    // A -> C -> B along row 0.
    let apparatus = Apparatus::new(mirrored_layout());
    let group = expand(&[PartId(0)], &apparatus, Direction::East);
    assert_eq!(group, ids(&[0, 4, 1]));
}

#[test]
fn south_expansion_fans_out() {
    // C pushes both F and G, which push H and I.
    let apparatus = Apparatus::new(mirrored_layout());
    let group = expand(&[PartId(4)], &apparatus, Direction::South);
    assert_eq!(sorted(group), ids(&[4, 5, 6, 7, 8]));
}

#[test]
fn north_expansion_follows_partial_edges() {
    // H -> F -> {D, C}, D -> A.
    let apparatus = Apparatus::new(mirrored_layout());
    let group = expand(&[PartId(7)], &apparatus, Direction::North);
    assert_eq!(sorted(group), ids(&[0, 2, 4, 5, 7]));
}

#[test]
fn seed_on_the_boundary_stays_alone() {
    let apparatus = Apparatus::new(mirrored_layout());
    let group = expand(&[PartId(0), PartId(1)], &apparatus, Direction::North);
    assert_eq!(group, ids(&[0, 1]));
}

#[test]
fn seed_order_is_preserved() {
    let apparatus = Apparatus::new(mirrored_layout());
    let group = expand(&[PartId(8), PartId(7)], &apparatus, Direction::North);
    assert_eq!(&group[..2], &ids(&[8, 7])[..]);
}

#[test]
fn duplicate_seed_members_collapse() {
    let apparatus = Apparatus::new(mirrored_layout());
    let group = expand(&[PartId(2), PartId(2)], &apparatus, Direction::West);
    assert_eq!(group, ids(&[2]));
}

#[test]
fn expansion_is_idempotent_on_layout() {
    let apparatus = Apparatus::new(mirrored_layout());
    for dir in Direction::ALL {
        for seed in apparatus.ids() {
            let once = expand(&[seed], &apparatus, dir);
            let twice = expand(&once, &apparatus, dir);
            assert_eq!(once, twice, "seed {seed:?} towards {dir}");
        }
    }
}

#[test]
fn expansion_contains_its_seed() {
    let apparatus = Apparatus::new(mirrored_layout());
    for dir in Direction::ALL {
        let seed = ids(&[2, 6]);
        let group = expand(&seed, &apparatus, dir);
        assert!(seed.iter().all(|s| group.contains(s)));
    }
}

#[test]
fn members_never_share_a_box() {
    // Two parts stacked on the same cell still count once.
    let apparatus = Apparatus::new(vec![
        part(1, 0, 0, 1, 1),
        part(2, 0, 0, 1, 1),
        part(3, 1, 0, 1, 1),
    ]);
    let group = expand(&[PartId(0), PartId(1)], &apparatus, Direction::East);
    assert_eq!(group, ids(&[0, 2]));
}
