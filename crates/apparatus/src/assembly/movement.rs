use super::apparatus::Apparatus;
use super::types::{Direction, Part, PartId};

/// Move `part` one grid unit in `dir` and record its new top-left corner at `frame`.
///
/// When the history is shorter than `frame`, the gap is filled with the position the part
/// held before this move.
pub fn shift(part: &mut Part, dir: Direction, frame: usize) {
    let before = part.position();
    part.bounds = part.bounds.stepped(dir);
    if part.path.len() <= frame {
        part.path.resize(frame + 1, before);
    }
    part.path[frame] = part.position();
}

/// Shift every member of a neighborhood.
pub fn shift_all(apparatus: &mut Apparatus, members: &[PartId], dir: Direction, frame: usize) {
    for &id in members {
        shift(apparatus.part_mut(id), dir, frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::types::{Bounds, Position};

    #[test]
    fn north_shift_records_new_origin() {
        let mut part = Part::new(1, 3, 3, 1, 1, None);
        part.reset_path(6);
        shift(&mut part, Direction::North, 5);
        assert_eq!(part.bounds, Bounds::new(3, 2, 4, 3));
        assert_eq!(part.path[5], Position::new(3, 2));
        assert_eq!(part.path.len(), 6);
    }

    #[test]
    fn shift_keeps_size() {
        let mut part = Part::new(1, 0, 0, 3, 2, None);
        for dir in Direction::ALL {
            shift(&mut part, dir, 0);
            assert_eq!(part.bounds.width(), part.w);
            assert_eq!(part.bounds.height(), part.h);
        }
    }

    #[test]
    fn shift_then_mirror_restores_box() {
        for dir in [Direction::East, Direction::West] {
            let mut part = Part::new(1, 4, 4, 2, 3, None);
            let start = part.bounds;
            shift(&mut part, dir, 0);
            shift(&mut part, dir.mirror(), 1);
            assert_eq!(part.bounds, start);
        }
    }

    #[test]
    fn shift_past_history_end_pads_with_previous_position() {
        let mut part = Part::new(1, 1, 1, 1, 1, None);
        part.reset_path(2);
        shift(&mut part, Direction::South, 4);
        assert_eq!(
            part.path,
            vec![
                Position::new(1, 1),
                Position::new(1, 1),
                Position::new(1, 1),
                Position::new(1, 1),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn shift_all_moves_only_members() {
        let mut apparatus = Apparatus::new(vec![
            Part::new(1, 0, 0, 1, 1, None),
            Part::new(2, 1, 0, 1, 1, None),
            Part::new(3, 5, 5, 1, 1, None),
        ]);
        apparatus.populate(1);
        shift_all(&mut apparatus, &[PartId(0), PartId(1)], Direction::East, 0);
        assert_eq!(apparatus.part(PartId(0)).position(), Position::new(1, 0));
        assert_eq!(apparatus.part(PartId(1)).position(), Position::new(2, 0));
        assert_eq!(apparatus.part(PartId(2)).position(), Position::new(5, 5));
    }
}
