use std::fmt;

use eframe::egui::Color32;
use serde::Serialize;

/// Cardinal direction a group of parts can travel in.
///
/// The discriminants follow the compass order North, East, South, West (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Mirror across the vertical symmetry axis: East and West swap, North and South stay.
    pub fn mirror(self) -> Direction {
        match self {
            Direction::North => Direction::North,
            Direction::East => Direction::West,
            Direction::South => Direction::South,
            Direction::West => Direction::East,
        }
    }

    /// The opposite direction.
    #[cfg(test)]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Whether mirroring leaves this direction unchanged.
    pub fn is_self_mirrored(self) -> bool {
        !self.is_horizontal()
    }

    /// Whether this direction is horizontal (East/West).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Unit step `(dx, dy)` in grid coordinates. Y grows downwards.
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    #[cfg(test)]
    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Raw direction index outside `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirection(pub u8);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction index {} (expected 0..=3)", self.0)
    }
}

impl std::error::Error for InvalidDirection {}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(InvalidDirection(value))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Top-left corner of a part at one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box given by two opposite corners, `x2`/`y2` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Bounds {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn origin(&self) -> Position {
        Position::new(self.x1, self.y1)
    }

    /// Translate by one grid unit.
    pub fn stepped(self, dir: Direction) -> Self {
        let (dx, dy) = dir.step();
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    /// Whether the interiors of the two boxes intersect.
    #[cfg(test)]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

/// Index of a part inside its [`Apparatus`](super::Apparatus) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub usize);

/// One rectangular piece of the apparatus.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Shared with the mirror partner, unique for parts on the symmetry axis.
    pub id: u32,
    pub bounds: Bounds,
    pub w: i32,
    pub h: i32,
    pub color: Option<Color32>,
    /// Recorded top-left position per frame.
    pub path: Vec<Position>,
}

impl Part {
    pub fn new(id: u32, x1: i32, y1: i32, w: i32, h: i32, color: Option<Color32>) -> Self {
        Self {
            id,
            bounds: Bounds::new(x1, y1, x1 + w, y1 + h),
            w,
            h,
            color,
            path: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.bounds.origin()
    }

    /// Position recorded for `frame`, if the history reaches that far.
    pub fn position_at(&self, frame: usize) -> Option<Position> {
        self.path.get(frame).copied()
    }

    /// Reset the history to `frames` copies of the current position.
    pub fn reset_path(&mut self, frames: usize) {
        self.path.clear();
        self.path.resize(frames, self.position());
    }

    /// Append the current position as the next frame.
    pub fn carry_forward(&mut self) {
        self.path.push(self.position());
    }
}
