//! Cardinal facing directions.

use std::fmt;

use crate::geom::Point;

/// One of the four cardinal directions a walker can face.
///
/// Variants are declared in clockwise order starting from `Up`, so
/// [`index`](Self::index) doubles as a quarter-turn count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in clockwise order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector for this direction (Y grows down).
    #[inline]
    pub const fn as_vector(self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Right => Point::new(1, 0),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
        }
    }

    /// Direction of a unit cardinal delta, or `None` for anything else.
    #[inline]
    pub const fn from_vector(delta: Point) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::Up),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            _ => None,
        }
    }

    /// Direction of the single step `from -> to`, if they are 4-adjacent.
    #[inline]
    pub fn between(from: Point, to: Point) -> Option<Direction> {
        let dx = to.x.checked_sub(from.x)?;
        let dy = to.y.checked_sub(from.y)?;
        Self::from_vector(Point::new(dx, dy))
    }

    #[inline]
    pub const fn rotate_clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    #[inline]
    pub const fn rotate_counter_clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Whether `other` lies on the other axis (a quarter turn away).
    #[inline]
    pub const fn is_perpendicular(self, other: Direction) -> bool {
        match self {
            Direction::Up | Direction::Down => {
                matches!(other, Direction::Left | Direction::Right)
            }
            Direction::Left | Direction::Right => {
                matches!(other, Direction::Up | Direction::Down)
            }
        }
    }

    /// The directions reachable without reversing: straight on, then the
    /// clockwise and counter-clockwise quarter turns.
    #[inline]
    pub const fn continuations(self) -> [Direction; 3] {
        [
            self,
            self.rotate_clockwise(),
            self.rotate_counter_clockwise(),
        ]
    }

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}
