use std::fmt::{Display, Formatter};

use ndarray::Ix;
use strum::VariantArray;

type Coord = usize;

/// A position `(row, col)` on a maze grid. The top left corner is `Position(0, 0)`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Position(pub Coord, pub Coord);

impl Position {
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    // underflow wraps to a huge coordinate, which the bounds check rejects
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Position {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// The four cardinal steps on a rectangular grid.
///
/// The `VARIANTS` order (up, down, left, right) is the neighbor-generation
/// order used everywhere in this crate; tie-breaks among equally short paths
/// follow it.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Direction {
    /// Attempt the step from `position` in the direction specified by `self`.
    pub fn attempt_from(&self, position: Position) -> Position {
        match self {
            Self::Up => position.offset_by((-1, 0)),
            Self::Down => position.offset_by((1, 0)),
            Self::Left => position.offset_by((0, -1)),
            Self::Right => position.offset_by((0, 1)),
        }
    }
}
