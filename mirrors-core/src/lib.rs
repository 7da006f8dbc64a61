//! Fragile mirrors board engine.
//!
//! A square board of diagonal mirrors is hit by *casts*: a beam enters from the
//! border ring, bounces off every mirror it meets and destroys it, and stops
//! when it reaches the ring again.
//!
//! # Coordinates
//!
//! ```text
//!          -1   0   1  ...  N-1   N
//!    -1     +   R   R  ...   R    +      R = ring (border sentinel)
//!     0     R   .   .  ...   .    R      . = interior mirror cell
//!     1     R   .   .  ...   .    R
//!    ...
//!    N-1    R   .   .  ...   .    R
//!     N     +   R   R  ...   R    +      + = corners, never used
//! ```
//!
//! Interior cells live in `[0, N) × [0, N)`. Ring cells at index `-1` and `N`
//! are cast entry points and the terminator of every beam path.
//!
//! # Directions
//!
//! A [`Direction`] names the side through which the beam *enters* a cell, so a
//! beam fired from the top ring travels downwards with direction `Top`.
//!
//! # Glyphs
//!
//! ```text
//! 'R'  RightDiagonal  '\'   beam moving down turns right
//! 'L'  LeftDiagonal   '/'   beam moving down turns left
//! ```

pub mod board;
pub mod error;
pub mod hash;
pub mod history;
pub mod links;
pub mod mirrors;
pub mod reflect;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};

pub use board::Board;
pub use error::{BoardError, Result};
pub use hash::{Fingerprint, ZobristKeys, DEFAULT_SEED};
pub use history::{CastView, History};
pub use links::{NeighborLinks, NeighborRecord};
pub use mirrors::{Mirrors, MAX_BOARD_SIZE};

/// Signed grid coordinate. Wide enough for the ring at `-1` and `N`.
pub type Coord = i16;

/// Cell position, including ring cells.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub row: Coord,
    pub col: Coord,
}

impl Position {
    #[inline]
    pub const fn new(row: Coord, col: Coord) -> Position {
        Position { row, col }
    }

    /// True when both coordinates are inside `[0, size)`.
    #[inline]
    pub fn is_interior(self, size: Coord) -> bool {
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }

    /// True for ring cells usable as cast entries (ring minus the corners).
    #[inline]
    pub fn is_entry(self, size: Coord) -> bool {
        let on_row_ring = self.row == -1 || self.row == size;
        let on_col_ring = self.col == -1 || self.col == size;
        (on_row_ring && (0..size).contains(&self.col))
            || (on_col_ring && (0..size).contains(&self.row))
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, col): (Coord, Coord)) -> Position {
        Position { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Side of a cell through which the beam enters it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Index into a [`NeighborRecord`] and the reflection table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Top and Bottom move along a column, so they change the row.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }
}

/// Mirror orientation of a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    RightDiagonal = 0,
    LeftDiagonal = 1,
    Border = 2,
}

impl Orientation {
    /// Map an input glyph to an interior orientation.
    #[inline]
    pub fn from_glyph(glyph: char) -> Option<Orientation> {
        match glyph {
            'R' => Some(Orientation::RightDiagonal),
            'L' => Some(Orientation::LeftDiagonal),
            _ => None,
        }
    }

    /// Inverse of [`Orientation::from_glyph`]; `None` for the ring.
    #[inline]
    pub fn glyph(self) -> Option<char> {
        match self {
            Orientation::RightDiagonal => Some('R'),
            Orientation::LeftDiagonal => Some('L'),
            Orientation::Border => None,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().is_vertical(), dir.is_vertical());
        }
    }

    #[test]
    fn test_direction_indices() {
        let indices: Vec<usize> = Direction::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_glyph_roundtrip() {
        for glyph in ['R', 'L'] {
            let orientation = Orientation::from_glyph(glyph).unwrap();
            assert_eq!(orientation.glyph(), Some(glyph));
        }
        assert_eq!(Orientation::from_glyph('/'), None);
        assert_eq!(Orientation::from_glyph('r'), None);
        assert_eq!(Orientation::Border.glyph(), None);
    }

    #[test]
    fn test_position_interior() {
        assert!(Position::new(0, 0).is_interior(3));
        assert!(Position::new(2, 2).is_interior(3));
        assert!(!Position::new(-1, 0).is_interior(3));
        assert!(!Position::new(0, 3).is_interior(3));
    }

    #[test]
    fn test_position_entry() {
        // Each side of the ring
        assert!(Position::new(-1, 1).is_entry(3));
        assert!(Position::new(3, 1).is_entry(3));
        assert!(Position::new(1, -1).is_entry(3));
        assert!(Position::new(1, 3).is_entry(3));

        // Corners and interior cells are not entries
        assert!(!Position::new(-1, -1).is_entry(3));
        assert!(!Position::new(3, 3).is_entry(3));
        assert!(!Position::new(-1, 3).is_entry(3));
        assert!(!Position::new(1, 1).is_entry(3));
        assert!(!Position::new(-2, 1).is_entry(3));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(-1, 4).to_string(), "(-1, 4)");
    }
}
