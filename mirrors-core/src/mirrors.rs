//! Static mirror classification shared by every board of a family.

use crate::error::{BoardError, Result};
use crate::{Coord, Orientation, Position};

/// Largest supported board side. The ring index `N` must fit in a [`Coord`].
pub const MAX_BOARD_SIZE: usize = Coord::MAX as usize - 1;

/// Index of `p` in a row-major `(size+2)²` grid with a `(-1, -1)` origin.
#[inline]
pub(crate) fn grid_index(size: Coord, p: Position) -> usize {
    let stride = size as usize + 2;
    debug_assert!(p.row >= -1 && p.row <= size && p.col >= -1 && p.col <= size);
    (p.row + 1) as usize * stride + (p.col + 1) as usize
}

/// Per-cell orientation over the interior plus the border ring.
///
/// Built once from the input rows and never mutated; boards hold it behind an
/// `Arc` so branches share it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mirrors {
    size: Coord,
    grid: Vec<Orientation>,
    candidates: Vec<Position>,
}

impl Mirrors {
    /// Classify `rows`, one string per board row, each of `'R'`/`'L'` glyphs.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Mirrors> {
        let n = rows.len();
        if n == 0 {
            return Err(BoardError::InvalidBoard("board has no rows".into()));
        }
        if n > MAX_BOARD_SIZE {
            return Err(BoardError::InvalidBoard(format!(
                "board size {} exceeds maximum {}",
                n, MAX_BOARD_SIZE
            )));
        }

        let size = n as Coord;
        let stride = n + 2;
        let mut grid = vec![Orientation::Border; stride * stride];

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != n {
                return Err(BoardError::InvalidBoard(format!(
                    "row {} has length {}, expected {}",
                    row, width, n
                )));
            }
            for (col, glyph) in line.chars().enumerate() {
                let orientation = Orientation::from_glyph(glyph).ok_or_else(|| {
                    BoardError::InvalidBoard(format!(
                        "unrecognized glyph {:?} at row {}, column {}",
                        glyph, row, col
                    ))
                })?;
                grid[grid_index(size, Position::new(row as Coord, col as Coord))] = orientation;
            }
        }

        Ok(Mirrors {
            size,
            grid,
            candidates: Self::entry_points(size),
        })
    }

    /// Every ring cell usable as a cast entry, four per row index.
    fn entry_points(size: Coord) -> Vec<Position> {
        let mut candidates = Vec::with_capacity(4 * size as usize);
        for i in 0..size {
            candidates.push(Position::new(i, -1));
            candidates.push(Position::new(i, size));
            candidates.push(Position::new(-1, i));
            candidates.push(Position::new(size, i));
        }
        candidates
    }

    /// Board side `N` (ring excluded).
    #[inline]
    pub fn size(&self) -> Coord {
        self.size
    }

    /// Orientation at `p`; ring cells report [`Orientation::Border`].
    #[inline]
    pub fn get(&self, p: Position) -> Orientation {
        self.grid[grid_index(self.size, p)]
    }

    /// The `4N` ring cells valid as cast entries.
    #[inline]
    pub fn cast_candidates(&self) -> &[Position] {
        &self.candidates
    }
}
