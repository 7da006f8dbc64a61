//! Sparse neighbor links over the alive cells.
//!
//! Every cell stores, per [`Direction`], the coordinate of the nearest alive
//! cell on that side (a row for Top/Bottom, a column for Left/Right), or the
//! ring index when none is left. Destroying a cell splices it out of its row
//! and column in O(1); restoring it splices it back in O(1), provided
//! restorations happen in exact reverse order of destructions.
//!
//! ```text
//!   before destroy(b)        after destroy(b)
//!   a.bottom = b.row         a.bottom = c.row
//!   c.top    = b.row         c.top    = a.row
//!   b = {top: a, bottom: c}  b = {top: a, bottom: c}   (stale, kept for restore)
//! ```

use std::iter::FusedIterator;

use crate::mirrors::grid_index;
use crate::{Coord, Direction, Position};

/// Nearest alive neighbor coordinate in each direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NeighborRecord(pub [Coord; 4]);

impl NeighborRecord {
    #[inline]
    pub fn get(self, dir: Direction) -> Coord {
        self.0[dir.index()]
    }

    #[inline]
    pub fn set(&mut self, dir: Direction, value: Coord) {
        self.0[dir.index()] = value;
    }

    #[inline]
    pub fn top(self) -> Coord {
        self.get(Direction::Top)
    }

    #[inline]
    pub fn bottom(self) -> Coord {
        self.get(Direction::Bottom)
    }

    #[inline]
    pub fn left(self) -> Coord {
        self.get(Direction::Left)
    }

    #[inline]
    pub fn right(self) -> Coord {
        self.get(Direction::Right)
    }
}

/// Arena of [`NeighborRecord`]s over the `(N+2)²` grid, ring included.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NeighborLinks {
    size: Coord,
    records: Vec<NeighborRecord>,
}

impl NeighborLinks {
    /// Links of a board with every interior cell alive.
    pub fn new(size: Coord) -> NeighborLinks {
        let stride = size as usize + 2;
        let mut links = NeighborLinks {
            size,
            records: vec![NeighborRecord::default(); stride * stride],
        };

        for row in 0..size {
            for col in 0..size {
                links.records[grid_index(size, Position::new(row, col))] =
                    NeighborRecord([row - 1, row + 1, col - 1, col + 1]);
            }
        }

        // Ring cells only need the pointer facing the interior.
        for i in 0..size {
            links.record_mut(Position::new(-1, i)).set(Direction::Bottom, 0);
            links.record_mut(Position::new(size, i)).set(Direction::Top, size - 1);
            links.record_mut(Position::new(i, -1)).set(Direction::Right, 0);
            links.record_mut(Position::new(i, size)).set(Direction::Left, size - 1);
        }

        links
    }

    #[inline]
    pub fn size(&self) -> Coord {
        self.size
    }

    /// Current record of `p`. Stale for destroyed cells.
    #[inline]
    pub fn record(&self, p: Position) -> NeighborRecord {
        self.records[grid_index(self.size, p)]
    }

    #[inline]
    fn record_mut(&mut self, p: Position) -> &mut NeighborRecord {
        let idx = grid_index(self.size, p);
        &mut self.records[idx]
    }

    /// Unlink `p` from its row and column. Leaves `p`'s own record intact.
    #[inline]
    pub fn destroy(&mut self, p: Position) {
        let n = self.record(p);
        self.record_mut(Position::new(n.top(), p.col)).set(Direction::Bottom, n.bottom());
        self.record_mut(Position::new(n.bottom(), p.col)).set(Direction::Top, n.top());
        self.record_mut(Position::new(p.row, n.left())).set(Direction::Right, n.right());
        self.record_mut(Position::new(p.row, n.right())).set(Direction::Left, n.left());
    }

    /// Relink `p` using its stale record. Must undo the most recent
    /// not-yet-restored [`NeighborLinks::destroy`].
    #[inline]
    pub fn restore(&mut self, p: Position) {
        let n = self.record(p);
        self.record_mut(Position::new(n.top(), p.col)).set(Direction::Bottom, p.row);
        self.record_mut(Position::new(n.bottom(), p.col)).set(Direction::Top, p.row);
        self.record_mut(Position::new(p.row, n.left())).set(Direction::Right, p.col);
        self.record_mut(Position::new(p.row, n.right())).set(Direction::Left, p.col);
    }

    /// No alive cell left in `row`.
    #[inline]
    pub fn is_row_empty(&self, row: Coord) -> bool {
        self.record(Position::new(row, -1)).right() == self.size
    }

    /// No alive cell left in `col`.
    #[inline]
    pub fn is_col_empty(&self, col: Coord) -> bool {
        self.record(Position::new(-1, col)).bottom() == self.size
    }

    /// Alive cells of `row`, left to right.
    pub fn row_cells(&self, row: Coord) -> RowCells<'_> {
        RowCells {
            links: self,
            row,
            col: self.record(Position::new(row, -1)).right(),
        }
    }
}

/// Iterator following Right pointers from the left ring.
pub struct RowCells<'a> {
    links: &'a NeighborLinks,
    row: Coord,
    col: Coord,
}

impl Iterator for RowCells<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.col >= self.links.size {
            return None;
        }
        let p = Position::new(self.row, self.col);
        self.col = self.links.record(p).right();
        Some(p)
    }
}

impl FusedIterator for RowCells<'_> {}
