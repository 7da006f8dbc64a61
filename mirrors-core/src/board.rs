//! Board state: shared classification and keys, owned links and history.

use std::sync::Arc;

use crate::error::{BoardError, Result};
use crate::hash::{Fingerprint, ZobristKeys, DEFAULT_SEED};
use crate::history::History;
use crate::links::NeighborLinks;
use crate::mirrors::Mirrors;
use crate::reflect;
use crate::{Coord, Direction, Orientation, Position};

/// A fragile mirrors board.
///
/// `Mirrors` and `ZobristKeys` are shared between a board and every branch
/// derived from it; links, fingerprint, counters and history are owned.
#[derive(Clone, Debug)]
pub struct Board {
    size: Coord,
    mirrors: Arc<Mirrors>,
    keys: Arc<ZobristKeys>,
    links: NeighborLinks,
    fingerprint: Fingerprint,
    destroyed_count: usize,
    history: History,
}

impl Board {
    /// Build a board from `N` rows of `N` glyphs using [`DEFAULT_SEED`].
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Board> {
        Board::with_seed(rows, DEFAULT_SEED)
    }

    /// Build a board whose fingerprint keys are drawn from `seed`.
    pub fn with_seed<S: AsRef<str>>(rows: &[S], seed: u64) -> Result<Board> {
        let mirrors = Mirrors::parse(rows)?;
        let keys = ZobristKeys::new(mirrors.size(), seed);
        Ok(Board::from_parts(Arc::new(mirrors), Arc::new(keys)))
    }

    /// Fresh board (nothing destroyed) over shared classification and keys.
    fn from_parts(mirrors: Arc<Mirrors>, keys: Arc<ZobristKeys>) -> Board {
        debug_assert_eq!(mirrors.size(), keys.size());
        let size = mirrors.size();
        let mut fingerprint = Fingerprint::default();
        for row in 0..size {
            for col in 0..size {
                keys.toggle(&mut fingerprint, Position::new(row, col));
            }
        }
        Board {
            size,
            links: NeighborLinks::new(size),
            mirrors,
            keys,
            fingerprint,
            destroyed_count: 0,
            history: History::new(),
        }
    }

    // ========== Casting ==========

    /// Direction a beam fired from ring cell `entry` enters its first cell with.
    fn entry_direction(&self, entry: Position) -> Result<Direction> {
        if !entry.is_entry(self.size) {
            return Err(BoardError::InvalidEntry(entry));
        }
        Ok(if entry.row == -1 {
            Direction::Top
        } else if entry.col == -1 {
            Direction::Left
        } else if entry.row == self.size {
            Direction::Bottom
        } else {
            Direction::Right
        })
    }

    /// Fire a beam from ring cell `entry`, destroying every mirror on its
    /// path. Returns how many cells were destroyed (possibly zero).
    pub fn cast(&mut self, entry: Position) -> Result<usize> {
        let mut dir = self.entry_direction(entry)?;
        self.history.push_cast(entry);

        let mut p = entry;
        let mut count = 0;
        loop {
            let orientation = self.mirrors.get(p);
            (p, dir) = reflect::next(orientation, dir, p, self.links.record(p));
            if self.mirrors.get(p) == Orientation::Border {
                break;
            }
            self.destroy(p);
            count += 1;
        }

        self.destroyed_count += count;
        Ok(count)
    }

    #[inline]
    fn destroy(&mut self, p: Position) {
        self.links.destroy(p);
        self.keys.toggle(&mut self.fingerprint, p);
        self.history.push_destroyed(p);
    }

    /// Undo the most recent cast. Returns how many cells came back.
    pub fn restore(&mut self) -> Result<usize> {
        let Board {
            keys,
            links,
            fingerprint,
            history,
            destroyed_count,
            ..
        } = self;
        let (_, cells) = history.pop_last_cast().ok_or(BoardError::EmptyHistory)?;
        let mut count = 0;
        for p in cells.rev() {
            links.restore(p);
            keys.toggle(fingerprint, p);
            count += 1;
        }
        *destroyed_count -= count;
        Ok(count)
    }

    /// Independent board positioned after the first `casts` recorded casts.
    ///
    /// Shares the classification and key table; rebuilds links by replay.
    pub fn branch(&self, casts: usize) -> Result<Board> {
        let available = self.history.len();
        if casts > available {
            return Err(BoardError::PrefixOutOfRange {
                requested: casts,
                available,
            });
        }
        let mut board = Board::from_parts(Arc::clone(&self.mirrors), Arc::clone(&self.keys));
        for &entry in &self.history.casts()[..casts] {
            board.cast(entry)?;
        }
        Ok(board)
    }

    // ========== Queries ==========

    /// Board side `N`.
    #[inline]
    pub fn size(&self) -> Coord {
        self.size
    }

    #[inline]
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    #[inline]
    pub fn destroyed_count(&self) -> usize {
        self.destroyed_count
    }

    #[inline]
    pub fn all_destroyed(&self) -> bool {
        self.destroyed_count == self.size as usize * self.size as usize
    }

    /// The `4N` valid cast entries.
    #[inline]
    pub fn cast_candidates(&self) -> &[Position] {
        self.mirrors.cast_candidates()
    }

    /// Entry positions of every recorded cast, oldest first.
    #[inline]
    pub fn cast_history(&self) -> &[Position] {
        self.history.casts()
    }

    #[inline]
    pub fn cast_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn links(&self) -> &NeighborLinks {
        &self.links
    }

    #[inline]
    pub fn mirrors(&self) -> &Arc<Mirrors> {
        &self.mirrors
    }

    #[inline]
    pub fn keys(&self) -> &Arc<ZobristKeys> {
        &self.keys
    }

    /// Cells destroyed by the most recent cast, in destruction order.
    pub fn last_cast_destroyed(&self) -> &[Position] {
        self.history.last_cast().map(|c| c.destroyed).unwrap_or(&[])
    }

    /// Rows plus columns with no alive cell left.
    pub fn empty_line_count(&self) -> usize {
        (0..self.size)
            .map(|i| self.links.is_row_empty(i) as usize + self.links.is_col_empty(i) as usize)
            .sum()
    }

    /// Both the row and the column through interior cell `p` are empty.
    #[inline]
    pub fn is_empty_cross(&self, p: Position) -> bool {
        p.is_interior(self.size) && self.links.is_row_empty(p.row) && self.links.is_col_empty(p.col)
    }

    /// The last cast destroyed one or two cells, each left on an empty cross.
    pub fn is_last_isolated(&self) -> bool {
        match self.last_cast_destroyed() {
            cells @ ([_] | [_, _]) => cells.iter().all(|&p| self.is_empty_cross(p)),
            _ => false,
        }
    }

    /// Alive cells in row-major order, found by walking the links.
    pub fn alive_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| self.links.row_cells(row))
    }

    /// Whether interior cell `p` is still alive.
    ///
    /// A destroyed cell's stale left pointer names a cell whose right
    /// pointer has moved past it, so one lookup each way is enough.
    pub fn is_alive(&self, p: Position) -> bool {
        if !p.is_interior(self.size) {
            return false;
        }
        let left = self.links.record(p).left();
        self.links.record(Position::new(p.row, left)).right() == p.col
    }

    /// One line per row: the glyph of alive cells, `.` for destroyed ones.
    pub fn render(&self) -> Vec<String> {
        let n = self.size as usize;
        let mut lines = vec![vec!['.'; n]; n];
        for p in self.alive_cells() {
            lines[p.row as usize][p.col as usize] = self.mirrors.get(p).glyph().unwrap_or('?');
        }
        lines.into_iter().map(|line| line.into_iter().collect()).collect()
    }
}

/// Boards compare equal when their neighbor links are identical.
impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.size == other.size && self.links == other.links
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: Coord, col: Coord) -> Position {
        Position::new(row, col)
    }

    // ========== Construction ==========

    #[test]
    fn test_new_board() {
        let board = Board::new(&["RL", "LR"]).unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.destroyed_count(), 0);
        assert!(!board.all_destroyed());
        assert_eq!(board.cast_count(), 0);
        assert_eq!(board.empty_line_count(), 0);
        assert_eq!(board.cast_candidates().len(), 8);
        assert_eq!(board.alive_cells().count(), 4);
        assert_eq!(*board.links(), NeighborLinks::new(2));
    }

    #[test]
    fn test_new_rejects_malformed_input() {
        assert!(matches!(Board::new(&["RL", "L"]), Err(BoardError::InvalidBoard(_))));
        assert!(matches!(Board::new(&["R?"]), Err(BoardError::InvalidBoard(_))));
        let empty: [String; 0] = [];
        assert!(matches!(Board::new(&empty), Err(BoardError::InvalidBoard(_))));
    }

    #[test]
    fn test_initial_fingerprint_covers_every_cell() {
        let board = Board::new(&["RL", "LR"]).unwrap();
        let keys = board.keys();
        let expected = keys.fingerprint_of([p(0, 0), p(0, 1), p(1, 0), p(1, 1)]);
        assert_eq!(board.fingerprint(), expected);
    }

    #[test]
    fn test_seed_changes_fingerprint_not_behaviour() {
        let mut a = Board::with_seed(&["RL", "LR"], 1).unwrap();
        let mut b = Board::with_seed(&["RL", "LR"], 2).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.cast(p(-1, 0)).unwrap(), b.cast(p(-1, 0)).unwrap());
        assert_eq!(a, b);
    }

    // ========== Casting ==========

    #[test]
    fn test_single_cell_cast() {
        let mut board = Board::new(&["R"]).unwrap();
        let before = board.fingerprint();

        assert_eq!(board.cast(p(-1, 0)).unwrap(), 1);
        assert!(board.all_destroyed());
        assert_eq!(board.destroyed_count(), 1);
        assert_eq!(board.empty_line_count(), 2);
        assert_ne!(board.fingerprint(), before);

        assert_eq!(board.restore().unwrap(), 1);
        assert_eq!(board.destroyed_count(), 0);
        assert!(!board.all_destroyed());
        assert_eq!(board.fingerprint(), before);
    }

    #[test]
    fn test_two_by_two_right_diagonals() {
        let mut board = Board::new(&["RR", "RR"]).unwrap();
        assert_eq!(board.cast(p(0, -1)).unwrap(), 3);
        assert_eq!(board.destroyed_count(), 3);
        assert!(!board.all_destroyed());
        assert_eq!(board.last_cast_destroyed(), &[p(0, 0), p(1, 0), p(1, 1)]);
        assert_eq!(board.alive_cells().collect::<Vec<_>>(), vec![p(0, 1)]);
        assert!(board.is_alive(p(0, 1)));
        assert!(!board.is_alive(p(1, 1)));

        assert_eq!(board.restore().unwrap(), 3);
        assert_eq!(board.destroyed_count(), 0);
        assert_eq!(*board.links(), NeighborLinks::new(2));
    }

    #[test]
    fn test_left_diagonal_turns_the_other_way() {
        // Beam from the top of column 0 hits '/' and leaves through the left ring.
        let mut board = Board::new(&["LR", "RR"]).unwrap();
        assert_eq!(board.cast(p(-1, 0)).unwrap(), 1);
        assert_eq!(board.last_cast_destroyed(), &[p(0, 0)]);
    }

    #[test]
    fn test_cast_through_empty_line_destroys_nothing() {
        let mut board = Board::new(&["R"]).unwrap();
        board.cast(p(0, -1)).unwrap();
        assert_eq!(board.cast(p(0, 1)).unwrap(), 0);
        assert_eq!(board.cast(p(-1, 0)).unwrap(), 0);
        assert_eq!(board.cast_count(), 3);
        assert_eq!(board.destroyed_count(), 1);
        assert!(board.last_cast_destroyed().is_empty());
    }

    #[test]
    fn test_beam_skips_destroyed_cells() {
        let mut board = Board::new(&["RRR", "RRR", "RRR"]).unwrap();
        assert_eq!(board.cast(p(1, -1)).unwrap(), 3);
        assert_eq!(board.last_cast_destroyed(), &[p(1, 0), p(2, 0), p(2, 1)]);

        // From the bottom of column 0 the beam jumps over (2, 0) and (1, 0).
        assert_eq!(board.links().record(p(3, 0)).top(), 0);
        assert_eq!(board.cast(p(3, 0)).unwrap(), 1);
        assert_eq!(board.last_cast_destroyed(), &[p(0, 0)]);
        assert!(board.links().is_col_empty(0));
    }

    #[test]
    fn test_invalid_entry_leaves_board_untouched() {
        let mut board = Board::new(&["RL", "LR"]).unwrap();
        let before = board.clone();
        for entry in [p(0, 0), p(-1, -1), p(2, 2), p(-1, 2), p(5, 0), p(-2, 1)] {
            assert_eq!(board.cast(entry), Err(BoardError::InvalidEntry(entry)));
        }
        assert_eq!(board.cast_count(), 0);
        assert_eq!(board.fingerprint(), before.fingerprint());
        assert_eq!(board, before);
    }

    // ========== Restore & Branch ==========

    #[test]
    fn test_restore_empty_history() {
        let mut board = Board::new(&["R"]).unwrap();
        assert_eq!(board.restore(), Err(BoardError::EmptyHistory));
        board.cast(p(-1, 0)).unwrap();
        board.restore().unwrap();
        assert_eq!(board.restore(), Err(BoardError::EmptyHistory));
    }

    #[test]
    fn test_branch_replays_prefix() {
        let mut board = Board::new(&["RLR", "LRL", "RRL"]).unwrap();
        let mut fingerprints = vec![board.fingerprint()];
        for &entry in &[p(-1, 0), p(1, 3), p(3, 2), p(2, -1)] {
            board.cast(entry).unwrap();
            fingerprints.push(board.fingerprint());
        }

        for (k, &fingerprint) in fingerprints.iter().enumerate() {
            let branch = board.branch(k).unwrap();
            assert_eq!(branch.cast_count(), k);
            assert_eq!(branch.fingerprint(), fingerprint);
            assert_eq!(branch.cast_history(), &board.cast_history()[..k]);
            assert!(Arc::ptr_eq(branch.mirrors(), board.mirrors()));
            assert!(Arc::ptr_eq(branch.keys(), board.keys()));
        }
        assert_eq!(board.branch(4).unwrap(), board);
    }

    #[test]
    fn test_branch_is_independent() {
        let mut board = Board::new(&["RL", "LR"]).unwrap();
        board.cast(p(-1, 0)).unwrap();
        let snapshot = board.clone();

        let mut branch = board.branch(1).unwrap();
        while branch.restore().is_ok() {}
        branch.cast(p(1, 2)).unwrap();

        assert_eq!(board, snapshot);
        assert_eq!(board.fingerprint(), snapshot.fingerprint());
    }

    #[test]
    fn test_branch_out_of_range() {
        let mut board = Board::new(&["R"]).unwrap();
        board.cast(p(-1, 0)).unwrap();
        assert_eq!(
            board.branch(2).unwrap_err(),
            BoardError::PrefixOutOfRange { requested: 2, available: 1 }
        );
    }

    // ========== Structural queries ==========

    #[test]
    fn test_empty_lines_and_isolation() {
        // Column 0 of "LR/LR" is all '/', so a cast from the top of column 0
        // destroys only (0, 0) and leaves through the left ring.
        let mut board = Board::new(&["LR", "LR"]).unwrap();
        assert_eq!(board.cast(p(-1, 0)).unwrap(), 1);
        assert!(!board.is_last_isolated());
        assert_eq!(board.empty_line_count(), 0);

        // Beam from the left of row 1 hits '/' at (1, 0) and goes up the
        // now-empty column 0 to the top ring.
        assert_eq!(board.cast(p(1, -1)).unwrap(), 1);
        assert!(board.links().is_col_empty(0));
        assert!(!board.is_last_isolated());
        assert_eq!(board.empty_line_count(), 1);
    }

    #[test]
    fn test_is_last_isolated_single_cell() {
        let mut board = Board::new(&["R"]).unwrap();
        assert!(!board.is_last_isolated());
        board.cast(p(-1, 0)).unwrap();
        assert!(board.is_empty_cross(p(0, 0)));
        assert!(board.is_last_isolated());
    }

    #[test]
    fn test_is_last_isolated_two_cells() {
        let mut board = Board::new(&["RR", "RL"]).unwrap();
        assert_eq!(board.cast(p(1, -1)).unwrap(), 1);
        assert_eq!(board.cast(p(1, 2)).unwrap(), 1);
        assert!(!board.is_last_isolated());

        // Top of column 0: '\' turns right into (0, 1), whose '\' sends the
        // beam down the empty column 1.
        assert_eq!(board.cast(p(-1, 0)).unwrap(), 2);
        assert_eq!(board.last_cast_destroyed(), &[p(0, 0), p(0, 1)]);
        assert!(board.all_destroyed());
        assert!(board.is_last_isolated());
    }

    #[test]
    fn test_is_last_isolated_needs_empty_crosses() {
        // (0, 1) is '/', so the beam turns up and leaves after two cells,
        // with row 1 still alive below both.
        let mut board = Board::new(&["RL", "RR"]).unwrap();
        assert_eq!(board.cast(p(-1, 0)).unwrap(), 2);
        assert!(board.links().is_row_empty(0));
        assert!(!board.is_empty_cross(p(0, 0)));
        assert!(!board.is_last_isolated());
    }

    #[test]
    fn test_is_last_isolated_ignores_long_casts() {
        // One cast clears the whole board: every cell ends on an empty cross
        // but four cells is too many.
        let mut board = Board::new(&["RR", "RL"]).unwrap();
        assert_eq!(board.cast(p(-1, 0)).unwrap(), 4);
        assert!(board.all_destroyed());
        assert!(board.last_cast_destroyed().iter().all(|&c| board.is_empty_cross(c)));
        assert!(!board.is_last_isolated());
    }

    #[test]
    fn test_queries_off_the_interior() {
        let mut board = Board::new(&["RL", "LR"]).unwrap();
        board.cast(p(-1, 0)).unwrap();
        board.cast(p(1, -1)).unwrap();
        for q in [p(5, 0), p(0, 7), p(-1, 0), p(2, 1), p(-3, -3)] {
            assert!(!board.is_empty_cross(q));
            assert!(!board.is_alive(q));
        }
    }

    #[test]
    fn test_is_alive_matches_row_walk() {
        let mut board = Board::new(&["RLR", "LRL", "RRL"]).unwrap();
        let check = |board: &Board| {
            for row in 0..3 {
                for col in 0..3 {
                    let q = p(row, col);
                    let walked = board.links().row_cells(row).any(|c| c == q);
                    assert_eq!(board.is_alive(q), walked, "cell {}", q);
                }
            }
        };

        check(&board);
        for &entry in &[p(-1, 0), p(1, 3), p(3, 2), p(2, -1), p(0, -1), p(-1, 2)] {
            board.cast(entry).unwrap();
            check(&board);
        }
        while board.restore().is_ok() {
            check(&board);
        }
    }

    #[test]
    fn test_render_marks_destroyed_cells() {
        let mut board = Board::new(&["RR", "RR"]).unwrap();
        assert_eq!(board.render(), vec!["RR", "RR"]);
        board.cast(p(0, -1)).unwrap();
        assert_eq!(board.render(), vec![".R", ".."]);
    }
}
