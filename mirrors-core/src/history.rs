//! Stack-shaped cast ledger.
//!
//! Destroyed cells of all casts live in one flat stack; each cast remembers
//! where its cells start. Only whole casts can be pushed or popped, which is
//! exactly the order [`crate::NeighborLinks::restore`] requires.

use std::vec::Drain;

use crate::Position;

/// Read-only view of one recorded cast.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CastView<'a> {
    pub entry: Position,
    pub destroyed: &'a [Position],
}

/// Cast entries and the cells each one destroyed, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    casts: Vec<Position>,
    starts: Vec<usize>,
    destroyed: Vec<Position>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Open a new cast record. Cells pushed afterwards belong to it.
    pub(crate) fn push_cast(&mut self, entry: Position) {
        self.casts.push(entry);
        self.starts.push(self.destroyed.len());
    }

    /// Append a cell destroyed by the open cast.
    #[inline]
    pub(crate) fn push_destroyed(&mut self, p: Position) {
        debug_assert!(!self.casts.is_empty());
        self.destroyed.push(p);
    }

    /// Remove the most recent cast. Yields its entry and its destroyed cells
    /// in destruction order; iterate them with `.rev()` to restore.
    pub(crate) fn pop_last_cast(&mut self) -> Option<(Position, Drain<'_, Position>)> {
        let entry = self.casts.pop()?;
        let start = self.starts.pop()?;
        Some((entry, self.destroyed.drain(start..)))
    }

    /// Number of recorded casts.
    #[inline]
    pub fn len(&self) -> usize {
        self.casts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.casts.is_empty()
    }

    /// Entry positions of every recorded cast.
    #[inline]
    pub fn casts(&self) -> &[Position] {
        &self.casts
    }

    /// Total cells destroyed over all recorded casts.
    #[inline]
    pub fn destroyed_total(&self) -> usize {
        self.destroyed.len()
    }

    /// The `i`-th recorded cast.
    pub fn get(&self, i: usize) -> Option<CastView<'_>> {
        let entry = *self.casts.get(i)?;
        let start = self.starts[i];
        let end = self.starts.get(i + 1).copied().unwrap_or(self.destroyed.len());
        Some(CastView {
            entry,
            destroyed: &self.destroyed[start..end],
        })
    }

    pub fn last_cast(&self) -> Option<CastView<'_>> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = CastView<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}
