//! Reflection state machine.
//!
//! ```text
//!   RightDiagonal '\'            LeftDiagonal '/'
//!
//!        |                             |
//!        v                             v
//!        \ --->                  <---  /
//!
//!   enters Top, leaves Right     enters Top, leaves Left
//! ```
//!
//! A ring cell keeps the direction and jumps across the line to the next
//! alive cell (or to the opposite ring when the line is empty).

use crate::links::NeighborRecord;
use crate::{Direction, Orientation, Position};

/// One table entry: which neighbor pointer to follow and the direction the
/// beam enters the next cell with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Step {
    pub via: Direction,
    pub out: Direction,
}

const fn step(via: Direction, out: Direction) -> Step {
    Step { via, out }
}

use Direction::{Bottom, Left, Right, Top};

/// `TRANSITIONS[orientation][incoming]`, rows in [`Orientation`] order and
/// columns in [`Direction`] order.
pub const TRANSITIONS: [[Step; 4]; 3] = [
    // RightDiagonal
    [
        step(Right, Left),
        step(Left, Right),
        step(Bottom, Top),
        step(Top, Bottom),
    ],
    // LeftDiagonal
    [
        step(Left, Right),
        step(Right, Left),
        step(Top, Bottom),
        step(Bottom, Top),
    ],
    // Border
    [
        step(Bottom, Top),
        step(Top, Bottom),
        step(Right, Left),
        step(Left, Right),
    ],
];

/// Table entry for a beam entering a cell of `orientation` through `incoming`.
#[inline]
pub fn transition(orientation: Orientation, incoming: Direction) -> Step {
    TRANSITIONS[orientation.index()][incoming.index()]
}

/// Next cell and entry direction for a beam that entered `p` through
/// `incoming`. `record` is `p`'s current neighbor record.
#[inline]
pub fn next(
    orientation: Orientation,
    incoming: Direction,
    p: Position,
    record: NeighborRecord,
) -> (Position, Direction) {
    let step = transition(orientation, incoming);
    let coord = record.get(step.via);
    let next = if step.via.is_vertical() {
        Position::new(coord, p.col)
    } else {
        Position::new(p.row, coord)
    };
    (next, step.out)
}
