//! Board error types.

use thiserror::Error;

use crate::Position;

/// Errors raised by board construction and state transitions.
///
/// Every variant is detected before the board is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Input rows are empty, not square, too large, or contain an unknown glyph.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// Cast entry is not a ring cell (or is a ring corner).
    #[error("invalid cast entry {0}: not on the border ring")]
    InvalidEntry(Position),

    /// Restore requested with no cast recorded.
    #[error("nothing to restore")]
    EmptyHistory,

    /// Branch requested past the end of the cast history.
    #[error("cannot branch after {requested} casts, history has {available}")]
    PrefixOutOfRange { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BoardError::InvalidEntry(Position::new(1, 1)).to_string(),
            "invalid cast entry (1, 1): not on the border ring"
        );
        assert_eq!(BoardError::EmptyHistory.to_string(), "nothing to restore");
        assert_eq!(
            BoardError::PrefixOutOfRange { requested: 3, available: 1 }.to_string(),
            "cannot branch after 3 casts, history has 1"
        );
    }
}
