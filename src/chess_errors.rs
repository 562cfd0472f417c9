//! Errors used throughout the rules engine.
//!
//! `RulesError` is the single error type returned by the public API. The rules
//! themselves are total functions over a well-formed board, so every variant
//! here describes either a caller contract violation (applying a move that was
//! not offered, undoing past the start of the game) or malformed input handed
//! to one of the setup/lookup helpers.

use thiserror::Error;

/// Unified error type for the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// The move is not a member of the legal move set for the current position.
    #[error("illegal move {notation}: not in the current legal move set")]
    IllegalMove { notation: String },

    /// `undo_move` was called with an empty history.
    #[error("no move to undo: history is empty")]
    NothingToUndo,

    /// A coordinate string could not be parsed as a board square.
    #[error("invalid square {text:?}")]
    InvalidSquare { text: String },

    /// A position setup was malformed or describes an impossible position.
    #[error("invalid position setup: {reason}")]
    InvalidPlacement { reason: String },

    /// A coordinate-notation lookup matched no legal move.
    #[error("no legal move matches {notation}")]
    NoSuchMove { notation: String },
}

/// Result alias for rules engine operations.
pub type RulesResult<T> = Result<T, RulesError>;

impl RulesError {
    pub(crate) fn placement(reason: impl Into<String>) -> Self {
        RulesError::InvalidPlacement {
            reason: reason.into(),
        }
    }
}
