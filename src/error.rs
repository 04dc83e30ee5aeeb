use thiserror::Error;

/// Errors surfaced by the fallible edges of the core: parsing a FEN or a
/// UCI move string. The search kernel itself never returns one of these.
/// An illegal move reaching `Position::push` is a contract violation and
/// panics instead.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid UCI move '{0}'")]
    InvalidUciMove(String),

    #[error("move '{uci}' is not legal in the current position")]
    IllegalMove { uci: String },
}
