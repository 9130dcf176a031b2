use crate::games::tictactoe::Position;

/// Contract violations raised by the board, the search and the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell {0} is already checked")]
    AlreadyChecked(Position),

    #[error("position {position} is outside the {side}x{side} board")]
    OutOfBounds { position: Position, side: usize },

    #[error("board side must be at least 1, got {0}")]
    InvalidBoardSize(usize),

    #[error("line has {actual} cells, expected {expected}")]
    InvalidLineLength { expected: usize, actual: usize },

    #[error("no game is active")]
    GameNotActive,

    #[error("a game is already active")]
    GameAlreadyActive,

    #[error("it is not the human player's turn")]
    NotHumanTurn,

    #[error("it is not the computer player's turn")]
    NotComputerTurn,

    #[error("invalid move at {0}: the cell is already checked")]
    InvalidMove(Position),

    #[error("no moves available on a full board")]
    NoMovesAvailable,
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(serde_yaml_ng::Error),

    #[error("failed to deserialize config: {0}")]
    Deserialize(serde_yaml_ng::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
