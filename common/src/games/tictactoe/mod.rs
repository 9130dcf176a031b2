mod board;
mod bot_controller;
mod cell;
mod observer;
mod search;
mod session;
mod statistics;
mod types;
mod win_detector;

pub use board::{Board, LineCells};
pub use bot_controller::{
    BotInput, BotMove, MoveStrategy, RANDOM_OPENING_MOVES, calculate_move, calculate_random_move,
    strategy_for,
};
pub use cell::Cell;
pub use observer::{SessionChange, SessionObserver};
pub use search::{SearchEngine, SearchResult, WIN_SCORE};
pub use session::{GameSession, SessionSettings};
pub use statistics::GameStatistics;
pub use types::{
    Difficulty, HARDEST_BOARD_SIDE, Line, Player, PlayerRole, Position, STANDARD_BOARD_SIDE,
    WinningLine,
};
pub use win_detector::{check_win, check_win_with_line};
