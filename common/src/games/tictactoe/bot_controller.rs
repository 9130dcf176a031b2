use crate::error::GameError;
use crate::games::SessionRng;
use super::board::Board;
use super::search::SearchEngine;
use super::types::{Difficulty, Position};

/// Computer moves on the hardest tier that are played at random before the
/// search takes over; the larger board is too expensive to search this early.
pub const RANDOM_OPENING_MOVES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStrategy {
    Random,
    Search,
}

pub struct BotInput<'a> {
    pub board: &'a Board,
    pub difficulty: Difficulty,
    pub finished_computer_moves: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotMove {
    pub position: Position,
    pub strategy: MoveStrategy,
    pub score: Option<i32>,
    pub nodes: u64,
}

pub fn strategy_for(difficulty: Difficulty, finished_computer_moves: u32) -> MoveStrategy {
    match difficulty {
        Difficulty::Easy => MoveStrategy::Random,
        Difficulty::Hard => MoveStrategy::Search,
        Difficulty::Hardest if finished_computer_moves < RANDOM_OPENING_MOVES => MoveStrategy::Random,
        Difficulty::Hardest => MoveStrategy::Search,
    }
}

pub fn calculate_move(
    input: &BotInput<'_>,
    engine: &SearchEngine,
    rng: &mut SessionRng,
) -> Result<BotMove, GameError> {
    match strategy_for(input.difficulty, input.finished_computer_moves) {
        MoveStrategy::Random => Ok(BotMove {
            position: calculate_random_move(input.board, rng)?,
            strategy: MoveStrategy::Random,
            score: None,
            nodes: 0,
        }),
        MoveStrategy::Search => {
            let result = engine.best_move_parallel(input.board)?;
            Ok(BotMove {
                position: result.position,
                strategy: MoveStrategy::Search,
                score: Some(result.score),
                nodes: result.nodes,
            })
        }
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Result<Position, GameError> {
    rng.choose(&board.empty_cells())
        .ok_or(GameError::NoMovesAvailable)
}
