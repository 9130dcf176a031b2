use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::error::GameError;
use super::board::Board;
use super::types::{PlayerRole, Position};

/// Base score of a decided game; the depth is subtracted so faster wins and
/// slower losses are preferred.
pub const WIN_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Position,
    pub score: i32,
    pub nodes: u64,
}

/// Exhaustive minimax with alpha-beta pruning, scored from the computer's side.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    max_threads: Option<usize>,
}

impl SearchEngine {
    pub fn new(max_threads: Option<usize>) -> Self {
        Self { max_threads }
    }

    /// Scores `board` with the computer to move when `maximizing`, the human otherwise.
    pub fn evaluate(&self, board: &Board, maximizing: bool) -> Result<i32, GameError> {
        let mut board = board.clone();
        let mut nodes = 0;
        minimax(&mut board, 0, maximizing, i32::MIN, i32::MAX, &mut nodes)
    }

    /// Tries every root move in row-major order; the first move with the
    /// highest score wins ties.
    pub fn best_move_sequential(&self, board: &Board) -> Result<SearchResult, GameError> {
        let mut board = board.clone();
        let moves = board.empty_cells();
        if moves.is_empty() {
            return Err(GameError::NoMovesAvailable);
        }

        let mut nodes = 0;
        let mut best: Option<(i32, Position)> = None;

        for position in moves {
            board.check(position, PlayerRole::Computer)?;
            let score = minimax(&mut board, 0, false, i32::MIN, i32::MAX, &mut nodes);
            board.uncheck(position)?;
            let score = score?;

            if best.is_none_or(|(best_score, _)| score > best_score) {
                best = Some((score, position));
            }
        }

        let (score, position) = best.ok_or(GameError::NoMovesAvailable)?;
        Ok(SearchResult {
            position,
            score,
            nodes,
        })
    }

    /// Evaluates root moves on a bounded pool of scoped worker threads.
    ///
    /// Each worker claims one root cell at a time, searches it on its own
    /// board clone and publishes the score if it strictly beats the current
    /// best. Among equally scored moves the winner depends on thread timing.
    pub fn best_move_parallel(&self, board: &Board) -> Result<SearchResult, GameError> {
        let mut roots = board.empty_cells();
        if roots.is_empty() {
            return Err(GameError::NoMovesAvailable);
        }
        let pool_size = self.pool_size(roots.len());

        // workers pop from the back, so claims follow row-major order
        roots.reverse();
        let queue = Mutex::new(roots);
        let best: Mutex<Option<(i32, Position)>> = Mutex::new(None);
        let nodes = AtomicU64::new(0);

        let outcomes: Vec<Result<(), GameError>> = thread::scope(|scope| {
            let (queue, best, nodes) = (&queue, &best, &nodes);
            let workers: Vec<_> = (0..pool_size)
                .map(|_| scope.spawn(move || search_worker(board, queue, best, nodes)))
                .collect();

            workers
                .into_iter()
                .map(|worker| match worker.join() {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        for outcome in outcomes {
            outcome?;
        }

        let best = best.into_inner().unwrap_or_else(PoisonError::into_inner);
        let (score, position) = best.ok_or(GameError::NoMovesAvailable)?;
        Ok(SearchResult {
            position,
            score,
            nodes: nodes.into_inner(),
        })
    }

    pub fn pool_size(&self, root_count: usize) -> usize {
        let available = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        let capped = match self.max_threads {
            Some(limit) => available.min(limit),
            None => available,
        };
        capped.min(root_count).max(1)
    }
}

fn search_worker(
    board: &Board,
    queue: &Mutex<Vec<Position>>,
    best: &Mutex<Option<(i32, Position)>>,
    nodes: &AtomicU64,
) -> Result<(), GameError> {
    loop {
        let Some(root) = lock(queue).pop() else {
            return Ok(());
        };

        let mut candidate = board.clone();
        candidate.check(root, PlayerRole::Computer)?;

        let mut worker_nodes = 0;
        let score = minimax(&mut candidate, 0, false, i32::MIN, i32::MAX, &mut worker_nodes)?;
        nodes.fetch_add(worker_nodes, Ordering::Relaxed);

        let mut best = lock(best);
        let current = *best;
        if current.is_none_or(|(best_score, _)| score > best_score) {
            *best = Some((score, root));
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Backtracking alpha-beta search; `board` is restored before returning.
fn minimax(
    board: &mut Board,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> Result<i32, GameError> {
    *nodes += 1;

    if let Some(winner) = board.find_winner()? {
        return Ok(match winner {
            PlayerRole::Computer => WIN_SCORE - depth,
            PlayerRole::Human => depth - WIN_SCORE,
        });
    }
    if board.is_full() {
        return Ok(0);
    }

    let player = if maximizing {
        PlayerRole::Computer
    } else {
        PlayerRole::Human
    };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for position in board.empty_cells() {
        board.check(position, player)?;
        let score = minimax(board, depth + 1, !maximizing, alpha, beta, nodes);
        board.uncheck(position)?;
        let score = score?;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::board::tests::{C, E, H};

    fn mirror(board: &Board) -> Board {
        let rows: Vec<Vec<Option<PlayerRole>>> = board
            .cells()
            .iter()
            .map(|row| row.iter().map(|cell| cell.owner().map(PlayerRole::opponent)).collect())
            .collect();
        Board::from_owners(&rows).unwrap()
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let board = Board::from_owners(&[vec![H, C, H], vec![H, C, C], vec![C, H, H]]).unwrap();
        let engine = SearchEngine::default();

        assert_eq!(engine.best_move_sequential(&board), Err(GameError::NoMovesAvailable));
        assert_eq!(engine.best_move_parallel(&board), Err(GameError::NoMovesAvailable));
    }

    #[test]
    fn test_terminal_scores_prefer_fast_wins() {
        let engine = SearchEngine::default();
        let computer_won = Board::from_owners(&[vec![C, C, C], vec![H, H, E], vec![E, E, E]]).unwrap();
        let human_won = mirror(&computer_won);

        assert_eq!(engine.evaluate(&computer_won, false).unwrap(), WIN_SCORE);
        assert_eq!(engine.evaluate(&human_won, true).unwrap(), -WIN_SCORE);
    }

    #[test]
    fn test_drawn_full_board_scores_zero() {
        let board = Board::from_owners(&[vec![H, C, H], vec![H, C, C], vec![C, H, H]]).unwrap();
        assert_eq!(SearchEngine::default().evaluate(&board, true).unwrap(), 0);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let board = Board::new(3).unwrap();
        let engine = SearchEngine::default();
        assert_eq!(engine.evaluate(&board, false).unwrap(), 0);
        assert_eq!(engine.best_move_sequential(&board).unwrap().score, 0);
    }

    #[test]
    fn test_takes_immediate_win() {
        let board = Board::from_owners(&[vec![C, C, E], vec![H, H, E], vec![H, E, E]]).unwrap();

        let result = SearchEngine::default().best_move_sequential(&board).unwrap();

        assert_eq!(result.position, Position::new(0, 2));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_human_line() {
        let board = Board::from_owners(&[vec![H, H, E], vec![E, C, E], vec![E, E, E]]).unwrap();
        let engine = SearchEngine::default();

        let sequential = engine.best_move_sequential(&board).unwrap();
        let parallel = engine.best_move_parallel(&board).unwrap();

        assert_eq!(sequential.position, Position::new(0, 2));
        assert_eq!(parallel.position, Position::new(0, 2));
    }

    #[test]
    fn test_sequential_ties_go_to_first_cell() {
        let board = Board::new(3).unwrap();
        let result = SearchEngine::default().best_move_sequential(&board).unwrap();
        // every opening draws, so the first empty cell is kept
        assert_eq!(result.position, Position::new(0, 0));
    }

    #[test]
    fn test_search_leaves_input_board_untouched() {
        let board = Board::from_owners(&[vec![H, E, E], vec![E, C, E], vec![E, E, H]]).unwrap();
        let before = board.clone();
        let engine = SearchEngine::new(Some(2));

        engine.best_move_sequential(&board).unwrap();
        engine.best_move_parallel(&board).unwrap();
        engine.evaluate(&board, true).unwrap();

        assert_eq!(board, before);
    }

    #[test]
    fn test_parallel_and_sequential_agree_on_score() {
        let positions = [
            Board::new(3).unwrap(),
            Board::from_owners(&[vec![H, E, E], vec![E, E, E], vec![E, E, E]]).unwrap(),
            Board::from_owners(&[vec![H, E, E], vec![E, C, E], vec![E, E, H]]).unwrap(),
            Board::from_owners(&[vec![E, H, E], vec![E, C, E], vec![H, E, E]]).unwrap(),
            Board::from_owners(&[
                vec![H, C, H, E],
                vec![E, C, E, H],
                vec![C, H, E, E],
                vec![E, E, C, H],
            ])
            .unwrap(),
        ];

        for board in positions {
            for threads in [None, Some(1), Some(3)] {
                let engine = SearchEngine::new(threads);
                let sequential = engine.best_move_sequential(&board).unwrap();
                let parallel = engine.best_move_parallel(&board).unwrap();
                assert_eq!(sequential.score, parallel.score, "{}", board);
            }
        }
    }

    #[test]
    fn test_score_is_negated_under_role_swap() {
        let engine = SearchEngine::default();
        let positions = [
            Board::from_owners(&[vec![H, E, E], vec![E, C, E], vec![E, E, E]]).unwrap(),
            Board::from_owners(&[vec![H, H, E], vec![E, C, E], vec![C, E, E]]).unwrap(),
            Board::from_owners(&[vec![C, H, E], vec![E, H, E], vec![E, E, E]]).unwrap(),
            Board::from_owners(&[vec![H, E, C], vec![E, E, E], vec![E, E, E]]).unwrap(),
        ];

        for board in positions {
            let human_to_move = engine.evaluate(&board, false).unwrap();
            let mirrored = engine.evaluate(&mirror(&board), true).unwrap();
            assert_eq!(human_to_move, -mirrored, "{}", board);
        }
    }

    #[test]
    fn test_pool_size_is_bounded() {
        let engine = SearchEngine::new(Some(2));
        assert!(engine.pool_size(10) <= 2);
        assert_eq!(engine.pool_size(1), 1);
        assert_eq!(SearchEngine::new(Some(0)).pool_size(5), 1);
    }

    #[test]
    fn test_nodes_are_counted() {
        let board = Board::from_owners(&[vec![H, E, E], vec![E, C, E], vec![E, E, H]]).unwrap();
        let engine = SearchEngine::default();
        let sequential = engine.best_move_sequential(&board).unwrap();
        let parallel = engine.best_move_parallel(&board).unwrap();
        assert!(sequential.nodes >= 6);
        assert!(parallel.nodes >= 6);
    }
}
