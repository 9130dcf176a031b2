use crate::error::GameError;
use crate::games::SessionRng;
use crate::{log, log_debug};
use super::board::Board;
use super::bot_controller::{BotInput, MoveStrategy, calculate_move};
use super::observer::{SessionChange, SessionObserver};
use super::search::SearchEngine;
use super::statistics::GameStatistics;
use super::types::{Difficulty, Player, PlayerRole, Position, WinningLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub human_name: String,
    pub computer_name: String,
    pub max_search_threads: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            human_name: "Human".to_string(),
            computer_name: "Computer".to_string(),
            max_search_threads: None,
            seed: None,
        }
    }
}

/// One human against the computer, one game at a time.
///
/// The session is inactive until [`GameSession::new_game`]; a game ends as
/// soon as a line is completed or the board fills up. Human moves trigger the
/// computer's reply synchronously, so callers never observe a half-played turn.
pub struct GameSession {
    board: Board,
    human: Player,
    computer: Player,
    current_player: Option<PlayerRole>,
    winner: Option<PlayerRole>,
    winning_line: Option<WinningLine>,
    difficulty: Difficulty,
    is_active: bool,
    games_played: u32,
    finished_computer_moves: u32,
    statistics: GameStatistics,
    engine: SearchEngine,
    rng: SessionRng,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl GameSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_statistics(settings, GameStatistics::new())
    }

    pub fn with_statistics(settings: SessionSettings, statistics: GameStatistics) -> Self {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };

        Self {
            board: Board::default(),
            human: Player::human(settings.human_name),
            computer: Player::computer(settings.computer_name),
            current_player: None,
            winner: None,
            winning_line: None,
            difficulty: Difficulty::default(),
            is_active: false,
            games_played: 0,
            finished_computer_moves: 0,
            statistics,
            engine: SearchEngine::new(settings.max_search_threads),
            rng,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn player(&self, role: PlayerRole) -> &Player {
        match role {
            PlayerRole::Human => &self.human,
            PlayerRole::Computer => &self.computer,
        }
    }

    pub fn current_player(&self) -> Option<PlayerRole> {
        self.current_player
    }

    pub fn winner(&self) -> Option<PlayerRole> {
        self.winner
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// True only between games, after at least one game ended without a winner.
    pub fn is_tie(&self) -> bool {
        !self.is_active && self.games_played > 0 && self.winner.is_none()
    }

    pub fn can_create_new_game(&self) -> bool {
        !self.is_active
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn finished_computer_moves(&self) -> u32 {
        self.finished_computer_moves
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn can_perform_human_move(&self, position: Position) -> bool {
        self.is_active
            && self.current_player == Some(PlayerRole::Human)
            && matches!(self.board.owner(position), Ok(None))
    }

    pub fn new_game(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        if self.is_active {
            return Err(GameError::GameAlreadyActive);
        }

        self.board = Board::new(difficulty.board_side())?;
        self.finished_computer_moves = 0;
        self.current_player = Some(PlayerRole::Human);
        self.winner = None;
        self.winning_line = None;
        self.games_played += 1;
        self.difficulty = difficulty;
        self.is_active = true;

        log!(
            "Game {} started: difficulty {}, {}x{} board",
            self.games_played,
            difficulty,
            self.board.side(),
            self.board.side()
        );

        self.notify(&SessionChange {
            board: true,
            turn: true,
            active: true,
            statistics: false,
        });
        Ok(())
    }

    /// Checks `position` for the human and, unless that ends the game, plays
    /// the computer's reply before returning.
    pub fn submit_human_move(&mut self, position: Position) -> Result<(), GameError> {
        if !self.is_active {
            return Err(GameError::GameNotActive);
        }
        if self.current_player != Some(PlayerRole::Human) {
            return Err(GameError::NotHumanTurn);
        }
        if self.board.owner(position)?.is_some() {
            return Err(GameError::InvalidMove(position));
        }

        let mut change = SessionChange::default();
        let result = self.play_human_turn(position, &mut change);
        self.notify(&change);
        result
    }

    /// Records the result of the active game and deactivates the session.
    pub fn end_game(&mut self, winner: Option<PlayerRole>) -> Result<(), GameError> {
        let winning_line = self
            .board
            .find_winning_line()?
            .filter(|line| Some(line.owner) == winner);

        let mut change = SessionChange::default();
        let result = self.finish(winner, winning_line, &mut change);
        self.notify(&change);
        result
    }

    fn play_human_turn(&mut self, position: Position, change: &mut SessionChange) -> Result<(), GameError> {
        self.board.check(position, PlayerRole::Human)?;
        change.board = true;
        log_debug!("{} checked {}", self.human.name(), position);

        if self.finish_if_terminal(change)? {
            return Ok(());
        }

        self.next_player(change)?;
        self.perform_computer_move(change)
    }

    fn perform_computer_move(&mut self, change: &mut SessionChange) -> Result<(), GameError> {
        if !self.is_active {
            return Err(GameError::GameNotActive);
        }
        if self.current_player != Some(PlayerRole::Computer) {
            return Err(GameError::NotComputerTurn);
        }

        let input = BotInput {
            board: &self.board,
            difficulty: self.difficulty,
            finished_computer_moves: self.finished_computer_moves,
        };
        let bot_move = calculate_move(&input, &self.engine, &mut self.rng)?;

        self.board.check(bot_move.position, PlayerRole::Computer)?;
        self.finished_computer_moves += 1;
        change.board = true;

        match bot_move.strategy {
            MoveStrategy::Random => {
                log_debug!("{} checked {} at random", self.computer.name(), bot_move.position);
            }
            MoveStrategy::Search => {
                log_debug!(
                    "{} checked {} (score {:?}, {} positions searched)",
                    self.computer.name(),
                    bot_move.position,
                    bot_move.score,
                    bot_move.nodes
                );
            }
        }

        if self.finish_if_terminal(change)? {
            return Ok(());
        }
        self.next_player(change)
    }

    fn next_player(&mut self, change: &mut SessionChange) -> Result<(), GameError> {
        if !self.is_active {
            return Err(GameError::GameNotActive);
        }
        let current = self.current_player.ok_or(GameError::GameNotActive)?;
        self.current_player = Some(current.opponent());
        change.turn = true;
        Ok(())
    }

    fn finish_if_terminal(&mut self, change: &mut SessionChange) -> Result<bool, GameError> {
        let winning_line = self.board.find_winning_line()?;
        if winning_line.is_none() && !self.board.is_full() {
            return Ok(false);
        }

        self.finish(winning_line.map(|line| line.owner), winning_line, change)?;
        Ok(true)
    }

    fn finish(
        &mut self,
        winner: Option<PlayerRole>,
        winning_line: Option<WinningLine>,
        change: &mut SessionChange,
    ) -> Result<(), GameError> {
        if !self.is_active {
            return Err(GameError::GameNotActive);
        }

        match winner {
            None => self.statistics.register_tie(),
            Some(PlayerRole::Human) => self.statistics.register_win(),
            Some(PlayerRole::Computer) => self.statistics.register_loss(),
        }

        self.current_player = None;
        self.winner = winner;
        self.winning_line = winning_line;
        self.is_active = false;
        change.turn = true;
        change.active = true;
        change.statistics = true;

        match winner {
            Some(role) => log!("Game {} won by {}", self.games_played, self.player(role).name()),
            None => log!("Game {} ended in a tie", self.games_played),
        }
        log!("Statistics (W-L-T): {}", self.statistics);
        Ok(())
    }

    fn notify(&self, change: &SessionChange) {
        if !change.any() {
            return;
        }
        for observer in &self.observers {
            observer.session_changed(self, change);
        }
    }

    #[cfg(test)]
    pub(crate) fn replace_board(&mut self, board: Board) {
        self.board = board;
    }
}
