use crate::error::GameError;
use super::types::{PlayerRole, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    owner: Option<PlayerRole>,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            position: Position::new(row, col),
            owner: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn owner(&self) -> Option<PlayerRole> {
        self.owner
    }

    pub fn is_checked(&self) -> bool {
        self.owner.is_some()
    }

    pub(crate) fn check(&mut self, player: PlayerRole) -> Result<(), GameError> {
        if self.owner.is_some() {
            return Err(GameError::AlreadyChecked(self.position));
        }
        self.owner = Some(player);
        Ok(())
    }

    pub(crate) fn uncheck(&mut self) {
        self.owner = None;
    }
}
