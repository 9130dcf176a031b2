use std::fmt;

use serde::{Deserialize, Serialize};

pub const STANDARD_BOARD_SIDE: usize = 3;
pub const HARDEST_BOARD_SIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Identity of a participant. Cells and turn checks compare roles by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Human,
    Computer,
}

impl PlayerRole {
    pub fn opponent(self) -> Self {
        match self {
            PlayerRole::Human => PlayerRole::Computer,
            PlayerRole::Computer => PlayerRole::Human,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            PlayerRole::Human => 'X',
            PlayerRole::Computer => 'O',
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerRole::Human => write!(f, "human"),
            PlayerRole::Computer => write!(f, "computer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    role: PlayerRole,
}

impl Player {
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, PlayerRole::Human)
    }

    pub fn computer(name: impl Into<String>) -> Self {
        Self::new(name, PlayerRole::Computer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> PlayerRole {
        self.role
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
    Hardest,
}

impl Difficulty {
    pub fn board_side(self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Hard => STANDARD_BOARD_SIDE,
            Difficulty::Hardest => HARDEST_BOARD_SIDE,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Hardest => write!(f, "hardest"),
        }
    }
}

/// A row, column or diagonal. Scan order for win detection is rows, columns,
/// main diagonal, anti-diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Row(usize),
    Column(usize),
    Diagonal,
    AntiDiagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub owner: PlayerRole,
    pub line: Line,
    pub start: Position,
    pub end: Position,
}

impl WinningLine {
    pub fn new(owner: PlayerRole, line: Line, start: Position, end: Position) -> Self {
        Self {
            owner,
            line,
            start,
            end,
        }
    }
}
