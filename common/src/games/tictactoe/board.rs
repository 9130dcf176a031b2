use std::fmt;

use crate::error::GameError;
use super::cell::Cell;
use super::types::{Line, PlayerRole, Position, STANDARD_BOARD_SIDE, WinningLine};
use super::win_detector::check_win_with_line;

/// Square grid whose side is also the number of checks needed to win.
///
/// `Clone` produces a fully independent copy; search workers rely on this to
/// explore hypothetical moves without touching the live board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    side: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(side: usize) -> Result<Self, GameError> {
        if side == 0 {
            return Err(GameError::InvalidBoardSize(side));
        }
        Ok(Self::build(side))
    }

    fn build(side: usize) -> Self {
        let cells = (0..side)
            .map(|row| (0..side).map(|col| Cell::new(row, col)).collect())
            .collect();

        Self { side, cells }
    }

    /// Builds a board from rows of owners, for fixtures and benches.
    pub fn from_owners(rows: &[Vec<Option<PlayerRole>>]) -> Result<Self, GameError> {
        let mut board = Self::new(rows.len())?;
        for (row, owners) in rows.iter().enumerate() {
            if owners.len() != board.side {
                return Err(GameError::InvalidLineLength {
                    expected: board.side,
                    actual: owners.len(),
                });
            }
            for (col, owner) in owners.iter().enumerate() {
                if let Some(player) = owner {
                    board.check(Position::new(row, col), *player)?;
                }
            }
        }
        Ok(board)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Cells in row-major order, one `Vec` per row.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> Result<&Cell, GameError> {
        self.cells
            .get(position.row)
            .and_then(|row| row.get(position.col))
            .ok_or(GameError::OutOfBounds {
                position,
                side: self.side,
            })
    }

    fn cell_mut(&mut self, position: Position) -> Result<&mut Cell, GameError> {
        let side = self.side;
        self.cells
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
            .ok_or(GameError::OutOfBounds { position, side })
    }

    pub fn owner(&self, position: Position) -> Result<Option<PlayerRole>, GameError> {
        Ok(self.cell(position)?.owner())
    }

    pub fn check(&mut self, position: Position, player: PlayerRole) -> Result<(), GameError> {
        self.cell_mut(position)?.check(player)
    }

    pub fn uncheck(&mut self, position: Position) -> Result<(), GameError> {
        self.cell_mut(position)?.uncheck();
        Ok(())
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_checked())
            .map(Cell::position)
            .collect()
    }

    pub fn checked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_checked())
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Cell::is_checked)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_checked())
    }

    /// Every line in win-scan order: rows, columns, main diagonal, anti-diagonal.
    pub fn lines(&self) -> impl Iterator<Item = Line> + use<> {
        let side = self.side;
        (0..side)
            .map(Line::Row)
            .chain((0..side).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }

    /// Walks the cells backing `line` as they are stored, so a malformed grid
    /// shows up as a line of the wrong length.
    pub fn line_cells(&self, line: Line) -> LineCells<'_> {
        LineCells {
            rows: &self.cells,
            side: self.side,
            line,
            index: 0,
        }
    }

    pub fn rows(&self) -> Vec<Vec<&Cell>> {
        (0..self.side)
            .map(|row| self.line_cells(Line::Row(row)).collect())
            .collect()
    }

    /// Column-major view of the grid.
    pub fn columns(&self) -> Vec<Vec<&Cell>> {
        (0..self.side)
            .map(|col| self.line_cells(Line::Column(col)).collect())
            .collect()
    }

    pub fn diagonals(&self) -> Vec<Vec<&Cell>> {
        [Line::Diagonal, Line::AntiDiagonal]
            .into_iter()
            .map(|line| self.line_cells(line).collect())
            .collect()
    }

    pub fn find_winner(&self) -> Result<Option<PlayerRole>, GameError> {
        Ok(check_win_with_line(self)?.map(|winning| winning.owner))
    }

    pub fn find_winning_line(&self) -> Result<Option<WinningLine>, GameError> {
        check_win_with_line(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::build(STANDARD_BOARD_SIDE)
    }
}

pub struct LineCells<'a> {
    rows: &'a [Vec<Cell>],
    side: usize,
    line: Line,
    index: usize,
}

impl<'a> Iterator for LineCells<'a> {
    type Item = &'a Cell;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.index;
        let cell = match self.line {
            Line::Row(row) => self.rows.get(row)?.get(i),
            Line::Column(col) => self.rows.get(i)?.get(col),
            Line::Diagonal => self.rows.get(i)?.get(i),
            Line::AntiDiagonal => self.rows.get(i)?.get(self.side.checked_sub(i + 1)?),
        }?;
        self.index += 1;
        Some(cell)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.owner().map_or('.', PlayerRole::symbol))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const H: Option<PlayerRole> = Some(PlayerRole::Human);
    pub(crate) const C: Option<PlayerRole> = Some(PlayerRole::Computer);
    pub(crate) const E: Option<PlayerRole> = None;

    #[test]
    fn test_zero_side_is_rejected() {
        assert_eq!(Board::new(0), Err(GameError::InvalidBoardSize(0)));
    }

    #[test]
    fn test_new_board_is_square_and_empty() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.side(), 4);
        assert_eq!(board.empty_cells().len(), 16);
        assert!(board.is_empty());
        assert!(!board.is_full());
    }

    #[test]
    fn test_check_twice_fails_with_already_checked() {
        let mut board = Board::new(3).unwrap();
        let position = Position::new(1, 1);
        board.check(position, PlayerRole::Human).unwrap();

        let result = board.check(position, PlayerRole::Computer);

        assert_eq!(result, Err(GameError::AlreadyChecked(position)));
        assert_eq!(board.owner(position).unwrap(), Some(PlayerRole::Human));
    }

    #[test]
    fn test_out_of_bounds_position_is_rejected() {
        let mut board = Board::new(3).unwrap();
        let result = board.check(Position::new(3, 0), PlayerRole::Human);
        assert_eq!(
            result,
            Err(GameError::OutOfBounds {
                position: Position::new(3, 0),
                side: 3
            })
        );
    }

    #[test]
    fn test_empty_cells_are_row_major() {
        let board = Board::from_owners(&[vec![H, E, E], vec![E, C, E], vec![E, E, H]]).unwrap();

        let empty = board.empty_cells();

        assert_eq!(
            empty,
            vec![
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 0),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_every_line_has_side_cells() {
        let board = Board::new(5).unwrap();
        for line in board.lines() {
            assert_eq!(board.line_cells(line).count(), 5, "{:?}", line);
        }
        assert_eq!(board.rows().len(), 5);
        assert_eq!(board.columns().len(), 5);
        assert_eq!(board.diagonals().len(), 2);
    }

    #[test]
    fn test_column_view_is_column_major() {
        let board = Board::from_owners(&[vec![H, E], vec![C, E]]).unwrap();
        let columns = board.columns();
        assert_eq!(columns[0][0].owner(), Some(PlayerRole::Human));
        assert_eq!(columns[0][1].owner(), Some(PlayerRole::Computer));
        assert_eq!(columns[1][0].position(), Position::new(0, 1));
    }

    #[test]
    fn test_anti_diagonal_runs_top_right_to_bottom_left() {
        let board = Board::new(3).unwrap();
        let positions: Vec<Position> = board
            .line_cells(Line::AntiDiagonal)
            .map(Cell::position)
            .collect();
        assert_eq!(
            positions,
            vec![Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)]
        );
    }

    #[test]
    fn test_clone_is_independent_of_original() {
        let mut original = Board::from_owners(&[vec![H, E, E], vec![E, E, E], vec![E, E, E]]).unwrap();
        let mut copy = original.clone();

        original.check(Position::new(1, 1), PlayerRole::Computer).unwrap();
        copy.uncheck(Position::new(0, 0)).unwrap();
        copy.check(Position::new(2, 2), PlayerRole::Human).unwrap();

        assert_eq!(copy.owner(Position::new(1, 1)).unwrap(), None);
        assert_eq!(original.owner(Position::new(0, 0)).unwrap(), Some(PlayerRole::Human));
        assert_eq!(original.owner(Position::new(2, 2)).unwrap(), None);
    }

    #[test]
    fn test_is_full_after_every_cell_checked() {
        let board = Board::from_owners(&[vec![H, C, H], vec![H, C, C], vec![C, H, H]]).unwrap();
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
        assert_eq!(board.checked_count(), 9);
    }

    #[test]
    fn test_display_renders_symbols() {
        let board = Board::from_owners(&[vec![H, E], vec![E, C]]).unwrap();
        assert_eq!(board.to_string(), "X.\n.O\n");
    }
}
