use crate::error::GameError;
use super::board::Board;
use super::types::{Line, PlayerRole, WinningLine};

pub fn check_win(board: &Board) -> Result<Option<PlayerRole>, GameError> {
    Ok(check_win_with_line(board)?.map(|winning| winning.owner))
}

/// Scans rows, then columns, then both diagonals and returns the first line
/// fully owned by one player.
pub fn check_win_with_line(board: &Board) -> Result<Option<WinningLine>, GameError> {
    for line in board.lines() {
        if let Some(owner) = line_owner(board, line)? {
            let first = board.line_cells(line).next();
            let last = board.line_cells(line).last();
            if let (Some(first), Some(last)) = (first, last) {
                return Ok(Some(WinningLine::new(
                    owner,
                    line,
                    first.position(),
                    last.position(),
                )));
            }
        }
    }
    Ok(None)
}

fn line_owner(board: &Board, line: Line) -> Result<Option<PlayerRole>, GameError> {
    let expected = board.side();
    let mut count = 0;
    let mut owner = None;
    let mut uniform = true;

    for cell in board.line_cells(line) {
        count += 1;
        match (cell.owner(), owner) {
            (None, _) => uniform = false,
            (Some(player), None) if count == 1 => owner = Some(player),
            (Some(player), Some(first)) if player == first => {}
            _ => uniform = false,
        }
    }

    if count != expected {
        return Err(GameError::InvalidLineLength {
            expected,
            actual: count,
        });
    }

    Ok(if uniform { owner } else { None })
}
