use tictactoe_common::games::tictactoe::{
    Board, Difficulty, GameSession, PlayerRole, Position, SessionChange, SessionObserver,
};

pub const HELP: &str = "Commands:
  <row> <col>            check a cell (zero-based)
  n [easy|hard|hardest]  start a new game
  s                      show statistics
  h                      show this help
  q                      quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Position),
    NewGame(Option<Difficulty>),
    Statistics,
    Help,
    Quit,
}

pub fn parse_difficulty(value: &str) -> Option<Difficulty> {
    match value.to_ascii_lowercase().as_str() {
        "easy" | "e" => Some(Difficulty::Easy),
        "hard" => Some(Difficulty::Hard),
        "hardest" => Some(Difficulty::Hardest),
        _ => None,
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(first) = parts.next() else {
        return Err("Empty input, type h for help".to_string());
    };

    let command = match first.to_ascii_lowercase().as_str() {
        "q" | "quit" => Command::Quit,
        "h" | "help" | "?" => Command::Help,
        "s" | "stats" => Command::Statistics,
        "n" | "new" => match parts.next() {
            None => Command::NewGame(None),
            Some(value) => Command::NewGame(Some(
                parse_difficulty(value).ok_or_else(|| format!("Unknown difficulty '{}'", value))?,
            )),
        },
        _ => {
            let row = parse_index(first)?;
            let col = parse_index(parts.next().ok_or("Expected '<row> <col>'")?)?;
            Command::Move(Position::new(row, col))
        }
    };

    if parts.next().is_some() {
        return Err("Too many arguments".to_string());
    }
    Ok(command)
}

fn parse_index(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a cell index", value))
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::from("  ");
    for col in 0..board.side() {
        out.push_str(&format!(" {}", col));
    }
    out.push('\n');

    for (row, cells) in board.cells().iter().enumerate() {
        out.push_str(&format!("{:>2}", row));
        for cell in cells {
            let symbol = cell.owner().map_or('.', PlayerRole::symbol);
            out.push(' ');
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

pub fn describe_result(session: &GameSession) -> String {
    match (session.winner(), session.winning_line()) {
        (Some(winner), Some(line)) => format!(
            "{} wins along {:?} from {} to {}",
            session.player(winner).name(),
            line.line,
            line.start,
            line.end
        ),
        (Some(winner), None) => format!("{} wins", session.player(winner).name()),
        (None, _) => "It's a tie".to_string(),
    }
}

/// Prints the board and game results to stdout.
pub struct ConsoleView;

impl SessionObserver for ConsoleView {
    fn session_changed(&self, session: &GameSession, change: &SessionChange) {
        if change.board {
            println!();
            print!("{}", render_board(session.board()));
        }

        if change.active && !session.is_active() {
            println!("{}", describe_result(session));
            println!("Score {}. Type n to play again or q to quit.", session.statistics());
        } else if change.turn && session.current_player() == Some(PlayerRole::Human) {
            println!("{} ({}), your move:", session.human().name(), PlayerRole::Human.symbol());
        }
    }
}
