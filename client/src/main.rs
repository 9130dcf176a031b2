mod config;
mod console;

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tictactoe_common::games::tictactoe::{
    Difficulty, GameSession, GameStatistics, SessionSettings,
};
use tictactoe_common::{log, log_debug, logger};

use config::{ClientConfigManager, Config, get_config_manager};
use console::{Command, ConsoleView, HELP, parse_command};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Hard,
    Hardest,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Hardest => Difficulty::Hardest,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe", about = "Play tic-tac-toe against a minimax bot")]
struct Args {
    /// Overrides the difficulty stored in the config file.
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Path to the YAML config; defaults to a file next to the executable.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,

    /// Fixes the random source so games can be replayed.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let mut config = config_manager.get_config()?;

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose || config.verbose);

    let difficulty = args.difficulty.map(Difficulty::from).unwrap_or(config.difficulty);
    let mut session = GameSession::new(SessionSettings {
        human_name: config.human_name.clone(),
        computer_name: config.computer_name.clone(),
        max_search_threads: config.max_search_threads,
        seed: args.seed,
    });
    session.subscribe(Box::new(ConsoleView));
    log_debug!("Session seed {}", session.seed());

    println!("{}", HELP);
    start_game(&mut session, difficulty, &mut config, &config_manager)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Statistics) => print_statistics(session.statistics()),
            Ok(Command::Move(position)) => {
                if let Err(error) = session.submit_human_move(position) {
                    println!("{}", error);
                }
            }
            Ok(Command::NewGame(requested)) => {
                if !session.can_create_new_game() {
                    println!("Finish the current game first");
                    continue;
                }
                let difficulty = requested.unwrap_or(session.difficulty());
                start_game(&mut session, difficulty, &mut config, &config_manager)?;
            }
            Err(message) => println!("{}", message),
        }
        io::stdout().flush()?;
    }

    print_statistics(session.statistics());
    log!("Client exiting after {} games", session.games_played());
    Ok(())
}

fn start_game(
    session: &mut GameSession,
    difficulty: Difficulty,
    config: &mut Config,
    config_manager: &ClientConfigManager,
) -> Result<(), Box<dyn std::error::Error>> {
    session.new_game(difficulty)?;

    if config.difficulty != difficulty {
        config.difficulty = difficulty;
        if let Err(error) = config_manager.set_config(config) {
            log!("Failed to save config: {}", error);
        }
    }
    Ok(())
}

fn print_statistics(statistics: &GameStatistics) {
    println!(
        "Wins {}, losses {}, ties {} ({} games)",
        statistics.wins(),
        statistics.losses(),
        statistics.ties(),
        statistics.games()
    );
}
