//! Quadsmash: a quadtree strategy board game.
//!
//! Command-line front end for the rules engine: watch automated players
//! compete on a random board, or generate a board and inspect it.
//!
//! ## Usage
//!
//! - `quadsmash demo` - Automated players play a short game
//! - `quadsmash demo --turns 12 --difficulty 50 --seed 7` - Same, tuned
//! - `quadsmash dump --max-depth 2` - Generate a board and print its tree

use anyhow::{Result, ensure};
use clap::{Parser, Subcommand};

use quadsmash::block::{Block, generate_board};
use quadsmash::constants::colour_name;
use quadsmash::goal::flatten;
use quadsmash::player::{Action, Move, Player, apply_move, create_players};

/// Quadsmash: a quadtree strategy board game
#[derive(Parser)]
#[command(name = "quadsmash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a short game between a random player and a smart player
    Demo {
        /// Side length of the square board
        #[arg(long, default_value_t = 640)]
        size: u32,
        /// Maximum subdivision depth of the board
        #[arg(long, default_value_t = 3)]
        max_depth: u32,
        /// Number of turns to play
        #[arg(long, default_value_t = 20)]
        turns: u32,
        /// Candidate moves the smart player weighs per turn
        #[arg(long, default_value_t = 10)]
        difficulty: u32,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a random board and print its tree and flattened grid
    Dump {
        /// Side length of the square board
        #[arg(long, default_value_t = 640)]
        size: u32,
        /// Maximum subdivision depth of the board
        #[arg(long, default_value_t = 3)]
        max_depth: u32,
        /// Seed for reproducible boards
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            size,
            max_depth,
            turns,
            difficulty,
            seed,
        } => run_demo(size, max_depth, turns, difficulty, seed),
        Commands::Dump {
            size,
            max_depth,
            seed,
        } => run_dump(size, max_depth, seed),
    }
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    }
}

fn check_dimensions(size: u32, max_depth: u32) -> Result<()> {
    ensure!(size > 0, "board size must be positive");
    ensure!(
        max_depth <= 10,
        "max depth {max_depth} flattens to a grid too large to print"
    );
    Ok(())
}

fn run_demo(size: u32, max_depth: u32, turns: u32, difficulty: u32, seed: Option<u64>) -> Result<()> {
    check_dimensions(size, max_depth)?;
    let mut rng = make_rng(seed);

    println!("Quadsmash: random vs. smart (difficulty {difficulty})\n");

    let mut board = generate_board(max_depth, size, &mut rng);
    let mut players = create_players(0, 1, &[difficulty], &mut rng);
    for player in &players {
        println!(
            "Player {} ({}): {}",
            player.id(),
            kind_label(player),
            player.goal().description()
        );
    }

    println!("\n=== Starting Board ===");
    print_grid(&board);
    println!();

    for turn in 1..=turns {
        for index in 0..players.len() {
            players[index].set_ready();
            let Some(mv) = players[index].generate_move(&board, &mut rng) else {
                continue;
            };
            let id = players[index].id();
            if apply_move(&mut board, &mv, &mut rng) {
                println!("turn {turn:>3}  player {id}  {}", describe_move(&mv));
            } else {
                println!("turn {turn:>3}  player {id}  passes");
            }
        }
    }

    println!("\n=== Final Board ===");
    print_grid(&board);
    println!();
    for player in &players {
        println!(
            "Player {} final score: {}",
            player.id(),
            player.goal().score(&board)
        );
    }
    Ok(())
}

fn run_dump(size: u32, max_depth: u32, seed: Option<u64>) -> Result<()> {
    check_dimensions(size, max_depth)?;
    let mut rng = make_rng(seed);

    let board = generate_board(max_depth, size, &mut rng);
    println!("=== Block Tree ===");
    print!("{board}");
    println!("\n=== Flattened Grid ===");
    print_grid(&board);
    Ok(())
}

fn kind_label(player: &Player) -> &'static str {
    match player {
        Player::Human(_) => "human",
        Player::Random(_) => "random",
        Player::Smart(_) => "smart",
    }
}

fn describe_move(mv: &Move) -> String {
    let verb = match mv.action {
        Action::Rotate(rotation) => format!("rotates {rotation:?}"),
        Action::Swap(direction) => format!("swaps {direction:?}"),
        Action::Smash => "smashes".to_string(),
        Action::Paint(colour) => format!("paints {}", colour_name(colour)),
        Action::Combine => "combines".to_string(),
        Action::Pass => "passes".to_string(),
    };
    format!("{verb} the block at {:?}, level {}", mv.position, mv.level)
}

/// Render the flattened board as a grid of colour initials.
fn print_grid(board: &Block) {
    let grid = flatten(board);
    for row in 0..grid.side() {
        let mut line = String::with_capacity(grid.side() * 2);
        for column in 0..grid.side() {
            let initial = colour_name(grid.get(column, row)).chars().next().unwrap_or('?');
            line.push(initial);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }
}
