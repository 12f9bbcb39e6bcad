//! CLI entry point for the Lights Out solver.
//!
//! Usage:
//!   lightsout solve <board.json> [options]
//!   lightsout solve --stdin [options]
//!   lightsout random --size <n>
//!   lightsout play [--size <n>]
//!
//! Boards are JSON grids of booleans (`[[true,false],[false,true]]`);
//! `random` emits one, `solve` consumes one and prints a JSON report.
//! Exit codes for `solve`: 0 solved, 1 no solution, 2 usage/parse error.

mod board;
mod solver;

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use board::{Board, Move};
use solver::{SolveReport, SolverConfig};

#[derive(Parser)]
#[command(name = "lightsout")]
#[command(about = "Exhaustive BFS solver for Lights Out toggle-grid puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest solution for a board
    Solve {
        /// Path to board JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the board from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Maximum search time in seconds (unbounded when omitted)
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum number of board states to explore (unbounded when omitted)
        #[arg(long)]
        max_states: Option<usize>,
    },

    /// Generate a random board and print it as JSON
    Random {
        /// Board side length
        #[arg(long, default_value = "3")]
        size: usize,
    },

    /// Play interactively in the terminal
    Play {
        /// Board side length
        #[arg(long, default_value = "3")]
        size: usize,
    },
}

/// JSON report printed by the `solve` subcommand.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solvable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<Move>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    search_exhausted: bool,
    states_explored: usize,
    time_elapsed_ms: u64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            timeout,
            max_states,
        } => cmd_solve(file, stdin, timeout, max_states),
        Commands::Random { size } => cmd_random(size),
        Commands::Play { size } => cmd_play(size),
    }
}

fn cmd_solve(
    file: Option<PathBuf>,
    stdin: bool,
    timeout: Option<u64>,
    max_states: Option<usize>,
) -> ExitCode {
    let json_content = if stdin {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading from stdin: {}", e);
            return ExitCode::from(2);
        }
        buffer
    } else if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file {:?}: {}", path, e);
                return ExitCode::from(2);
            }
        }
    } else {
        eprintln!("Error: Must provide either a file path or --stdin");
        return ExitCode::from(2);
    };

    let initial: Board = match serde_json::from_str(&json_content) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error parsing board JSON: {}", e);
            return ExitCode::from(2);
        }
    };

    let config = SolverConfig {
        timeout: timeout.map(Duration::from_secs),
        max_states,
    };

    let report = solver::solve_with_config(&initial, &config);
    let solved = report.solution.is_some();

    let output = format_report(report);
    println!("{}", serde_json::to_string_pretty(&output).expect("report serializes"));

    if solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn format_report(report: SolveReport) -> SolveOutput {
    SolveOutput {
        solvable: report.solution.is_some(),
        moves: report.solution.as_ref().map(|path| path.len()),
        solution: report.solution,
        search_exhausted: report.search_exhausted,
        states_explored: report.states_explored,
        time_elapsed_ms: report.time_elapsed_ms,
    }
}

fn cmd_random(size: usize) -> ExitCode {
    let board = Board::random(size, &mut rand::thread_rng());
    println!("{}", serde_json::to_string(&board).expect("board serializes"));
    ExitCode::SUCCESS
}

fn cmd_play(size: usize) -> ExitCode {
    let mut board = Board::random(size, &mut rand::thread_rng());

    println!("=== LIGHTS OUT ===");
    println!("Toggle bulbs until all are off!");
    println!("# = ON | . = OFF | 's' = Solve | 'q' = Quit");

    let stdin = io::stdin();
    while !board.is_solved() {
        println!("\n{}", board);
        print!("Enter ROW COL (or 's'/'q'): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!("\nGame aborted!");
                return ExitCode::SUCCESS;
            }
            Ok(_) => {}
        }

        match line.trim().to_lowercase().as_str() {
            "q" => {
                println!("Game aborted!");
                return ExitCode::SUCCESS;
            }
            "s" => match solver::solve(&board) {
                Some(path) => {
                    println!("\nOptimal solution ({} moves):", path.len());
                    for (i, &mv) in path.iter().enumerate() {
                        board = board.apply(mv);
                        println!("Move {}: toggle {}", i + 1, mv);
                        println!("{}", board);
                    }
                }
                None => println!("No solution found!"),
            },
            input => match parse_move(input, size) {
                Some(mv) => board = board.apply(mv),
                None => println!("Invalid input! Examples: '2 3' or 's'"),
            },
        }
    }

    println!("\n{}", board);
    println!("CONGRATULATIONS!");
    println!("All lights have been turned off!");
    ExitCode::SUCCESS
}

/// Parse "ROW COL" into an in-bounds move. User typos are a runtime
/// condition here, unlike out-of-range moves handed to `Board::apply`.
fn parse_move(input: &str, size: usize) -> Option<Move> {
    let mut parts = input.split_whitespace();
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || row >= size || col >= size {
        return None;
    }
    Some(Move::new(row, col))
}
