//! CLI entry point for the puzzle solver.
//!
//! Usage:
//!   rush-solver solve <puzzle.json> [options]
//!   rush-solver solve --stdin [options]
//!
//! Options:
//!   --algorithm <ucs|greedy|astar>    Search strategy (default: astar)
//!   --heuristic <distance|blocking|combined|path-complexity>
//!                                     Heuristic for greedy/astar (default: combined)
//!
//! Prints the solution as JSON. Exit code 0 when solvable, 1 when not,
//! 2 on malformed input.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use rush_solver::{solve, Direction, Heuristic, PuzzleConfig, Solution, Strategy, VehicleId};

#[derive(Parser)]
#[command(name = "rush-solver")]
#[command(about = "State-space search solver for Rush Hour sliding-block puzzles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle and print the move sequence
    Solve {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Search strategy
        #[arg(long, value_enum, default_value_t = Strategy::Astar)]
        algorithm: Strategy,

        /// Heuristic used by greedy and astar
        #[arg(long, value_enum, default_value_t = Heuristic::Combined)]
        heuristic: Heuristic,
    },
}

/// Output format for a solve run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solvable: bool,
    moves: usize,
    nodes_visited: usize,
    path: Vec<StepOutput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepOutput {
    board: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle: Option<VehicleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    direction: Option<Direction>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            algorithm,
            heuristic,
        } => {
            let json_content = read_input(file, stdin);

            let config: PuzzleConfig = match serde_json::from_str(&json_content) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("error: invalid puzzle JSON: {}", e);
                    process::exit(2);
                }
            };
            let initial = match config.into_state() {
                Ok(state) => state,
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(2);
                }
            };

            info!("solving with {:?} ({:?} heuristic)", algorithm, heuristic);
            let solution = solve(&initial, algorithm, heuristic);

            let output = format_solution(&solution);
            println!(
                "{}",
                serde_json::to_string_pretty(&output).expect("solution serializes")
            );

            process::exit(if solution.is_solvable() { 0 } else { 1 });
        }
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> String {
    if stdin {
        let mut buffer = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buffer) {
            eprintln!("error: failed to read stdin: {}", e);
            process::exit(2);
        }
        buffer
    } else if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("error: failed to read {}: {}", path.display(), e);
                process::exit(2);
            }
        }
    } else {
        eprintln!("error: provide a puzzle file or --stdin");
        process::exit(2);
    }
}

fn format_solution(solution: &Solution) -> SolveOutput {
    SolveOutput {
        solvable: solution.is_solvable(),
        moves: solution.move_count(),
        nodes_visited: solution.nodes_visited,
        path: solution
            .path
            .iter()
            .map(|step| StepOutput {
                board: step.state.grid().render(),
                vehicle: step.mv.map(|m| m.vehicle),
                direction: step.mv.map(|m| m.direction),
            })
            .collect(),
    }
}
