//! Colored-Region Queens Solver
//!
//! Solves queen-placement puzzles where an N×N board is partitioned into N
//! color regions and every row, column and region must hold exactly one
//! queen, with no two queens adjacent. Levels are read from JSONL files;
//! solved boards render in the terminal, and a benchmark mode records solve
//! durations and step counts for offline analysis.

mod bench;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use coronet::{load_levels, BoardState, Error, Heuristic, Solver, Strategy};

/// Solves colored-region queen-placement puzzles.
#[derive(Parser)]
#[command(name = "coronet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve levels from a JSONL file and display the solved boards.
    Solve {
        /// Level file, one JSON level per line.
        file: PathBuf,
        /// Solve only the level with this id.
        #[arg(long)]
        id: Option<u32>,
        #[arg(long, value_enum, default_value = "graph")]
        strategy: StrategyArg,
        #[arg(long, value_enum, default_value = "fewest-remaining-regions")]
        heuristic: HeuristicArg,
    },
    /// Display the unsolved boards from a JSONL file.
    Show {
        file: PathBuf,
        /// Show only the level with this id.
        #[arg(long)]
        id: Option<u32>,
    },
    /// Benchmark level files and write per-category CSV records.
    Bench {
        /// Level files; each file stem names its category.
        files: Vec<PathBuf>,
        /// Output directory for the CSV records.
        #[arg(long, default_value = "stats")]
        out: PathBuf,
        #[arg(long, value_enum, default_value = "graph")]
        strategy: StrategyArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Plain backtracking without revisit protection.
    Tree,
    /// Backtracking with a visited-state set.
    Graph,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Tree => Strategy::Tree,
            StrategyArg::Graph => Strategy::Graph,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum HeuristicArg {
    /// Row-major scan order.
    None,
    /// Candidates leaving the fewest unsatisfied regions first.
    FewestRemainingRegions,
    /// Candidates in the emptiest-starved regions first.
    SmallestRegionFirst,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::None => Heuristic::None,
            HeuristicArg::FewestRemainingRegions => Heuristic::FewestRemainingRegions,
            HeuristicArg::SmallestRegionFirst => Heuristic::SmallestRegionFirst,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve {
            file,
            id,
            strategy,
            heuristic,
        } => run_solve(&file, id, strategy.into(), heuristic.into()),
        Command::Show { file, id } => run_show(&file, id),
        Command::Bench {
            files,
            out,
            strategy,
        } => bench::run(&files, &out, strategy.into()),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Solves the selected levels and prints each solved board.
fn run_solve(
    file: &std::path::Path,
    id: Option<u32>,
    strategy: Strategy,
    heuristic: Heuristic,
) -> Result<(), Error> {
    let solver = Solver::new(strategy, heuristic);

    for level in select_levels(file, id)? {
        let initial = BoardState::from_level(&level)?;
        let outcome = solver.solve(initial)?;

        match outcome.solution {
            Some(solved) => {
                println!("level {} solved in {} steps", level.id, outcome.steps);
                render::print_board(&solved);
            }
            None => println!("level {}: no solution ({} steps)", level.id, outcome.steps),
        }
    }

    Ok(())
}

/// Prints the selected levels without solving them.
fn run_show(file: &std::path::Path, id: Option<u32>) -> Result<(), Error> {
    for level in select_levels(file, id)? {
        let board = BoardState::from_level(&level)?;
        println!("level {} ({}x{})", level.id, level.size, level.size);
        render::print_board(&board);
    }

    Ok(())
}

fn select_levels(file: &std::path::Path, id: Option<u32>) -> Result<Vec<coronet::Level>, Error> {
    let levels = load_levels(file)?;
    Ok(levels
        .into_iter()
        .filter(|level| id.map_or(true, |wanted| level.id == wanted))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coronet::{format_board, format_regions, Level};

    #[test]
    fn test_initial_board_rendering() {
        let level = Level::from_rows(
            1,
            &[
                "AABBBCCC",
                "ADBDBECC",
                "ADBDBCCC",
                "ADDDBFGC",
                "ADDDBFGG",
                "ADHDBFGG",
                "HDHDBFFG",
                "HHHHGGGG",
            ],
        );
        let board = BoardState::from_level(&level).unwrap();

        let output = format!("{}\n{}", format_regions(&board), format_board(&board));
        insta::assert_snapshot!(output);
    }

    #[test]
    fn test_solved_board_rendering() {
        let level = Level::from_rows(2, &["AAAAA", "BBBBB", "CCCCC", "DDDDD", "EEEEE"]);
        let board = BoardState::from_level(&level).unwrap();
        let outcome = Solver::new(Strategy::Tree, Heuristic::None)
            .solve(board)
            .unwrap();

        let solved = outcome.solution.expect("row-region board is solvable");
        insta::assert_snapshot!(format_board(&solved));
    }
}
