//! Benchmark runner: times every level in a file and records the results.
//!
//! Levels are solved in parallel with rayon; every run owns its board
//! lineage and (for graph search) its visited set, so runs never share
//! mutable state. Each level is solved `NUM_RUNS` times and the durations
//! averaged; the step count comes from the first run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use coronet::{
    load_levels, record_path, write_records_csv, BoardState, Error, Heuristic, Level, RunRecord,
    Solver, Strategy,
};

const NUM_RUNS: u32 = 5;

/// Benchmarks every `(category, heuristic)` pair and writes one CSV per
/// pair under `out_dir`. The file stem of each level file names its
/// category.
pub fn run(files: &[PathBuf], out_dir: &Path, strategy: Strategy) -> Result<(), Error> {
    fs::create_dir_all(out_dir)?;

    for path in files {
        let category = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("levels")
            .to_string();
        let levels = load_levels(path)?;

        for heuristic in Heuristic::all() {
            let records = bench_category(&levels, &category, strategy, heuristic)?;
            let out_path = record_path(out_dir, &category, heuristic);
            write_records_csv(&records, &out_path)?;
            println!("wrote {}", out_path.display());
        }
    }

    Ok(())
}

fn bench_category(
    levels: &[Level],
    category: &str,
    strategy: Strategy,
    heuristic: Heuristic,
) -> Result<Vec<RunRecord>, Error> {
    let progress = ProgressBar::new(levels.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        progress.set_style(style.progress_chars("█▓▒░ "));
    }
    progress.set_message(format!(
        "{} / {} / {}",
        category,
        strategy.name(),
        heuristic.name()
    ));

    let records: Result<Vec<RunRecord>, Error> = levels
        .par_iter()
        .map(|level| {
            let record = bench_level(level, strategy, heuristic);
            progress.inc(1);
            record
        })
        .collect();

    progress.finish();
    records
}

fn bench_level(level: &Level, strategy: Strategy, heuristic: Heuristic) -> Result<RunRecord, Error> {
    let initial = BoardState::from_level(level)?;
    let solver = Solver::new(strategy, heuristic);

    let mut total_nanos = 0u64;
    let mut steps_taken = 0;
    let mut solved = false;

    for run in 0..NUM_RUNS {
        let timer = Instant::now();
        let outcome = solver.solve(initial.clone())?;
        total_nanos += timer.elapsed().as_nanos() as u64;

        if run == 0 {
            steps_taken = outcome.steps;
            solved = outcome.solution.is_some();
        }
    }

    Ok(RunRecord {
        id: level.id,
        size: level.size as u32,
        duration_nanos: total_nanos / u64::from(NUM_RUNS),
        steps_taken,
        solved,
    })
}
