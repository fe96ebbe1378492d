use clap::Parser;
use std::collections::HashMap;
use swap_puzzle::constructive::solve_constructive;
use swap_puzzle::grid::GridState;
use swap_puzzle::heuristics::HeuristicKind;
use swap_puzzle::solver::{HeuristicSearch, SearchLimits};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare solver path lengths on random grids", long_about = None)]
struct Args {
    /// Number of random grids to evaluate
    #[arg(short, long, default_value_t = 20)]
    grids: usize,

    #[arg(long, default_value_t = 3)]
    rows: usize,

    #[arg(long, default_value_t = 3)]
    cols: usize,

    /// Seed of the first grid; grid i uses seed + i
    #[arg(long, default_value_t = 0)]
    start_seed: u64,

    /// Expansion budget for each A* run
    #[arg(long, default_value_t = 200_000)]
    max_expansions: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let limits = SearchLimits {
        max_expansions: Some(args.max_expansions),
        ..SearchLimits::default()
    };
    let heuristics = [HeuristicKind::Misplaced, HeuristicKind::Manhattan];
    let mut lengths: HashMap<&str, Vec<usize>> = HashMap::new();

    println!(
        "Starting solver evaluation for {} {}x{} grids...",
        args.grids, args.rows, args.cols
    );

    for grid_idx in 0..args.grids {
        let seed = args.start_seed + grid_idx as u64;
        let grid = match GridState::new_random_with_seed(args.rows, args.cols, seed) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        println!("\nEvaluating grid {} (Seed: {})", grid_idx, seed);

        for kind in heuristics {
            match HeuristicSearch::new(kind.function(), &limits).solve(&grid) {
                Ok(solution) => {
                    println!(
                        "  Solver: A*/{:<10}, Length: {:<4}, Explored: {}",
                        kind.name(),
                        solution.moves.len(),
                        solution.explored
                    );
                    lengths.entry(kind.name()).or_default().push(solution.moves.len());
                }
                Err(e) => warn!(heuristic = kind.name(), seed, "search failed: {}", e),
            }
        }

        match solve_constructive(&grid) {
            Ok(path) => {
                println!("  Solver: {:<13}, Length: {}", "constructive", path.len());
                lengths.entry("constructive").or_default().push(path.len());
            }
            Err(e) => warn!(seed, "constructive solve failed: {}", e),
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("--- Average Path Lengths ---");

    let mut averages: Vec<(&str, f64, usize)> = lengths
        .iter()
        .map(|(name, values)| {
            let total: usize = values.iter().sum();
            (*name, total as f64 / values.len() as f64, values.len())
        })
        .collect();
    averages.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (name, average, solved) in averages {
        println!("Solver {:<13}: Average Length = {:.2} ({} grids)", name, average, solved);
    }
}
