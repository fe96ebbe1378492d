use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use swap_puzzle::constructive::solve_constructive;
use swap_puzzle::grid::GridState;
use swap_puzzle::heuristics::HeuristicKind;
use swap_puzzle::solver::{
    ExhaustiveGraphSolver, HeuristicSearch, SearchLimits, DEFAULT_MAX_EXHAUSTIVE_CELLS,
};
use swap_puzzle::utils::grid_from_str;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SolverChoice {
    /// Breadth-first search over the full state graph (small grids only)
    Exhaustive,
    /// A* search guided by a heuristic
    Heuristic,
    /// Fast row-by-row construction, not optimal
    Constructive,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicChoice {
    Zero,
    Misplaced,
    Manhattan,
}

impl From<HeuristicChoice> for HeuristicKind {
    fn from(choice: HeuristicChoice) -> Self {
        match choice {
            HeuristicChoice::Zero => HeuristicKind::Zero,
            HeuristicChoice::Misplaced => HeuristicKind::Misplaced,
            HeuristicChoice::Manhattan => HeuristicKind::Manhattan,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Solver used to find the swap sequence
    #[arg(short, long, value_enum, default_value_t = SolverChoice::Heuristic)]
    solver: SolverChoice,

    /// Heuristic for the A* solver
    #[arg(long, value_enum, default_value_t = HeuristicChoice::Manhattan)]
    heuristic: HeuristicChoice,

    /// Stop the A* solver after expanding this many states
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Largest grid (in cells) the exhaustive solver accepts
    #[arg(long, default_value_t = DEFAULT_MAX_EXHAUSTIVE_CELLS)]
    max_cells: usize,

    /// Rows of a random grid (used when no file is given)
    #[arg(long, requires = "cols")]
    rows: Option<usize>,

    /// Columns of a random grid (used when no file is given)
    #[arg(long, requires = "rows")]
    cols: Option<usize>,

    /// Seed for the random grid
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Path to the grid file ("m n" header, then m rows of n integers)
    #[arg(conflicts_with_all = ["rows", "cols"])]
    grid_file: Option<PathBuf>,
}

fn load_grid(args: &Args) -> Result<GridState, String> {
    match (&args.grid_file, args.rows, args.cols) {
        (Some(path), _, _) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?;
            grid_from_str(&content).map_err(|e| format!("Invalid grid file: {}", e))
        }
        (None, Some(rows), Some(cols)) => {
            GridState::new_random_with_seed(rows, cols, args.seed).map_err(|e| e.to_string())
        }
        _ => Err("Give a grid file or both --rows and --cols".to_string()),
    }
}

fn run(args: &Args) -> Result<(), String> {
    let grid = load_grid(args)?;
    println!("Initial grid:\n{}\n", grid);

    let limits = SearchLimits {
        max_expansions: args.max_expansions,
        max_cells: args.max_cells,
    };
    info!(solver = ?args.solver, rows = grid.rows(), cols = grid.cols(), "solving");

    let (moves, explored) = match args.solver {
        SolverChoice::Exhaustive => {
            let solution = ExhaustiveGraphSolver::new(&limits)
                .solve(&grid)
                .map_err(|e| e.to_string())?;
            (solution.moves, Some(solution.explored))
        }
        SolverChoice::Heuristic => {
            let kind = HeuristicKind::from(args.heuristic);
            let solution = HeuristicSearch::new(kind.function(), &limits)
                .solve(&grid)
                .map_err(|e| e.to_string())?;
            (solution.moves, Some(solution.explored))
        }
        SolverChoice::Constructive => (solve_constructive(&grid).map_err(|e| e.to_string())?, None),
    };

    println!("Moves ({}):", moves.len());
    if moves.is_empty() {
        println!("  No moves needed.");
    }
    for (i, mv) in moves.iter().enumerate() {
        println!("  Move {}: {}", i + 1, mv);
    }
    if let Some(explored) = explored {
        println!("States explored: {}", explored);
    }

    let solved = grid.apply_moves(&moves).map_err(|e| e.to_string())?;
    println!("\nFinal grid:\n{}", solved);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(message) = run(&args) {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
