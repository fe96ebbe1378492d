use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use swap_puzzle::game::Game;
use swap_puzzle::grid::{Difficulty, Move};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Level {
    /// 3x3 grid
    Easy,
    /// 4x4 grid
    Medium,
    /// 5x5 grid
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play the swap puzzle in the terminal", long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Level::Easy)]
    level: Level,

    /// Seed for the generated puzzle
    #[arg(long, default_value_t = 514514)]
    seed: u64,
}

fn parse_swap(input: &str) -> Option<Move> {
    let numbers: Vec<usize> = input
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<Result<_, _>>()
        .ok()?;
    match numbers.as_slice() {
        &[r1, c1, r2, c2] => Some(Move::new((r1, c1), (r2, c2))),
        _ => None,
    }
}

fn main() {
    let args = Args::parse();
    let grid = match Difficulty::from(args.level).generate(args.seed) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut game = Game::new(grid);
    println!("Welcome to the swap puzzle!");

    loop {
        println!("---------------------");
        println!("Swaps: {}", game.swaps());
        println!("{}", game.grid());

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("Solved in {} swaps!", game.swaps());
            println!("---------------------");
            break;
        }

        print!("Enter a swap (r1 c1 r2 c2), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if game.undo() {
                    println!("Swap undone.");
                } else {
                    println!("Nothing to undo.");
                }
            }
            "h" => match game.hint() {
                Ok(Some(mv)) => println!("Hint: swap {}", mv),
                Ok(None) => println!("The grid is already sorted."),
                Err(e) => println!("No hint available: {}", e),
            },
            other => match parse_swap(other) {
                Some(mv) => match game.play(mv) {
                    Ok(()) => println!("Swapped {}.", mv),
                    Err(e) => println!("{}", e),
                },
                None => println!("Invalid input format. Use 'r1 c1 r2 c2', 'h', 'u', or 'q'."),
            },
        }
    }
}
