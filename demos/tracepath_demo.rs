//! Runs every algorithm on the canonical scenarios and prints each replayed
//! trace as a text overlay.
//!
//! Run: RUST_LOG=debug cargo run --bin tracepath-demo

use tracepath_demos::{frame, scenarios, summary};
use tracepath_paths::{Algorithm, Finder, PathFinder};

fn main() {
    env_logger::init();

    let mut finder = Finder::default();
    for (name, scenario) in scenarios() {
        let grid = match scenario.build() {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("Error: {name}: {e}");
                std::process::exit(1);
            }
        };
        log::info!(
            "scenario {name}: {}x{}, {} -> {}",
            grid.width(),
            grid.height(),
            scenario.start,
            scenario.end
        );
        println!("== {name} ==");

        for algorithm in Algorithm::ALL {
            finder.set_algorithm(algorithm);
            let search = match finder.find_path(&grid, scenario.start, scenario.end) {
                Ok(search) => search,
                Err(e) => {
                    eprintln!("Error: {name}: {e}");
                    std::process::exit(1);
                }
            };
            println!("{}", summary(&search));
            // Halfway through the trace, then the finished overlay.
            let half = search.trace.len() / 2;
            let mid = frame(&grid, &search, half);
            let last = frame(&grid, &search, search.trace.len());
            for (a, b) in mid.lines().zip(last.lines()) {
                println!("  {a}   {b}");
            }
            println!();
        }
    }
}
