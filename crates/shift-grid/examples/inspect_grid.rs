//! Print the geometry and coverage of a datum shift grid file.
//!
//! Usage: cargo run --example inspect_grid -- <grid-file>

use shift_grid::ShiftGrid;
use std::path::Path;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: inspect_grid <grid-file>");
        std::process::exit(1);
    }
    let path = Path::new(&args[1]);

    match ShiftGrid::from_file(path) {
        Ok(grid) => {
            let defined: usize = (0..grid.ny())
                .map(|j| (0..grid.nx()).filter(|&i| grid.is_cell_defined(i, j)).count())
                .sum();
            println!("Grid: {}", path.display());
            println!("  origin:  ({}, {})", grid.x0(), grid.y0());
            println!("  spacing: ({}, {})", grid.dx(), grid.dy());
            println!(
                "  size:    {} x {} ({} cells)",
                grid.nx(),
                grid.ny(),
                grid.len()
            );
            println!(
                "  defined: {} cells ({:.1}%)",
                defined,
                100.0 * defined as f64 / grid.len().max(1) as f64
            );
        }
        Err(error) => {
            eprintln!("Failed to load grid: {error}");
            std::process::exit(1);
        }
    }
}
