//! Render mirror boards to SVG.
//!
//! Usage:
//!   # Board after a cast sequence
//!   cargo run --release --bin render -- --board board.txt --casts "(1,-1) (3,0)" -o board.svg
//!
//!   # One frame per cast
//!   cargo run --release --bin render -- --board board.txt --casts "..." --output-dir ./frames/
//!
//!   # Random board
//!   cargo run --release --bin render -- --size 12 --seed 7 --casts "(0,-1)" -o board.svg

#[path = "../input.rs"]
mod input;

use std::env;
use std::fs;
use std::path::Path;

use mirrors_core::{Board, Coord, Orientation, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Constants
// ============================================================================

const CELL_SIZE: f32 = 32.0;
const CELL_GAP: f32 = 2.0;
const CELL_RADIUS: f32 = 3.0;
const BOARD_RADIUS: f32 = 8.0;
const MIRROR_INSET: f32 = 6.0;
const MIRROR_WIDTH: f32 = 3.0;

// Space around the ring of entry cells
const IMAGE_PADDING: f32 = 16.0;

// Colors
const BG_COLOR: &str = "#1a1a1a";
const BOARD_BG: &str = "#2a2a2a";
const CELL_BG: &str = "#3a3a3a";
const DEAD_CELL_BG: &str = "#232323";
const MIRROR_COLOR: &str = "#d0d0d0";

// Highlight colors
const HIGHLIGHT_LAST_CAST: &str = "#f39c12";
const HIGHLIGHT_ENTRY: &str = "#3498db";

// ============================================================================
// Input parsing
// ============================================================================

/// Parse "(r,c)" into a position; coordinates may be -1 on the ring.
fn parse_coords(s: &str) -> Option<Position> {
    let s = s.trim().trim_start_matches('(').trim_end_matches(')');
    let (row, col) = s.split_once(',')?;
    let row: Coord = row.trim().parse().ok()?;
    let col: Coord = col.trim().parse().ok()?;
    Some(Position::new(row, col))
}

/// Parse entries separated by whitespace.
fn parse_casts(s: &str) -> Option<Vec<Position>> {
    s.split_whitespace().map(parse_coords).collect()
}

// ============================================================================
// SVG generation
// ============================================================================

#[derive(Default)]
struct RenderOptions {
    highlight_last: bool,
    scale: f32,
}

/// Top-left corner of a cell, ring included.
fn cell_origin(p: Position) -> (f32, f32) {
    let x = IMAGE_PADDING + (p.col + 1) as f32 * (CELL_SIZE + CELL_GAP);
    let y = IMAGE_PADDING + (p.row + 1) as f32 * (CELL_SIZE + CELL_GAP);
    (x, y)
}

fn render_board_svg(board: &Board, opts: &RenderOptions) -> String {
    let scale = if opts.scale > 0.0 { opts.scale } else { 1.0 };
    let n = board.size();

    let span = (n + 2) as f32 * (CELL_SIZE + CELL_GAP) - CELL_GAP;
    let size = span + 2.0 * IMAGE_PADDING;

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        size * scale,
        size * scale,
        size,
        size
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        size, size, BG_COLOR
    ));
    svg.push('\n');

    // Interior backdrop
    let (bx, by) = cell_origin(Position::new(0, 0));
    let inner = n as f32 * (CELL_SIZE + CELL_GAP) - CELL_GAP;
    svg.push_str(&format!(
        r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}"/>"#,
        bx - CELL_GAP,
        by - CELL_GAP,
        inner + 2.0 * CELL_GAP,
        inner + 2.0 * CELL_GAP,
        BOARD_RADIUS,
        BOARD_BG
    ));
    svg.push('\n');

    let last = if opts.highlight_last {
        board.history().last_cast()
    } else {
        None
    };

    // Entry used by the last cast
    if let Some(view) = &last {
        let (x, y) = cell_origin(view.entry);
        svg.push_str(&format!(
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            x + CELL_SIZE / 2.0,
            y + CELL_SIZE / 2.0,
            CELL_SIZE / 4.0,
            HIGHLIGHT_ENTRY
        ));
        svg.push('\n');
    }

    for row in 0..n {
        for col in 0..n {
            let p = Position::new(row, col);
            let (x, y) = cell_origin(p);
            let alive = board.is_alive(p);
            let hit = last.as_ref().is_some_and(|view| view.destroyed.contains(&p));

            let (fill, stroke, stroke_width) = if hit {
                ("#5a4a3a", HIGHLIGHT_LAST_CAST, 2.0)
            } else if alive {
                (CELL_BG, "transparent", 0.0)
            } else {
                (DEAD_CELL_BG, "transparent", 0.0)
            };

            svg.push_str(&format!(
                r#"  <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                x, y, CELL_SIZE, CELL_SIZE, CELL_RADIUS, fill, stroke, stroke_width
            ));
            svg.push('\n');

            if !alive {
                continue;
            }

            let (left, right) = (x + MIRROR_INSET, x + CELL_SIZE - MIRROR_INSET);
            let (top, bottom) = (y + MIRROR_INSET, y + CELL_SIZE - MIRROR_INSET);
            let (y1, y2) = match board.mirrors().get(p) {
                Orientation::RightDiagonal => (top, bottom),
                Orientation::LeftDiagonal => (bottom, top),
                Orientation::Border => continue,
            };
            svg.push_str(&format!(
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                left, y1, right, y2, MIRROR_COLOR, MIRROR_WIDTH
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

// ============================================================================
// CLI
// ============================================================================

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  render --board FILE [--casts \"(r,c) ...\"] -o board.svg");
    eprintln!("  render --board FILE --casts \"(r,c) ...\" --output-dir ./frames/");
    eprintln!("  render --size N [--seed S] [--casts \"(r,c) ...\"] -o board.svg");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --board <file>         Board rows of R/L");
    eprintln!("  --size <n>             Random n x n board instead of --board");
    eprintln!("  --seed <u64>           Seed for the random board (default: 1)");
    eprintln!("  --casts <entries>      Entries to cast, e.g. \"(0,-1) (-1,2)\"");
    eprintln!("  -o, --output <file>    Output file (default: board.svg)");
    eprintln!("  --output-dir <dir>     Write one frame per cast");
    eprintln!("  --highlight-last       Highlight the last cast's entry and cells");
    eprintln!("  --scale <float>        Scale factor (default: 1.0)");
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let mut board_path: Option<String> = None;
    let mut size: Option<usize> = None;
    let mut seed: u64 = 1;
    let mut casts_str = String::new();
    let mut output: Option<String> = None;
    let mut output_dir: Option<String> = None;
    let mut opts = RenderOptions {
        scale: 1.0,
        ..Default::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--board" => {
                i += 1;
                board_path = args.get(i).cloned();
            }
            "--size" => {
                i += 1;
                size = args.get(i).and_then(|s| s.parse().ok());
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(1);
            }
            "--casts" => {
                i += 1;
                casts_str = args.get(i).cloned().unwrap_or_default();
            }
            "-o" | "--output" => {
                i += 1;
                output = args.get(i).cloned();
            }
            "--output-dir" => {
                i += 1;
                output_dir = args.get(i).cloned();
            }
            "--highlight-last" => {
                opts.highlight_last = true;
            }
            "--scale" => {
                i += 1;
                opts.scale = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(1.0);
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let rows = match (board_path, size) {
        (Some(path), _) => input::read_rows(Path::new(&path))
            .unwrap_or_else(|e| fail(&format!("{}: {}", path, e))),
        (None, Some(n)) => input::random_rows(&mut StdRng::seed_from_u64(seed), n),
        (None, None) => {
            print_usage();
            std::process::exit(1);
        }
    };
    let mut board = Board::new(&rows).unwrap_or_else(|e| fail(&e.to_string()));
    let casts = parse_casts(&casts_str).unwrap_or_else(|| fail("could not parse --casts"));

    // Batch mode: one frame per cast
    if let Some(dir) = output_dir {
        fs::create_dir_all(&dir).unwrap_or_else(|e| fail(&e.to_string()));
        let frame_opts = RenderOptions {
            highlight_last: true,
            scale: opts.scale,
        };

        let write = |board: &Board, index: usize| {
            let path = format!("{}/cast-{:03}.svg", dir, index);
            fs::write(&path, render_board_svg(board, &frame_opts))
                .unwrap_or_else(|e| fail(&e.to_string()));
            println!("Wrote {}", path);
        };

        write(&board, 0);
        for (i, &entry) in casts.iter().enumerate() {
            let destroyed = board.cast(entry).unwrap_or_else(|e| fail(&e.to_string()));
            println!("  {} destroyed {}", entry, destroyed);
            write(&board, i + 1);
        }

        println!("\nRendered {} frames", casts.len() + 1);
        return;
    }

    for &entry in &casts {
        board.cast(entry).unwrap_or_else(|e| fail(&e.to_string()));
    }

    let out_path = output.unwrap_or_else(|| "board.svg".to_string());
    fs::write(&out_path, render_board_svg(&board, &opts)).unwrap_or_else(|e| fail(&e.to_string()));
    println!(
        "Wrote {} ({} of {} cells destroyed)",
        out_path,
        board.destroyed_count(),
        board.size() as usize * board.size() as usize
    );
}
