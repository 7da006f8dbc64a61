//! Fragile Mirrors playout driver
//!
//! Clears a board over and over with random casts, deduplicating visited
//! states by fingerprint and self-checking undo and branching as it goes.

mod input;
mod score;
mod stats;

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use mirrors_core::{Board, Fingerprint, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::stats::PlayoutStats;

const DEFAULT_SIZE: usize = 50;
const DEFAULT_GAMES: u64 = 100;
const DEFAULT_SEED: u64 = 1;
const DEFAULT_CHECK_EVERY: usize = 16;
const LOG_INTERVAL_SECS: u64 = 5;

struct Config {
    size: usize,
    games: u64,
    seed: u64,
    board: Option<PathBuf>,
    check_every: usize,
    quiet: bool,
}

fn print_usage() {
    println!("Usage: playout [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --board FILE       Board file (rows of R/L); random board if omitted");
    println!("  --size N           Side of the random board (default {})", DEFAULT_SIZE);
    println!("  --games G          Number of playouts (default {})", DEFAULT_GAMES);
    println!("  --seed S           Seed for board, casts and fingerprint keys (default {})", DEFAULT_SEED);
    println!("  --check-every K    Undo self-check every K casts, 0 to disable (default {})", DEFAULT_CHECK_EVERY);
    println!("  --quiet            No periodic progress lines");
    println!("  -h, --help         Show this help");
}

fn parse_args(args: &[String]) -> std::result::Result<Option<Config>, String> {
    let mut config = Config {
        size: DEFAULT_SIZE,
        games: DEFAULT_GAMES,
        seed: DEFAULT_SEED,
        board: None,
        check_every: DEFAULT_CHECK_EVERY,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--board" | "--size" | "--games" | "--seed" | "--check-every" => {
                i += 1;
                let value = args.get(i).ok_or_else(|| format!("{} needs a value", flag))?;
                let bad = |_| format!("invalid value for {}: {}", flag, value);
                match flag {
                    "--board" => config.board = Some(PathBuf::from(value)),
                    "--size" => config.size = value.parse().map_err(bad)?,
                    "--games" => config.games = value.parse().map_err(bad)?,
                    "--seed" => config.seed = value.parse().map_err(bad)?,
                    _ => config.check_every = value.parse().map_err(bad)?,
                }
            }
            "--quiet" => config.quiet = true,
            "-h" | "--help" => return Ok(None),
            _ => return Err(format!("Unknown argument: {}", flag)),
        }
        i += 1;
    }

    Ok(Some(config))
}

/// Undo the last cast and cast it again; both states must match exactly.
fn check_round_trip(board: &mut Board, before: Fingerprint) -> Result<bool> {
    let Some(&entry) = board.cast_history().last() else {
        return Ok(true);
    };
    let after = board.fingerprint();
    let destroyed = board.destroyed_count();
    let links = board.links().clone();

    board.restore()?;
    let restored = board.fingerprint() == before;
    board.cast(entry)?;

    Ok(restored
        && board.fingerprint() == after
        && board.destroyed_count() == destroyed
        && *board.links() == links)
}

/// Branch halfway through the history and replay the rest.
fn check_branch(board: &Board) -> Result<bool> {
    let half = board.cast_count() / 2;
    let mut branch = board.branch(half)?;
    for &entry in &board.cast_history()[half..] {
        branch.cast(entry)?;
    }
    Ok(branch == *board && branch.fingerprint() == board.fingerprint())
}

/// Clear one board with random casts. Returns false when interrupted.
fn play_game(
    base: &Board,
    rng: &mut StdRng,
    config: &Config,
    stats: &mut PlayoutStats,
    seen: &mut HashSet<Fingerprint>,
    running: &AtomicBool,
) -> Result<bool> {
    let mut board = base.branch(0)?;
    let candidates = board.cast_candidates().to_vec();

    while !board.all_destroyed() {
        if !running.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let entry = candidates[rng.random_range(0..candidates.len())];
        let before = board.fingerprint();
        let destroyed = board.cast(entry)?;

        if destroyed == 0 {
            board.restore()?;
            stats.empty_casts += 1;
            stats.record_check(board.fingerprint() == before);
            continue;
        }

        if !seen.insert(board.fingerprint()) {
            stats.duplicate_states += 1;
        }
        stats.record_cast(destroyed, board.empty_line_count(), board.is_last_isolated());

        if config.check_every > 0 && board.cast_count() % config.check_every == 0 {
            let passed = check_round_trip(&mut board, before)?;
            stats.record_check(passed);
        }
    }

    stats.record_check(check_branch(&board)?);
    stats.record_game(board.cast_count());
    Ok(true)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = match parse_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    println!("Fragile Mirrors Playout");
    println!("=======================");

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing up...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let rows = match &config.board {
        Some(path) => match input::read_rows(path) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => input::random_rows(&mut rng, config.size),
    };

    let start = Instant::now();
    let base = match Board::with_seed(&rows, config.seed) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let n = base.size() as usize;

    println!("Board: {}x{} ({} cells)", n, n, n * n);
    println!("Cast candidates: {}", base.cast_candidates().len());
    match score::empty_lines_param(n) {
        Some(weight) => println!("Empty-line weight: {}", weight),
        None => println!(
            "Empty-line weight: none (table covers {}..={})",
            score::MIN_SIZE,
            score::MAX_SIZE
        ),
    }
    println!("Built in {:.3}s\n", start.elapsed().as_secs_f64());

    let mut stats = PlayoutStats::new();
    let mut seen: HashSet<Fingerprint> = HashSet::new();

    for _ in 0..config.games {
        match play_game(&base, &mut rng, &config, &mut stats, &mut seen, &running) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                eprintln!("Engine error: {}", e);
                std::process::exit(1);
            }
        }
        if !config.quiet && stats.should_log(LOG_INTERVAL_SECS) {
            stats.log_progress(seen.len());
        }
    }

    println!("\n=======================");
    println!("Playout complete!");
    println!("=======================");
    println!("Unique states: {}", seen.len());
    stats.print_summary();

    if stats.checks_failed > 0 {
        eprintln!("\n{} self-checks failed", stats.checks_failed);
        std::process::exit(2);
    }
}
