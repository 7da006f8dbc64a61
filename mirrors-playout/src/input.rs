//! Board sources for the playout driver.

use std::fs;
use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::Rng;

/// Read board rows from a text file.
///
/// One row per line; blank lines and lines starting with `#` are skipped.
pub fn read_rows(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_rows(&text))
}

pub fn parse_rows(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Uniformly random `size × size` board.
pub fn random_rows(rng: &mut StdRng, size: usize) -> Vec<String> {
    (0..size)
        .map(|_| {
            (0..size)
                .map(|_| if rng.random_bool(0.5) { 'R' } else { 'L' })
                .collect()
        })
        .collect()
}
