//! Hand-checked scenarios
//!
//! Loads `fixtures/scenarios.json` and verifies for each board:
//! - Cells destroyed by every cast
//! - Final rendering, empty-line count and completion flag
//! - Restoring every cast returns to the initial state

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mirrors_core::{Board, NeighborLinks, Position};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TestData {
    version: String,
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    description: String,
    rows: Vec<String>,
    casts: Vec<CastData>,
    render: Vec<String>,
    empty_lines: usize,
    all_destroyed: bool,
}

#[derive(Debug, Deserialize)]
struct CastData {
    entry: [i16; 2],
    destroyed: usize,
}

fn load_scenarios(path: &Path) -> TestData {
    let file = File::open(path).expect("Failed to open scenarios file");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse JSON")
}

#[test]
fn test_fixture_scenarios() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scenarios.json");
    let data = load_scenarios(&path);
    assert_eq!(data.version, "1");
    assert!(!data.scenarios.is_empty());

    let mut failures: Vec<String> = Vec::new();

    for scenario in &data.scenarios {
        let mut errors: Vec<String> = Vec::new();
        let mut board = Board::new(&scenario.rows).expect("fixture board must parse");
        let initial_fingerprint = board.fingerprint();

        // 1. Casts
        for cast in &scenario.casts {
            let entry = Position::new(cast.entry[0], cast.entry[1]);
            let destroyed = board.cast(entry).expect("fixture entry must be valid");
            if destroyed != cast.destroyed {
                errors.push(format!(
                    "cast {}: destroyed {}, expected {}",
                    entry, destroyed, cast.destroyed
                ));
            }
        }

        // 2. Final state
        if board.render() != scenario.render {
            errors.push(format!("render {:?}, expected {:?}", board.render(), scenario.render));
        }
        if board.empty_line_count() != scenario.empty_lines {
            errors.push(format!(
                "empty lines {}, expected {}",
                board.empty_line_count(),
                scenario.empty_lines
            ));
        }
        if board.all_destroyed() != scenario.all_destroyed {
            errors.push(format!("all_destroyed {}", board.all_destroyed()));
        }
        let total: usize = scenario.casts.iter().map(|c| c.destroyed).sum();
        if board.destroyed_count() != total {
            errors.push(format!("destroyed count {}, expected {}", board.destroyed_count(), total));
        }

        // 3. Undo everything
        while board.restore().is_ok() {}
        if board.fingerprint() != initial_fingerprint {
            errors.push("fingerprint not restored".to_string());
        }
        if *board.links() != NeighborLinks::new(board.size()) {
            errors.push("links not restored".to_string());
        }

        if !errors.is_empty() {
            failures.push(format!("{}: {}", scenario.description, errors.join("; ")));
        }
    }

    assert!(failures.is_empty(), "Scenario failures:\n{}", failures.join("\n"));
}
