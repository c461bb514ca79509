//! Integration tests for loading input files and running comparisons.

use std::fs;

use pagereplay::{Error, PolicyKind, ProcessId, Simulation, SimulationConfig};
use tempfile::tempdir;

const INPUT: &str = "\
40 4096 3 2 1 8 2
1 3 1 2 3 4 1 2 5 1 2 3 4 5
2 2 6 7 6 8 7 6
";

fn load(text: &str) -> (Simulation, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, text).unwrap();
    let config = SimulationConfig::from_path(&path).unwrap();
    (Simulation::new(config), dir)
}

#[test]
fn test_load_from_file() {
    let (sim, _dir) = load(INPUT);
    let config = sim.config();

    assert_eq!(config.settings.lookahead_or_window_size, 2);
    assert_eq!(config.processes.len(), 2);
    assert_eq!(config.processes[1].id, ProcessId::new(2));
    assert_eq!(config.processes[1].frame_capacity, 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = SimulationConfig::from_path(dir.path().join("absent.txt"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_file_reports_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "40 4096 3 2 1 8 1\n1 3 1 two 3\n").unwrap();

    match SimulationConfig::from_path(&path) {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_compare_report_text() {
    let (sim, _dir) = load(INPUT);
    let reports = sim.compare().unwrap();
    assert_eq!(reports.len(), PolicyKind::ALL.len());

    let lifo = &reports[0];
    // Process 2 with 2 frames: 6 7 fault, 6 hit, 8 evicts 7, 7 evicts 8, 6 hit.
    assert_eq!(lifo.outcome(ProcessId::new(2)).unwrap().faults, 4);
    assert_eq!(
        lifo.to_string(),
        "\
Using LIFO Algorithm:
Total Faults
Current Page Fault For 1: 8
Current Page Fault For 2: 4
-- Total Replacements: 12 --

"
    );

    let text: String = reports.iter().map(|r| r.to_string()).collect();
    for kind in PolicyKind::ALL {
        assert!(text.contains(&format!("Using {} Algorithm:", kind)), "{}", kind);
    }
    assert_eq!(text.matches("Min Working Set Size").count(), 1);
    assert_eq!(text.matches("Max Working Set Size").count(), 1);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let (sim, _dir) = load(INPUT);
    for kind in PolicyKind::ALL {
        let param = sim.default_parameter(kind);
        assert_eq!(
            sim.run(kind, param).unwrap(),
            sim.run_parallel(kind, param).unwrap(),
            "{}",
            kind
        );
    }
}

#[test]
fn test_parameter_override() {
    let (sim, _dir) = load(INPUT);
    let narrow = sim.run(PolicyKind::WorkingSet, 1).unwrap();
    let wide = sim.run(PolicyKind::WorkingSet, 20).unwrap();

    assert_eq!(narrow.parameter, 1);
    assert!(narrow.working_set().unwrap().max <= 2);
    assert!(wide.working_set().unwrap().max >= narrow.working_set().unwrap().max);
}

#[test]
fn test_stats_track_every_run() {
    let (sim, _dir) = load(INPUT);
    sim.compare().unwrap();

    let snapshot = sim.stats().snapshot();
    assert_eq!(snapshot.references, 6 * (12 + 6));
    assert_eq!(snapshot.hits + snapshot.faults, snapshot.references);

    sim.stats().reset();
    assert_eq!(sim.stats().snapshot().references, 0);
}
