mod common;

use church_state_sim::flush::{CSV_HEADER, flush_to_jsonl, write_csv};
use church_state_sim::model::*;
use church_state_sim::sim::run;
use common::read_lines;

fn sample_run() -> (Params, History) {
    let params = Params {
        timesteps: 24,
        shock_prob: 0.3,
        ..Params::default()
    };
    let history = run(params.clone(), 21).unwrap();
    (params, history)
}

#[test]
fn flush_produces_valid_jsonl_files() {
    let (params, history) = sample_run();
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&history, &params, dir.path()).unwrap();

    let history_path = dir.path().join("history.jsonl");
    let params_path = dir.path().join("params.json");
    assert!(history_path.exists());
    assert!(params_path.exists());

    let lines = read_lines(&history_path);
    assert_eq!(lines.len(), 24, "expected one line per timestep");

    for (i, line) in lines.iter().enumerate() {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(v.get("t").and_then(|t| t.as_u64()), Some(i as u64));
        for field in ["m", "l", "u", "s", "c", "r", "repression", "legitimacy"] {
            assert!(v.get(field).is_some(), "missing {field} on line {i}");
        }
        assert!(v.get("shock_occurred").and_then(|s| s.as_bool()).is_some());
    }
}

#[test]
fn flushed_history_reads_back_identically() {
    let (params, history) = sample_run();
    let dir = tempfile::tempdir().unwrap();
    flush_to_jsonl(&history, &params, dir.path()).unwrap();

    let restored: History = read_lines(&dir.path().join("history.jsonl"))
        .iter()
        .map(|line| serde_json::from_str::<HistoryRecord>(line).unwrap())
        .collect();
    assert_eq!(restored, history);

    let restored_params = Params::load(&dir.path().join("params.json")).unwrap();
    assert_eq!(restored_params, params);
}

#[test]
fn flush_creates_nested_output_dir() {
    let (params, history) = sample_run();
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("runs").join("seed_21");
    flush_to_jsonl(&history, &params, &nested).unwrap();
    assert!(nested.join("history.jsonl").exists());
}

#[test]
fn csv_export_has_header_and_row_per_step() {
    let (_, history) = sample_run();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("history.csv");

    write_csv(&history, &path).unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], CSV_HEADER);
    for (i, line) in lines[1..].iter().enumerate() {
        let cols: Vec<&str> = line.split(',').collect();
        assert_eq!(cols.len(), 10);
        assert_eq!(cols[0], i.to_string());
        let total: u64 = cols[1..4].iter().map(|c| c.parse::<u64>().unwrap()).sum();
        assert_eq!(total, 10_000);
        assert!(cols[9] == "True" || cols[9] == "False");
    }
}
