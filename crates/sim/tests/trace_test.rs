use std::fs;

use clap::Parser;
use paging::{PageId, PagingEngine, Policy};
use sim::commands::parse_command;
use sim::config::{Args, SimConfig, load_trace};
use sim::printer::format_view;
use sim::repl::{Reply, execute};
use tempfile::TempDir;

#[test]
fn test_trace_file_drives_engine() {
    let temp_dir = TempDir::new().unwrap();
    let trace_path = temp_dir.path().join("belady.trace");
    fs::write(
        &trace_path,
        "# classic reference string\n1 2 3 4\n1, 2, 5 # second row\nP1 P2 P3 P4 P5\n",
    )
    .unwrap();

    let args = Args::try_parse_from([
        "pagesim",
        "--trace",
        trace_path.to_str().unwrap(),
        "--policy",
        "lru",
        "--step",
        "6",
    ])
    .unwrap();
    let config = SimConfig::resolve_with(args, |_| None).unwrap();
    assert_eq!(config.sequence.len(), 12);
    assert_eq!(config.sequence[6], PageId(5));

    let mut engine =
        PagingEngine::new(config.total_frames, config.sequence, config.policy).unwrap();
    engine.set_step(config.step).unwrap();
    assert_eq!(engine.fault_count(), 5);
    assert!(format_view(&engine.current_view()).contains("evicted P3 from frame 2"));
}

#[test]
fn test_missing_and_empty_trace_files() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.trace");
    let err = load_trace(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("read trace file"));

    let empty = temp_dir.path().join("empty.trace");
    fs::write(&empty, "# nothing here\n\n").unwrap();
    assert!(load_trace(&empty).is_err());
}

#[test]
fn test_scripted_session() {
    let mut engine = PagingEngine::new(
        4,
        vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]
            .into_iter()
            .map(PageId)
            .collect(),
        Policy::FirstInFirstOutSlot,
    )
    .unwrap();

    for line in ["step 5", "n"] {
        let command = parse_command(line).unwrap();
        assert_eq!(execute(&mut engine, command).unwrap(), Reply::View);
    }
    assert_eq!(engine.current_step(), 6);
    assert_eq!(engine.fault_count(), 5);

    let command = parse_command("policy").unwrap();
    execute(&mut engine, command).unwrap();
    let command = parse_command("6").unwrap();
    execute(&mut engine, command).unwrap();
    let output = format_view(&engine.current_view());
    assert!(output.contains("Algorithm: LRU, Faults: 5"));
    assert!(output.contains("evicted P3"));

    let command = parse_command("quit").unwrap();
    assert_eq!(execute(&mut engine, command).unwrap(), Reply::Quit);
}
