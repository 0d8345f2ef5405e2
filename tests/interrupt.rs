use hoist::{ScriptedPrompt, TraversalConfig, shutdown};
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
#[serial]
fn requested_shutdown_stops_before_any_move() {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("f.txt"), "f").unwrap();

    shutdown::request();
    let cfg = TraversalConfig::new(vec![root.clone()], None);
    let report = hoist::run(&cfg, ScriptedPrompt::default());
    shutdown::reset();

    let report = report.unwrap();
    assert!(report.interrupted);
    assert_eq!(report.moved, 0);
    assert!(root.join("sub").join("f.txt").is_file());
}

#[test]
#[serial]
fn run_proceeds_after_reset() {
    shutdown::reset();
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("f.txt"), "f").unwrap();

    let cfg = TraversalConfig::new(vec![root.clone()], None);
    let report = hoist::run(&cfg, ScriptedPrompt::default()).unwrap();

    assert!(!report.interrupted);
    assert_eq!(report.moved, 1);
}
