use hoist::{PathFilter, ScriptedPrompt, TraversalConfig};
use std::fs;
use tempfile::tempdir;

fn tree() -> tempfile::TempDir {
    let td = tempdir().unwrap();
    let root = td.path().join("root");
    fs::create_dir_all(root.join("photos").join("2021")).unwrap();
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(root.join("photos").join("2021").join("cat.jpg"), "cat").unwrap();
    fs::write(root.join("photos").join("notes.txt"), "notes").unwrap();
    fs::write(root.join("build").join("out.o"), "obj").unwrap();
    td
}

#[test]
fn include_moves_only_matching_files() {
    let td = tree();
    let root = td.path().join("root");
    let out = td.path().join("out");

    let mut cfg = TraversalConfig::new(vec![root.clone()], Some(out.clone()));
    cfg.filter = PathFilter::from_patterns(Some(r"\.jpg$"), None).unwrap();
    let report = hoist::run(&cfg, ScriptedPrompt::default()).unwrap();

    // "photos" and "2021" do not match, yet their files were reached.
    assert!(out.join("cat.jpg").is_file());
    assert!(!out.join("notes.txt").exists());
    assert!(!out.join("out.o").exists());
    assert_eq!(report.moved, 1);
    assert_eq!(report.excluded, 2);
}

#[test]
fn exclude_leaves_matching_files_in_place() {
    let td = tree();
    let root = td.path().join("root");
    let out = td.path().join("out");

    let mut cfg = TraversalConfig::new(vec![root.clone()], Some(out.clone()));
    cfg.filter = PathFilter::from_patterns(None, Some("/build/")).unwrap();
    let report = hoist::run(&cfg, ScriptedPrompt::default()).unwrap();

    assert!(out.join("cat.jpg").is_file());
    assert!(out.join("notes.txt").is_file());
    assert!(root.join("build").join("out.o").is_file());
    assert_eq!(report.excluded, 1);
}

#[test]
fn exclude_matching_a_directory_name_does_not_prune_it() {
    let td = tree();
    let root = td.path().join("root");
    let out = td.path().join("out");

    // Matches the directory "2021" itself but no file path ends with it.
    let mut cfg = TraversalConfig::new(vec![root.clone()], Some(out.clone()));
    cfg.filter = PathFilter::from_patterns(None, Some("2021$")).unwrap();
    hoist::run(&cfg, ScriptedPrompt::default()).unwrap();

    assert!(out.join("cat.jpg").is_file());
}

#[test]
fn include_and_exclude_together_are_rejected() {
    assert!(PathFilter::from_patterns(Some("a"), Some("b")).is_err());
}
