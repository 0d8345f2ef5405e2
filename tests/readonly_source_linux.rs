#![cfg(target_os = "linux")]

use hoist::{ScriptedPrompt, TraversalConfig};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::tempdir;

fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions.
    unsafe { libc::geteuid() == 0 }
}

fn set_mode(path: &Path, mode: u32) {
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

fn no_temp_files(dir: &Path) -> bool {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .all(|e| !e.file_name().to_string_lossy().starts_with(".hoist."))
}

#[test]
fn file_in_read_only_directory_is_not_copied() {
    if running_as_root() {
        eprintln!("skipping: root ignores directory permissions");
        return;
    }

    let td = tempdir().unwrap();
    let root = td.path().join("root");
    let ro = root.join("ro");
    let out = td.path().join("out");
    fs::create_dir_all(&ro).unwrap();
    fs::write(ro.join("f.txt"), "payload").unwrap();
    set_mode(&ro, 0o555);

    let cfg = TraversalConfig::new(vec![root.clone()], Some(out.clone()));
    let result = hoist::run(&cfg, ScriptedPrompt::default());

    set_mode(&ro, 0o755);
    let report = result.unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.moved, 0);
    assert!(ro.join("f.txt").is_file());
    assert!(!out.join("f.txt").exists(), "failed move left a copy behind");
    assert!(no_temp_files(&out));
}

#[test]
fn approved_overwrite_keeps_destination_when_move_fails() {
    if running_as_root() {
        eprintln!("skipping: root ignores directory permissions");
        return;
    }

    let td = tempdir().unwrap();
    let root = td.path().join("root");
    let ro = root.join("ro");
    let out = td.path().join("out");
    fs::create_dir_all(&ro).unwrap();
    fs::create_dir_all(&out).unwrap();
    fs::write(ro.join("dup.txt"), "incoming").unwrap();
    fs::write(out.join("dup.txt"), "original").unwrap();
    set_mode(&ro, 0o555);

    let cfg = TraversalConfig::new(vec![root.clone()], Some(out.clone()));
    let result = hoist::run(&cfg, ScriptedPrompt::new(["yes"]));

    set_mode(&ro, 0o755);
    let report = result.unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.overwritten, 0);
    assert_eq!(fs::read_to_string(out.join("dup.txt")).unwrap(), "original");
    assert_eq!(fs::read_to_string(ro.join("dup.txt")).unwrap(), "incoming");
    assert!(no_temp_files(&out));
}
