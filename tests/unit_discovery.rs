// tests/unit_discovery.rs
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tidysweep_core::discovery::{filter_sources, list_sources, CompileCommand, COMPILE_DB};
use tidysweep_core::error::SweepError;

fn touch(root: &Path, rel: &str) -> PathBuf {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(&p, "int x;\n").unwrap();
    p
}

fn entry(dir: &Path, file: &Path) -> CompileCommand {
    CompileCommand {
        directory: dir.to_path_buf(),
        file: file.to_path_buf(),
    }
}

fn write_db(build: &Path, files: &[PathBuf]) {
    let entries: Vec<serde_json::Value> = files
        .iter()
        .map(|f| {
            serde_json::json!({
                "directory": build,
                "command": format!("c++ -c {}", f.display()),
                "file": f,
            })
        })
        .collect();
    fs::create_dir_all(build).unwrap();
    fs::write(build.join(COMPILE_DB), serde_json::to_string(&entries).unwrap()).unwrap();
}

#[test]
fn duplicates_kept_once_in_first_seen_order() {
    let d = TempDir::new().unwrap();
    let a = touch(d.path(), "sql/a.cc");
    let b = touch(d.path(), "sql/b.cc");
    let entries = vec![
        entry(d.path(), &b),
        entry(d.path(), &a),
        entry(d.path(), &b),
        entry(d.path(), &a),
    ];
    assert_eq!(filter_sources(&entries, None), vec![b, a]);
}

#[test]
fn scan_root_limits_to_prefix() {
    let d = TempDir::new().unwrap();
    let inside = touch(d.path(), "sql/a.cc");
    let outside = touch(d.path(), "storage/b.cc");
    let entries = vec![entry(d.path(), &outside), entry(d.path(), &inside)];

    let root = d.path().join("sql");
    let files = filter_sources(&entries, Some(&root));
    assert_eq!(files, vec![inside]);
    assert!(files.iter().all(|f| f.starts_with(&root)));
}

#[test]
fn relative_entries_match_scan_root_after_folding() {
    let d = TempDir::new().unwrap();
    let source = touch(d.path(), "sql/handler.cc");
    let build = d.path().join("bld").join("sql");
    fs::create_dir_all(&build).unwrap();
    let entries = vec![entry(&build, Path::new("../../sql/handler.cc"))];

    let files = filter_sources(&entries, Some(&d.path().join("sql")));
    assert_eq!(files, vec![source]);
}

#[test]
fn third_party_excluded_even_under_scan_root() {
    let d = TempDir::new().unwrap();
    let vendored = touch(d.path(), "extra/zlib/inflate.c");
    let own = touch(d.path(), "mysys/charset.cc");
    let entries = vec![entry(d.path(), &vendored), entry(d.path(), &own)];

    assert_eq!(filter_sources(&entries, Some(&d.path().join("extra"))), Vec::<PathBuf>::new());
    assert_eq!(filter_sources(&entries, None), vec![own]);
}

#[test]
fn missing_files_are_dropped() {
    let d = TempDir::new().unwrap();
    let gone = d.path().join("sql/removed.cc");
    let kept = touch(d.path(), "sql/kept.cc");
    let entries = vec![entry(d.path(), &gone), entry(d.path(), &kept)];
    assert_eq!(filter_sources(&entries, None), vec![kept]);
}

#[test]
fn list_sources_reads_database_from_build_path() {
    let d = TempDir::new().unwrap();
    let a = touch(d.path(), "src/a.cc");
    let b = touch(d.path(), "src/b.cc");
    let build = d.path().join("bld");
    write_db(&build, &[a.clone(), b.clone(), a.clone()]);

    assert_eq!(list_sources(&build, None).unwrap(), vec![a, b]);
}

#[test]
fn empty_database_is_not_an_error() {
    let d = TempDir::new().unwrap();
    write_db(d.path(), &[]);
    assert!(list_sources(d.path(), None).unwrap().is_empty());
}

#[test]
fn malformed_database_is_reported() {
    let d = TempDir::new().unwrap();
    fs::write(d.path().join(COMPILE_DB), "{\"not\": \"an array\"}").unwrap();
    assert!(matches!(
        list_sources(d.path(), None),
        Err(SweepError::CompileDb { .. })
    ));
}

#[test]
fn missing_database_is_io_error() {
    let d = TempDir::new().unwrap();
    assert!(matches!(list_sources(d.path(), None), Err(SweepError::Io { .. })));
}
