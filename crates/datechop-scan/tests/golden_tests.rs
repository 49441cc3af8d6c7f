use std::fs;
use std::path::{Path, PathBuf};

use datechop_core::FormatEngine;
use datechop_scan::{ScanOptions, Scanner};
use similar::{ChangeTag, TextDiff};

fn crate_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf()
}

fn fixture_dir() -> PathBuf {
    crate_root().join("fixtures")
}

fn golden_dir() -> PathBuf {
    crate_root().join("golden")
}

fn update_golden() -> bool {
    std::env::var("UPDATE_GOLDEN").is_ok()
}

fn diff_strings(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(&format!("{sign}{change}"));
    }
    out
}

/// One predicate per non-empty line of `<stem>.predicates`.
fn read_predicates(fixture_path: &Path) -> Vec<String> {
    let path = fixture_path.with_extension("predicates");
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read predicates {path:?}: {e}"));
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn golden_json_output() {
    let fixtures = fixture_dir();
    let golden = golden_dir();
    let engine = FormatEngine::new().expect("Failed to build format engine");

    let mut entries: Vec<_> = fs::read_dir(&fixtures)
        .expect("Failed to read fixtures directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    assert!(
        !entries.is_empty(),
        "No fixture files found in {fixtures:?}"
    );

    for entry in entries {
        let fixture_path = entry.path();
        let stem = fixture_path.file_stem().unwrap().to_str().unwrap();
        let golden_path = golden.join(format!("{stem}.json"));

        let predicates = read_predicates(&fixture_path);
        let scanner = Scanner::new(&engine, ScanOptions::default(), &predicates)
            .unwrap_or_else(|e| panic!("Failed to build scanner for {stem}: {e}"));
        let report = scanner
            .scan([&fixture_path])
            .unwrap_or_else(|e| panic!("Scan failed for {stem}: {e}"));

        let mut actual = serde_json::to_string_pretty(&report).expect("Failed to serialize report");
        actual.push('\n');

        if update_golden() {
            fs::create_dir_all(&golden).ok();
            fs::write(&golden_path, &actual)
                .unwrap_or_else(|e| panic!("Failed to write golden file {golden_path:?}: {e}"));
            eprintln!("Updated golden file: {golden_path:?}");
            continue;
        }

        let expected = fs::read_to_string(&golden_path).unwrap_or_else(|e| {
            panic!(
                "Golden file {golden_path:?} not found: {e}\n\
                 Hint: Run with UPDATE_GOLDEN=1 to generate golden files"
            )
        });

        if actual != expected {
            let diff = diff_strings(&expected, &actual);
            panic!(
                "Golden test mismatch for {stem}:\n\n\
                 {diff}\n\n\
                 Run with UPDATE_GOLDEN=1 to refresh snapshots"
            );
        }
    }
}

#[test]
fn fixtures_scanned_together_merge_by_time() {
    let fixtures = fixture_dir();
    let engine = FormatEngine::new().unwrap();
    let scanner = Scanner::new(&engine, ScanOptions::default(), ["GET", "Pushing"]).unwrap();

    // syslog timestamps carry no year and sort first
    let report = scanner
        .scan([
            fixtures.join("twelve_hour.log"),
            fixtures.join("daisies.log"),
            fixtures.join("syslog.log"),
        ])
        .unwrap();

    let keys: Vec<_> = report.buckets().iter().map(|b| b.timestamp).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(keys.len(), 3 + 5 + 3);
    assert_eq!(keys[0].to_string(), "1900-09-21 18:10:00");
}
