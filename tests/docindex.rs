use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn responsa_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("responsa");
    path
}

fn run_docs(root: &Path, extra: &[&str]) -> (String, String, bool) {
    let binary = responsa_binary();
    let output = Command::new(&binary)
        .arg("--root")
        .arg(root)
        .arg("docs")
        .args(extra)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run responsa binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn read_index(root: &Path) -> Vec<Value> {
    let text = fs::read_to_string(root.join("responsa.json")).unwrap();
    serde_json::from_str::<Value>(&text)
        .unwrap()
        .as_array()
        .unwrap()
        .clone()
}

fn setup_docs() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let year_dir = tmp.path().join("responsa").join("2025");
    fs::create_dir_all(&year_dir).unwrap();
    fs::write(
        year_dir.join("ruling.html"),
        "<html><head><title>בית דין</title></head>\
         <body><h1>פסק דין בעניין פלוני</h1><p>גוף ההחלטה ונימוקיה.</p></body></html>",
    )
    .unwrap();
    tmp
}

#[test]
fn test_docs_indexes_html_with_extracted_title() {
    let tmp = setup_docs();

    let (stdout, stderr, success) = run_docs(tmp.path(), &[]);
    assert!(success, "docs failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("new entries: 1"));

    let index = read_index(tmp.path());
    assert_eq!(index.len(), 1);
    let entry = &index[0];
    assert_eq!(entry["title_he"], "פסק דין בעניין פלוני");
    assert_eq!(entry["title_en"], "פסק דין בעניין פלוני");
    assert_eq!(entry["category"], "other");
    assert_eq!(entry["category_he"], "אחר");
    assert_eq!(entry["category_en"], "Other");
    assert_eq!(entry["file"], "responsa/2025/ruling.html");
    assert_eq!(entry["type"], "html");
    assert_eq!(entry["number"], 1);
    // dd/mm/YYYY from the file's mtime.
    let date = entry["date"].as_str().unwrap();
    assert_eq!(date.len(), 10);
    assert_eq!(&date[2..3], "/");
    assert_eq!(&date[5..6], "/");
}

#[test]
fn test_docs_rerun_adds_nothing() {
    let tmp = setup_docs();

    run_docs(tmp.path(), &[]);
    let (stdout, _, success) = run_docs(tmp.path(), &[]);
    assert!(success);
    assert!(stdout.contains("new entries: 0"), "got: {}", stdout);
    assert_eq!(read_index(tmp.path()).len(), 1);
}

#[test]
fn test_docs_numbers_continue_after_existing_max() {
    let tmp = setup_docs();
    fs::write(
        tmp.path().join("responsa.json"),
        r#"[{"number": 12, "title_he": "Existing", "file": "responsa/2024/x.html"}]"#,
    )
    .unwrap();

    let (_, _, success) = run_docs(tmp.path(), &[]);
    assert!(success);

    let index = read_index(tmp.path());
    assert_eq!(index.len(), 2);
    let new_entry = index
        .iter()
        .find(|e| e["file"] == "responsa/2025/ruling.html")
        .unwrap();
    assert_eq!(new_entry["number"], 13);
}

#[test]
fn test_docs_keeps_index_sorted_by_number() {
    let tmp = setup_docs();
    fs::write(
        tmp.path().join("responsa.json"),
        r#"[{"number": 42, "title_he": "High", "file": "responsa/2024/high.html"},
            {"number": 3, "title_he": "Low", "file": "responsa/2024/low.html"}]"#,
    )
    .unwrap();

    let (_, _, success) = run_docs(tmp.path(), &[]);
    assert!(success);

    let numbers: Vec<i64> = read_index(tmp.path())
        .iter()
        .map(|e| e["number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![3, 42, 43]);
}

#[test]
fn test_docs_pdf_uses_file_stem() {
    let tmp = TempDir::new().unwrap();
    let year_dir = tmp.path().join("responsa").join("2025");
    fs::create_dir_all(&year_dir).unwrap();
    fs::write(year_dir.join("verdict-17.pdf"), b"%PDF-1.4 not really").unwrap();
    fs::write(year_dir.join("notes.txt"), "ignored entirely").unwrap();

    let (_, _, success) = run_docs(tmp.path(), &[]);
    assert!(success);

    let index = read_index(tmp.path());
    assert_eq!(index.len(), 1, "unsupported extensions are ignored");
    assert_eq!(index[0]["title_he"], "verdict-17");
    assert_eq!(index[0]["summary_he"], "");
    assert_eq!(index[0]["type"], "pdf");
}

#[test]
fn test_docs_dry_run_writes_nothing() {
    let tmp = setup_docs();

    let (stdout, _, success) = run_docs(tmp.path(), &["--dry-run"]);
    assert!(success);
    assert!(stdout.contains("new entries: 1"));
    assert!(stdout.contains("dry run"));
    assert!(!tmp.path().join("responsa.json").exists());
}

#[test]
fn test_docs_without_document_directory_is_a_noop() {
    let tmp = TempDir::new().unwrap();

    let (stdout, _, success) = run_docs(tmp.path(), &[]);
    assert!(success);
    assert!(stdout.contains("nothing to index"));
    assert!(!tmp.path().join("responsa.json").exists());
}

#[test]
fn test_docs_aborts_on_damaged_index() {
    let tmp = setup_docs();
    fs::write(tmp.path().join("responsa.json"), "\"not an array\"").unwrap();

    let (_, stderr, success) = run_docs(tmp.path(), &[]);
    assert!(!success);
    assert!(stderr.contains("must be a JSON array"));
    let text = fs::read_to_string(tmp.path().join("responsa.json")).unwrap();
    assert_eq!(text, "\"not an array\"");
}
