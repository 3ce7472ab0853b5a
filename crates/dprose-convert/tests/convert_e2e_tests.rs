//! End-to-end tests for the convert binary
//!
//! These run the compiled binary against files in a temporary directory and
//! check:
//! - output files and index contents
//! - index and record files refer to each other
//! - exit codes and messages for each kind of fatal error

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const METADATA_CSV: &str = "\
ID,Repositorium,Vorname Autor,Nachname Autor,Gesamtname Autor,Titel,Dateiname,verwendetes Datum
1,LibraryA,Jane,Doe,Jane Doe,Book One,one.txt,
2,LibraryB,John,Roe,John Roe,Book Two,two.txt,1901
5,LibraryB,Ann,Poe,Ann Poe,Book Five,five.txt,1875
";

const RECORDS: &str = r#"{"dprose_id": 1, "score": 0.9}
{"dprose_id": 5, "text": "Es war einmal", "annotations": [{"start": 0, "end": 3, "spans": [[0, 3]], "predicted": "process", "predicted_score": 2}]}
"#;

/// Workspace for one test run
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(records: &str, metadata_name: &str, metadata: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dprose.jsonlines"), records).unwrap();
        std::fs::write(dir.path().join(metadata_name), metadata).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn out(&self) -> PathBuf {
        self.path("out")
    }

    fn command(&self, metadata_name: &str) -> Command {
        let mut cmd = Command::cargo_bin("convert").unwrap();
        cmd.env_remove("DPROSE_LOG_LEVEL")
            .arg(self.path("dprose.jsonlines"))
            .arg(self.path(metadata_name))
            .arg(self.out());
        cmd
    }

    fn read_json(&self, name: &str) -> Value {
        let content = std::fs::read_to_string(self.out().join(name)).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

// ============================================================================
// Successful Runs
// ============================================================================

#[test]
fn test_convert_writes_records_and_index() {
    let fixture = Fixture::new(RECORDS, "metadata.csv", METADATA_CSV);

    fixture
        .command("metadata.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 records and 2 index entries"));

    assert_eq!(fixture.read_json("dprose_1.json"), json!({"score": 0.9}));
    assert_eq!(
        fixture.read_json("dprose_5.json"),
        json!({
            "text": "Es war einmal",
            "annotations": [{"start": 0, "end": 3, "spans": [[0, 3]], "predicted": "process", "predicted_score": 2}]
        })
    );
    assert_eq!(
        fixture.read_json("index.json"),
        json!([
            {"id": "dprose_1", "source": "LibraryA", "author": "Jane Doe", "title": "Book One", "releaseYear": null},
            {"id": "dprose_5", "source": "LibraryB", "author": "Ann Poe", "title": "Book Five", "releaseYear": "1875"}
        ])
    );
}

#[test]
fn test_index_and_record_files_match() {
    let fixture = Fixture::new(RECORDS, "metadata.csv", METADATA_CSV);
    fixture.command("metadata.csv").assert().success();

    let mut expected: BTreeSet<String> = fixture
        .read_json("index.json")
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| format!("{}.json", entry["id"].as_str().unwrap()))
        .collect();
    expected.insert("index.json".to_string());

    assert_eq!(file_names(&fixture.out()), expected);
}

#[test]
fn test_convert_is_idempotent() {
    let fixture = Fixture::new(RECORDS, "metadata.csv", METADATA_CSV);

    fixture.command("metadata.csv").assert().success();
    let first: Vec<_> = ["dprose_1.json", "dprose_5.json", "index.json"]
        .iter()
        .map(|name| std::fs::read(fixture.out().join(name)).unwrap())
        .collect();

    fixture.command("metadata.csv").assert().success();
    let second: Vec<_> = ["dprose_1.json", "dprose_5.json", "index.json"]
        .iter()
        .map(|name| std::fs::read(fixture.out().join(name)).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_convert_tsv_metadata() {
    let tsv = METADATA_CSV.replace(',', "\t");
    let fixture = Fixture::new(RECORDS, "metadata.tsv", &tsv);

    fixture.command("metadata.tsv").assert().success();
    assert_eq!(fixture.read_json("index.json").as_array().unwrap().len(), 2);
}

#[test]
fn test_convert_explicit_delimiter() {
    let semicolon = METADATA_CSV.replace(',', ";");
    let fixture = Fixture::new(RECORDS, "metadata.txt", &semicolon);

    fixture
        .command("metadata.txt")
        .arg("--delimiter")
        .arg("semicolon")
        .assert()
        .success();
    assert_eq!(fixture.read_json("index.json")[1]["author"], json!("Ann Poe"));
}

#[test]
fn test_convert_without_release_year_column() {
    let metadata = "ID,Repositorium,Gesamtname Autor,Titel\n1,LibraryA,Jane Doe,Book One\n5,LibraryB,Ann Poe,Book Five\n";
    let fixture = Fixture::new(RECORDS, "metadata.csv", metadata);

    fixture.command("metadata.csv").assert().success();
    let index = fixture.read_json("index.json");
    assert!(index
        .as_array()
        .unwrap()
        .iter()
        .all(|entry| entry["releaseYear"].is_null()));
}

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn test_missing_column_fails_before_output() {
    let metadata = "ID,Repositorium,Titel\n1,LibraryA,Book One\n";
    let fixture = Fixture::new(RECORDS, "metadata.csv", metadata);

    fixture
        .command("metadata.csv")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Gesamtname Autor"));

    assert!(!fixture.out().exists());
}

#[test]
fn test_unknown_id_fails_without_index() {
    let records = "{\"dprose_id\": 1}\n{\"dprose_id\": 77}\n";
    let fixture = Fixture::new(records, "metadata.csv", METADATA_CSV);

    fixture
        .command("metadata.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dprose_77"));

    assert!(!fixture.out().join("index.json").exists());
}

#[test]
fn test_malformed_json_fails() {
    let records = "{\"dprose_id\": 1}\nnot json\n";
    let fixture = Fixture::new(records, "metadata.csv", METADATA_CSV);

    fixture
        .command("metadata.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_missing_records_file_fails() {
    let fixture = Fixture::new(RECORDS, "metadata.csv", METADATA_CSV);
    std::fs::remove_file(fixture.path("dprose.jsonlines")).unwrap();

    fixture
        .command("metadata.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dprose.jsonlines"));
}

#[test]
fn test_missing_arguments() {
    Command::cargo_bin("convert")
        .unwrap()
        .arg("only-one.jsonl")
        .assert()
        .failure()
        .code(2);
}
