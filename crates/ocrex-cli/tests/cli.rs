use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const PERMIT: &str = "License ID: TRC2024X77
Ref: AB1234
Issued 05/03/2024
Telecommunication Tower at No. 12, Galle Road of Dialog Axiata PLC
Licence TX 12(R3) valid from 1.12.2024 to 24.11.2025
";

fn ocrex(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ocrex").unwrap();
    cmd.arg("-c").arg(config);
    cmd
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, "{}").unwrap();
    path
}

#[test]
fn test_extract_to_stdout() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("permit.txt"), PERMIT).unwrap();

    ocrex(&config)
        .arg("extract")
        .arg(&docs)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "File Name,License ID,Date,Reference ID,Address,Start Date,End Date,Notes",
        ))
        .stdout(predicate::str::contains("permit.txt,TRC2024X77,05/03/2024"))
        .stdout(predicate::str::contains("1.12.2024,24.11.2025"));
}

#[test]
fn test_extract_appends_csv_header_once() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("permit.txt"), PERMIT).unwrap();
    let out = dir.path().join("results.csv");

    for _ in 0..2 {
        ocrex(&config)
            .arg("extract")
            .arg(&docs)
            .arg("-o")
            .arg(&out)
            .assert()
            .success();
    }

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.matches("File Name").count(), 1);
    assert_eq!(written.matches("permit.txt").count(), 2);
}

#[test]
fn test_extract_unreadable_pdf_becomes_error_row() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("broken.pdf"), "not a pdf").unwrap();
    fs::write(docs.join("permit.txt"), PERMIT).unwrap();

    ocrex(&config)
        .arg("extract")
        .arg(&docs)
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"File Name\": \"broken.pdf\""))
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("TRC2024X77"));
}

#[test]
fn test_extract_no_inputs_fails() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());

    ocrex(&config)
        .arg("extract")
        .arg(dir.path().join("*.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn test_licenses_with_summary() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("permit.txt");
    fs::write(&input, PERMIT).unwrap();

    ocrex(&config)
        .arg("licenses")
        .arg(&input)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("File Name,Licenses,Summary"))
        .stdout(predicate::str::contains("permit.txt,TX 12(R3),3 times"));
}

#[test]
fn test_csv_rows_as_input() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("ocr.csv");
    fs::write(
        &input,
        "File Name,Text\na.pdf,Licence 123/45 R6\nb.pdf,nothing here\n",
    )
    .unwrap();

    ocrex(&config)
        .arg("licenses")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("a.pdf,123/45 R6"))
        .stdout(predicate::str::contains("b.pdf,"));
}

#[test]
fn test_learn_then_extract_fields() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let document = dir.path().join("permit.txt");
    fs::write(&document, PERMIT).unwrap();
    let session = dir.path().join("session.json");

    ocrex(&config)
        .arg("learn")
        .arg("--session")
        .arg(&session)
        .args(["--field", "Reference", "--sample", "AB1234"])
        .arg("--document")
        .arg(&document)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reference"))
        .stdout(predicate::str::contains("1. AB1234"));

    assert!(session.exists());

    ocrex(&config)
        .arg("fields")
        .arg(&document)
        .arg("--session")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("File Name,Reference"))
        .stdout(predicate::str::contains("permit.txt,AB1234"));
}

#[test]
fn test_learn_sample_missing_from_document() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let document = dir.path().join("permit.txt");
    fs::write(&document, PERMIT).unwrap();

    ocrex(&config)
        .arg("learn")
        .arg("--session")
        .arg(dir.path().join("session.json"))
        .args(["--sample", "ZZ9999"])
        .arg("--document")
        .arg(&document)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("nested").join("config.json");

    ocrex(&config)
        .args(["config", "set", "extraction.window_max_words", "5"])
        .assert()
        .success();

    ocrex(&config)
        .args(["config", "get", "extraction.window_max_words"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\n"));

    ocrex(&config)
        .args(["config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure();
}

#[test]
fn test_unwritable_output_falls_back_to_stdout() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("permit.txt"), PERMIT).unwrap();
    let out = dir.path().join("missing_dir").join("out.csv");

    ocrex(&config)
        .arg("extract")
        .arg(&docs)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stdout(predicate::str::contains("permit.txt,TRC2024X77"))
        .stderr(predicate::str::contains("writing"))
        .stderr(predicate::str::contains("out.csv"));

    assert!(!out.exists());
}

#[test]
fn test_results_csv_inside_input_dir_is_skipped() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("permit.txt"), PERMIT).unwrap();
    let out = docs.join("results.csv");

    for _ in 0..2 {
        ocrex(&config)
            .arg("extract")
            .arg(&docs)
            .arg("-o")
            .arg(&out)
            .assert()
            .success();
    }

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.matches("File Name").count(), 1);
    assert_eq!(written.matches("permit.txt").count(), 2);
    assert!(!written.contains("No patterns matched"));
}

#[test]
fn test_fields_notes_on_by_default() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let docs = dir.path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("permit.txt"), PERMIT).unwrap();
    fs::write(docs.join("blank.txt"), "nothing to see here").unwrap();
    let session = dir.path().join("session.json");

    ocrex(&config)
        .arg("learn")
        .arg("--session")
        .arg(&session)
        .args(["--field", "Reference", "--sample", "AB1234"])
        .arg("--document")
        .arg(docs.join("permit.txt"))
        .assert()
        .success();

    ocrex(&config)
        .arg("fields")
        .arg(&docs)
        .arg("--session")
        .arg(&session)
        .assert()
        .success()
        .stdout(predicate::str::contains("File Name,Reference,Notes"))
        .stdout(predicate::str::contains("blank.txt,,No patterns matched"))
        .stdout(predicate::str::contains("permit.txt,AB1234"));

    ocrex(&config)
        .arg("fields")
        .arg(&docs)
        .arg("--session")
        .arg(&session)
        .arg("--no-notes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes").not())
        .stdout(predicate::str::contains("blank.txt,\n"));
}

#[test]
fn test_append_refuses_columns_missing_from_header() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("permit.txt");
    fs::write(&input, PERMIT).unwrap();
    let out = dir.path().join("licenses.csv");

    ocrex(&config)
        .arg("licenses")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    ocrex(&config)
        .arg("licenses")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--summary")
        .assert()
        .failure()
        .stdout(predicate::str::contains("permit.txt,TX 12(R3),3 times"))
        .stderr(predicate::str::contains("Summary"));

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, "File Name,Licenses\npermit.txt,TX 12(R3)\n");
}

#[test]
fn test_append_follows_existing_header() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let input = dir.path().join("permit.txt");
    fs::write(&input, PERMIT).unwrap();
    let out = dir.path().join("licenses.csv");

    ocrex(&config)
        .arg("licenses")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success();

    ocrex(&config)
        .arg("licenses")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ["File Name", "Licenses", "Summary"]);
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[1][1], "TX 12(R3)");
    assert_eq!(&records[1][2], "");
}
