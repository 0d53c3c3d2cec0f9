use std::io::Write;
use std::process::Stdio;

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, Row, parsed_doc, profiles};

const LEAD_ENGINEER: &[Row] = &[
    ("I", "PRON", "nsubj", 1),
    ("'m", "AUX", "ROOT", 1),
    ("a", "DET", "det", 4),
    ("lead", "NOUN", "compound", 4),
    ("engineer", "NOUN", "attr", 1),
];

const STUDENT_AND_FREELANCER: &[Row] = &[
    ("I", "PRON", "nsubj", 1),
    ("'m", "AUX", "ROOT", 1),
    ("a", "DET", "det", 3),
    ("student", "NOUN", "attr", 1),
    ("and", "CCONJ", "cc", 3),
    ("a", "DET", "det", 6),
    ("freelancer", "NOUN", "conj", 3),
];

const ONE_YEAR_PLUS: &[Row] = &[
    ("1", "NUM", "nummod", 2),
    ("+", "SYM", "cc", 0),
    ("year", "NOUN", "ROOT", 2),
    ("of", "ADP", "prep", 2),
    ("experience", "NOUN", "pobj", 3),
];

const WRITES_PYTHON: &[Row] = &[
    ("I", "PRON", "nsubj", 1),
    ("write", "VERB", "ROOT", 1),
    ("Python", "PROPN", "dobj", 1),
];

const WRITES_ELIXIR: &[Row] = &[
    ("I", "PRON", "nsubj", 1),
    ("write", "VERB", "ROOT", 1),
    ("Elixir", "PROPN", "dobj", 1),
];

fn json_lines(docs: &[Value]) -> String {
    docs.iter().map(|d| format!("{}\n", d)).collect()
}

fn bios() -> String {
    json_lines(&[
        parsed_doc("I'm a lead engineer", &[LEAD_ENGINEER]),
        parsed_doc("I'm a student and a freelancer", &[STUDENT_AND_FREELANCER]),
        parsed_doc("1+ year of experience", &[ONE_YEAR_PLUS]),
    ])
}

#[test]
fn test_extract_json_lines() -> Result<()> {
    let test = CliTest::with_file("bios.jsonl", &bios())?;

    let output = test.extract_command().arg("bios.jsonl").output()?;
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let profiles = profiles(&output.stdout)?;
    assert_eq!(profiles.len(), 3);

    assert_eq!(profiles[0]["role"], "dev");
    assert_eq!(profiles[0]["lead"], true);
    assert_eq!(profiles[0]["title"], "lead engineer");

    assert_eq!(profiles[1]["role"], "student");
    assert_eq!(profiles[1]["freelancer"], true);

    assert_eq!(profiles[2]["experience"]["kind"], "exact");
    assert_eq!(profiles[2]["experience"]["months"], 12);
    assert_eq!(profiles[2]["experience"]["over"], true);

    Ok(())
}

#[test]
fn test_extract_array_input() -> Result<()> {
    let docs = Value::Array(vec![
        parsed_doc("I write Python", &[WRITES_PYTHON]),
        parsed_doc("", &[]),
    ]);
    let test = CliTest::with_file("bios.json", &docs.to_string())?;

    let output = test.extract_command().arg("bios.json").output()?;
    assert!(output.status.success());

    let profiles = profiles(&output.stdout)?;
    assert_eq!(profiles[0]["skills"], serde_json::json!(["python"]));
    assert_eq!(profiles[1]["skills"], serde_json::json!([]));
    assert_eq!(profiles[1]["role"], Value::Null);

    Ok(())
}

#[test]
fn test_extract_reads_stdin() -> Result<()> {
    let test = CliTest::new()?;

    let mut child = test
        .extract_command()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(bios().as_bytes())?;
    }
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    assert_eq!(profiles(&output.stdout)?.len(), 3);

    Ok(())
}

#[test]
fn test_extract_text_format() -> Result<()> {
    let test = CliTest::with_file("bios.jsonl", &bios())?;

    let output = test
        .extract_command()
        .args(["bios.jsonl", "--format", "text"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("bios.jsonl#1 \"I'm a lead engineer\"\n"));
    assert!(stdout.contains("  role:       dev (lead engineer)\n"));
    assert!(stdout.contains("  freelancer: yes\n"));
    assert!(stdout.contains("  experience: over 12 months\n"));

    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr, "\u{2713} Extracted 3 documents\n");

    Ok(())
}

#[test]
fn test_format_from_config() -> Result<()> {
    let test = CliTest::with_file("bios.jsonl", &bios())?;
    test.write_file(".biotagrc.json", r#"{ "format": "text" }"#)?;

    let output = test.extract_command().arg("bios.jsonl").output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("role:"));

    let output = test
        .extract_command()
        .args(["bios.jsonl", "--format", "json"])
        .output()?;
    assert_eq!(profiles(&output.stdout)?.len(), 3);

    Ok(())
}

#[test]
fn test_extra_skills_from_config() -> Result<()> {
    let test = CliTest::with_file(
        "bios.jsonl",
        &json_lines(&[parsed_doc("I write Elixir", &[WRITES_ELIXIR])]),
    )?;

    let output = test.extract_command().arg("bios.jsonl").output()?;
    assert_eq!(profiles(&output.stdout)?[0]["skills"], serde_json::json!([]));

    test.write_file(".biotagrc.json", r#"{ "extraSkills": { "elixir": ["elixir"] } }"#)?;
    let output = test.extract_command().arg("bios.jsonl").output()?;
    assert_eq!(
        profiles(&output.stdout)?[0]["skills"],
        serde_json::json!(["elixir"])
    );

    Ok(())
}

#[test]
fn test_config_flag_overrides_discovery() -> Result<()> {
    let test = CliTest::with_file(
        "bios.jsonl",
        &json_lines(&[parsed_doc("I write Elixir", &[WRITES_ELIXIR])]),
    )?;
    test.write_file("conf/biotag.json", r#"{ "extraSkills": { "elixir": ["elixir"] } }"#)?;

    let output = test
        .extract_command()
        .args(["bios.jsonl", "--config", "conf/biotag.json"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        profiles(&output.stdout)?[0]["skills"],
        serde_json::json!(["elixir"])
    );

    Ok(())
}

#[test]
fn test_ambiguous_tags_fail_only_that_document() -> Result<()> {
    let test = CliTest::with_file(
        "bios.jsonl",
        &json_lines(&[
            parsed_doc("I'm a lead engineer", &[LEAD_ENGINEER]),
            parsed_doc("I write Python", &[WRITES_PYTHON]),
        ]),
    )?;
    test.write_file(".biotagrc.json", r#"{ "extraSkills": { "pythonista": ["python"] } }"#)?;

    let output = test.extract_command().arg("bios.jsonl").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(profiles(&output.stdout)?.len(), 1);

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("pythonista"));
    assert!(stderr.contains("bios.jsonl#2"));
    assert!(stderr.contains("1 of 2 documents failed"));

    Ok(())
}

#[test]
fn test_invalid_input_is_an_error() -> Result<()> {
    let test = CliTest::with_file("bios.jsonl", "not json\n")?;

    let output = test.extract_command().arg("bios.jsonl").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.starts_with("Error: Invalid input in bios.jsonl"));

    Ok(())
}

#[test]
fn test_missing_file_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract_command().arg("missing.jsonl").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to read input file: missing.jsonl"));

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("bios.jsonl", &bios())?;
    test.write_file(".biotagrc.json", r#"{ "extraSkills": { "bad": ["a>>b"] } }"#)?;

    let output = test.extract_command().arg("bios.jsonl").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("extraSkills.bad"));

    Ok(())
}
