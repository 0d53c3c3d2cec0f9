use anyhow::Result;

use crate::CliTest;

#[test]
fn test_tags_lists_registry() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.tags_command().output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert!(names.contains(&"developer"));
    assert!(names.contains(&"senior"));
    assert!(names.contains(&"python"));
    assert!(stdout.trim_end().ends_with("tags"));

    Ok(())
}

#[test]
fn test_tags_group_filter() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.tags_command().args(["--group", "level"]).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let rows: Vec<&str> = stdout
        .lines()
        .take_while(|line| !line.is_empty())
        .collect();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| row.contains("level:")));
    assert!(stdout.ends_with("4 tags\n"));

    Ok(())
}

#[test]
fn test_tags_include_extra_skills() -> Result<()> {
    let test = CliTest::with_file(
        ".biotagrc.json",
        r#"{ "extraSkills": { "elixir": ["elixir", "phoenix<<framework"] } }"#,
    )?;

    let output = test.tags_command().args(["--group", "skill"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.lines().any(|line| line.starts_with("elixir ")));

    Ok(())
}

#[test]
fn test_tags_unknown_group() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.tags_command().args(["--group", "nope"]).output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr)?;
    assert_eq!(stderr, "No tags in group \"nope\"\n");

    Ok(())
}
