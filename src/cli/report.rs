//! Report formatting and printing.
//!
//! Profiles go to stdout, one per document. Failures and summaries go to
//! stderr so JSON output stays machine-readable.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::extract::DocumentResult;
use crate::{
    config::OutputFormat,
    core::tags::{Tag, TagRegistry},
    profile::{Experience, ExperienceKind, Profile},
    utils::plural,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_results(results: &[DocumentResult], format: OutputFormat) {
    print_results_to(results, format, &mut io::stdout().lock(), &mut io::stderr().lock());
}

pub fn print_results_to<O: Write, E: Write>(
    results: &[DocumentResult],
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) {
    for (index, result) in results.iter().enumerate() {
        match (&result.outcome, format) {
            (Ok(profile), OutputFormat::Json) => print_json_to(profile, out),
            (Ok(profile), OutputFormat::Text) => {
                if index > 0 {
                    let _ = writeln!(out);
                }
                print_profile_to(result, profile, out);
            }
            (Err(error), _) => {
                let _ = writeln!(
                    err,
                    "{}: {}  {}",
                    "error".bold().red(),
                    error,
                    result.source.dimmed().cyan()
                );
            }
        }
    }
    print_summary_to(results, format, err);
}

fn print_json_to<W: Write>(profile: &Profile, writer: &mut W) {
    match serde_json::to_string(profile) {
        Ok(line) => {
            let _ = writeln!(writer, "{}", line);
        }
        Err(error) => {
            let _ = writeln!(writer, "{{\"error\": {:?}}}", error.to_string());
        }
    }
}

fn print_profile_to<W: Write>(result: &DocumentResult, profile: &Profile, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", result.source.bold(), quoted(&result.text).dimmed());

    let roles = &profile.roles;
    let mut lines: Vec<(&str, String)> = Vec::new();
    if let Some(role) = roles.role {
        let title = roles
            .title
            .as_ref()
            .map(|t| format!(" ({})", t))
            .unwrap_or_default();
        lines.push(("role", format!("{}{}", role, title)));
    }
    let flags = [
        ("freelancer", roles.freelancer),
        ("lead", roles.lead),
        ("remote", roles.remote),
        ("hireable", roles.hireable),
    ];
    for (name, value) in flags {
        if let Some(value) = value {
            lines.push((name, if value { "yes" } else { "no" }.to_string()));
        }
    }
    if let Some(experience) = &profile.experience {
        lines.push(("experience", describe_experience(experience)));
    }
    if !profile.skills.is_empty() {
        lines.push(("skills", profile.skills.join(", ")));
    }

    if lines.is_empty() {
        let _ = writeln!(writer, "  {}", "(nothing found)".dimmed());
    }
    for (name, value) in lines {
        let label = format!("{:<12}", format!("{}:", name));
        let _ = writeln!(writer, "  {}{}", label.cyan(), value);
    }
}

fn describe_experience(experience: &Experience) -> String {
    match (experience.kind, experience.months) {
        (ExperienceKind::Exact, Some(months)) => format!(
            "{}{}",
            if experience.over { "over " } else { "" },
            plural(months as usize, "month")
        ),
        (kind, _) => kind.to_string(),
    }
}

fn quoted(text: &str) -> String {
    format!("{:?}", text)
}

fn print_summary_to<W: Write>(results: &[DocumentResult], format: OutputFormat, writer: &mut W) {
    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} of {} failed",
            FAILURE_MARK.red(),
            failed,
            plural(results.len(), "document")
        );
    } else if format == OutputFormat::Text {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Extracted {}", plural(results.len(), "document")).green()
        );
    }
}

pub fn print_tags<'a>(tags: impl IntoIterator<Item = &'a Tag>, registry: &TagRegistry) {
    print_tags_to(tags, registry, &mut io::stdout().lock());
}

pub fn print_tags_to<'a, W: Write>(
    tags: impl IntoIterator<Item = &'a Tag>,
    registry: &TagRegistry,
    writer: &mut W,
) {
    let rows: Vec<(&str, String, String)> = tags
        .into_iter()
        .map(|tag| {
            let description = match (tag.cancels, &tag.description) {
                (Some(target), _) => format!("cancels {}", registry.tag(target).name),
                (None, Some(description)) => description.clone(),
                (None, None) => String::new(),
            };
            (tag.name.as_str(), tag.group.to_string(), description)
        })
        .collect();

    let name_width = rows.iter().map(|(n, _, _)| n.len()).max().unwrap_or(0);
    let group_width = rows.iter().map(|(_, g, _)| g.len()).max().unwrap_or(0);
    for (name, group, description) in &rows {
        let line = format!(
            "{:<name_width$}  {:<group_width$}  {}",
            name, group, description
        );
        let _ = writeln!(writer, "{}", line.trim_end());
    }
    let _ = writeln!(writer, "\n{}", plural(rows.len(), "tag").dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::error::EngineError,
        profile::{Role, RoleRecord},
        rules::default_registry,
    };
    use pretty_assertions::assert_eq;

    fn render(results: &[DocumentResult], format: OutputFormat) -> (String, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let mut err = Vec::new();
        print_results_to(results, format, &mut out, &mut err);
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn lead_dev() -> DocumentResult {
        DocumentResult {
            source: "bios.json#1".to_string(),
            text: "Lead engineer, 5+ years of Rust".to_string(),
            outcome: Ok(Profile {
                roles: RoleRecord {
                    role: Some(Role::Dev),
                    lead: Some(true),
                    title: Some("Lead engineer".to_string()),
                    ..RoleRecord::default()
                },
                experience: Some(Experience {
                    kind: ExperienceKind::Exact,
                    months: Some(60),
                    over: true,
                }),
                skills: vec!["rust".to_string()],
            }),
        }
    }

    #[test]
    fn test_text_report() {
        let (out, err) = render(&[lead_dev()], OutputFormat::Text);
        insta::assert_snapshot!(out, @r#"
        bios.json#1 "Lead engineer, 5+ years of Rust"
          role:       dev (Lead engineer)
          lead:       yes
          experience: over 60 months
          skills:     rust
        "#);
        assert_eq!(err, "\u{2713} Extracted 1 document\n");
    }

    #[test]
    fn test_json_report_is_one_line_per_document() {
        let (out, err) = render(&[lead_dev(), lead_dev()], OutputFormat::Json);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["role"], "dev");
        assert_eq!(value["experience"]["months"], 60);
        assert!(err.is_empty());
    }

    #[test]
    fn test_failures_go_to_stderr() {
        let failed = DocumentResult {
            source: "bios.json#2".to_string(),
            text: String::new(),
            outcome: Err(EngineError::AmbiguousMatch {
                first: "a".to_string(),
                second: "b".to_string(),
                offsets: vec![0],
            }),
        };
        let (out, err) = render(&[lead_dev(), failed], OutputFormat::Json);
        assert_eq!(out.lines().count(), 1);
        assert!(err.contains("bios.json#2"));
        assert!(err.contains("1 of 2 documents failed"));
    }

    #[test]
    fn test_tags_table() {
        colored::control::set_override(false);
        let registry = default_registry().unwrap();
        let tags = registry
            .iter()
            .map(|(_, tag)| tag)
            .filter(|tag| tag.name.starts_with("go"));
        let mut out = Vec::new();
        print_tags_to(tags, &registry, &mut out);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("cancels go"));
        assert!(out.contains("golang"));
        assert!(out.ends_with("4 tags\n"));
    }
}
