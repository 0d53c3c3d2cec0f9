//! Seniority levels and stated durations of experience.

use crate::{
    core::{
        doc::Doc,
        error::RegistryError,
        matchers::{Rule, SequenceRule, TokenSpec},
        tags::{Group, TagDef, TagRegistryBuilder},
    },
    profile::{Experience, ExperienceKind, Level},
};

use super::Marked;

/// Digits (optionally decimal, optionally glued to `+`) or a number word.
const NUMBER: &str = r"(?i)^(\d+(\.\d+)?\+?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)$";

const NUMBER_WORDS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

const APPROXIMATORS: &[&str] = &["over", "more", "about", "around", "almost", "nearly"];

const UNITS: &[&str] = &["year", "years", "yr", "yrs", "month", "months"];

pub fn register(builder: &mut TagRegistryBuilder) -> Result<(), RegistryError> {
    let level_tag = |name: &str, level: Level, phrases: &[&str]| {
        TagDef::new(name, Group::Level(level))
            .phrases(phrases)
            .describe(&format!("{} level", level))
    };

    builder
        .add(level_tag("junior", Level::Junior, &["junior", "jr", "entry=level"]))?
        .add(level_tag("middle", Level::Middle, &["middle", "mid=level"]))?
        .add(level_tag("senior", Level::Senior, &["senior", "sr"]))?
        .add(level_tag(
            "principal",
            Level::Principal,
            &["principal", "staff<<engineer(s)", "staff<<developer(s)"],
        ))?
        .add(
            TagDef::new("exact_experience", Group::ExactExperience)
                .rule(duration_rule()?)
                .rule(yoe_rule()?)
                .exclusive()
                .describe("Stated duration, e.g. 5+ years of experience"),
        )?;
    Ok(())
}

/// `[over|more|about..] [than] N [+] year(s)|month(s) [of] experience`
fn duration_rule() -> Result<Rule, RegistryError> {
    Ok(Rule::new(SequenceRule::new(vec![
        TokenSpec::lower(APPROXIMATORS).optional(),
        TokenSpec::lower(&["than"]).optional(),
        TokenSpec::text_matching(NUMBER)?,
        TokenSpec::lower(&["+"]).optional(),
        TokenSpec::lower(UNITS),
        TokenSpec::lower(&["of"]).optional(),
        TokenSpec::lower(&["experience", "exp"]),
    ])))
}

/// `N [+] yoe`
fn yoe_rule() -> Result<Rule, RegistryError> {
    Ok(Rule::new(SequenceRule::new(vec![
        TokenSpec::lower(APPROXIMATORS).optional(),
        TokenSpec::text_matching(NUMBER)?,
        TokenSpec::lower(&["+"]).optional(),
        TokenSpec::lower(&["yoe"]),
    ])))
}

/// First affirmed level or duration, in entity order.
pub fn resolve(doc: &Doc, marked: &[Marked]) -> Option<Experience> {
    marked
        .iter()
        .filter(|m| m.is_affirmed())
        .find_map(|m| match m.tag.group {
            Group::Level(level) => Some(Experience {
                kind: level.into(),
                months: None,
                over: false,
            }),
            Group::ExactExperience => duration(doc, &m.entity.offsets),
            _ => None,
        })
}

/// Read the number, unit and "over" markers of a duration span.
pub fn duration(doc: &Doc, offsets: &[usize]) -> Option<Experience> {
    let mut number = None;
    let mut unit = None;
    let mut over = false;
    for &i in offsets {
        let lower = doc.tokens[i].lower.as_str();
        if number.is_none()
            && let Some(n) = parse_number(lower)
        {
            number = Some(n);
            over |= lower.ends_with('+');
            continue;
        }
        match lower {
            "+" | "over" | "more" => over = true,
            _ => unit = unit.or(unit_months(lower)),
        }
    }
    let months = (number? * unit?).round() as u32;
    Some(Experience {
        kind: ExperienceKind::Exact,
        months: Some(months),
        over,
    })
}

/// `"5"`, `"1.5"`, `"3+"` or a number word up to twenty.
pub fn parse_number(word: &str) -> Option<f64> {
    let digits = word.strip_suffix('+').unwrap_or(word);
    if let Ok(n) = digits.parse::<f64>() {
        return n.is_finite().then_some(n);
    }
    NUMBER_WORDS
        .iter()
        .position(|w| *w == word)
        .map(|i| (i + 1) as f64)
}

fn unit_months(word: &str) -> Option<f64> {
    match word {
        "year" | "years" | "yr" | "yrs" | "yoe" => Some(12.0),
        "month" | "months" => Some(1.0),
        _ => None,
    }
}
