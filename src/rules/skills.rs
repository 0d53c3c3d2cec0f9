//! Technologies.
//!
//! Short or common words ("go", "ts", "C", "node") are registered as `maybe`
//! phrases and only survive disambiguation with supporting context. Stacks
//! expand into their components and filler words are matched only to be
//! skipped.

use std::collections::BTreeMap;

use crate::{
    core::{
        disambiguate::{Predicate, Scope},
        doc::Doc,
        entity::Entity,
        error::RegistryError,
        tags::{Group, Resolve, TagDef, TagRegistryBuilder},
    },
    utils::dedup_preserving_order,
};

use super::Marked;

fn skill(name: &str, phrases: &[&str]) -> TagDef {
    TagDef::new(name, Group::Skill).phrases(phrases).exclusive()
}

fn co_occurs(terms: &[&str]) -> Predicate {
    Predicate::CoOccurs {
        terms: terms.iter().map(|t| t.to_string()).collect(),
        scope: Scope::Document,
    }
}

fn expand(labels: &[&str]) -> Resolve {
    Resolve::Expand(labels.iter().map(|l| l.to_string()).collect())
}

/// All-caps token of two or more letters ("LAMP", not "lamp").
fn is_acronym(doc: &Doc, entity: &Entity) -> bool {
    let text = &doc.tokens[entity.anchor].text;
    text.chars().count() > 1 && text.chars().all(|c| c.is_ascii_uppercase())
}

pub fn register(builder: &mut TagRegistryBuilder) -> Result<(), RegistryError> {
    builder
        .add(skill("javascript", &["javascript", "js"]))?
        .add(
            skill("typescript", &["typescript", "ts?"])
                .disambiguate(vec![co_occurs(&["javascript", "angular", "react", "nodejs"])]),
        )?
        .add(skill("python", &["python"]))?
        .add(skill("rust", &["rust", "rustlang"]))?
        .add(skill("golang", &["golang"]).resolve(Resolve::Alias("go".to_string())))?
        .add(skill("go", &["go?"]).disambiguate(vec![
            co_occurs(&["golang", "google", "kubernetes", "docker"]),
            Predicate::Hashtagged,
            Predicate::Parenthesized,
            Predicate::CapitalizedNeighbor,
            Predicate::CommaRun,
        ]))?
        .add(
            skill("google", &["google"])
                .resolve(Resolve::Skip)
                .describe("Context for go; not a skill by itself"),
        )?
        .add(TagDef::cancel("go-to", "go").phrases(&["go=to", "let's go", "on the go"]))?
        .add(
            skill("c", &["c?"])
                .disambiguate(vec![Predicate::LanguageLetter, Predicate::CommaRun]),
        )?
        .add(
            skill("r", &["r?"])
                .disambiguate(vec![Predicate::LanguageLetter, Predicate::CommaRun]),
        )?
        .add(skill("cpp", &["c++", "cpp"]))?
        .add(skill("csharp", &["c#", "csharp"]))?
        .add(skill("java", &["java"]))?
        .add(skill("php", &["php"]))?
        .add(skill("react", &["react", "react=js"]))?
        .add(skill("react-native", &["react=native"]))?
        .add(
            skill("nodejs", &["node.js", "nodejs", "node=js", "node?"])
                .disambiguate(vec![co_occurs(&[
                    "javascript",
                    "typescript",
                    "react",
                    "mongodb",
                    "express",
                ])]),
        )?
        .add(skill("mongodb", &["mongo(db)"]))?
        .add(
            skill("express", &["express.js", "expressjs", "express?"])
                .disambiguate(vec![co_occurs(&["javascript", "nodejs", "mongodb", "react"])]),
        )?
        .add(skill("angular", &["angular(js)"]))?
        .add(skill("docker", &["docker"]))?
        .add(skill("kubernetes", &["kubernetes", "k8s"]))?
        .add(skill("aws", &["aws", "amazon web services"]))?
        .add(skill("sql", &["sql"]))?
        .add(skill("mysql", &["mysql"]))?
        .add(skill("postgresql", &["postgres(ql)"]))?
        .add(skill("linux", &["linux"]))?
        .add(
            skill("mern", &["mern", "mern stack"])
                .resolve(expand(&["mongodb", "express", "react", "nodejs"]))
                .describe("MongoDB, Express, React and Node.js"),
        )?
        .add(
            skill("mean", &["mean stack"])
                .resolve(expand(&["mongodb", "express", "angular", "nodejs"]))
                .describe("MongoDB, Express, Angular and Node.js"),
        )?
        .add(
            skill("lamp", &["lamp stack", "lamp?"])
                .disambiguate(vec![
                    Predicate::Custom(is_acronym),
                    Predicate::CommaRun,
                ])
                .resolve(expand(&["linux", "apache", "mysql", "php"]))
                .describe("Linux, Apache, MySQL and PHP"),
        )?
        .add(
            skill("programming", &["programming", "coding"])
                .resolve(Resolve::Skip)
                .describe("Generic activity; matched so it never reads as a skill"),
        )?;
    Ok(())
}

/// Additional skills from configuration: label to phrases.
pub fn register_extra(
    builder: &mut TagRegistryBuilder,
    extra: &BTreeMap<String, Vec<String>>,
) -> Result<(), RegistryError> {
    for (label, phrases) in extra {
        let phrases: Vec<&str> = phrases.iter().map(String::as_str).collect();
        builder.add(skill(label, &phrases))?;
    }
    Ok(())
}

/// Labels of every affirmed skill, first mention first, without repeats.
pub fn resolve(marked: &[Marked]) -> Vec<String> {
    dedup_preserving_order(
        marked
            .iter()
            .filter(|m| m.tag.group == Group::Skill && m.is_affirmed())
            .flat_map(|m| m.tag.resolve.labels(&m.tag.name)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Engine, rules::default_registry};
    use pretty_assertions::assert_eq;

    fn skills(doc: &Doc) -> Vec<String> {
        Engine::new(default_registry().unwrap())
            .extract(doc)
            .unwrap()
            .skills
    }

    #[test]
    fn test_alias_and_plain_skill() {
        let doc = Doc::from_rows(&[&[
            ("Golang", "PROPN", "ROOT", 0),
            ("and", "CCONJ", "cc", 0),
            ("Rust", "PROPN", "conj", 0),
        ]]);
        assert_eq!(skills(&doc), vec!["go", "rust"]);
    }

    #[test]
    fn test_ts_needs_javascript_context() {
        let alone = Doc::from_rows(&[&[("ts", "NOUN", "ROOT", 0)]]);
        assert!(skills(&alone).is_empty());

        let with_react = Doc::from_rows(&[&[
            ("React", "PROPN", "ROOT", 0),
            ("and", "CCONJ", "cc", 0),
            ("TS", "PROPN", "conj", 0),
        ]]);
        assert_eq!(skills(&with_react), vec!["react", "typescript"]);
    }

    #[test]
    fn test_single_letter_languages() {
        let language = Doc::from_rows(&[&[
            ("C", "PROPN", "compound", 1),
            ("language", "NOUN", "ROOT", 1),
        ]]);
        assert_eq!(skills(&language), vec!["c"]);

        let grade = Doc::from_rows(&[&[("Grade", "NOUN", "ROOT", 0), ("C", "NOUN", "appos", 0)]]);
        assert!(skills(&grade).is_empty());
    }

    #[test]
    fn test_negated_skill_is_dropped() {
        let doc = Doc::from_rows(&[&[
            ("No", "DET", "det", 1),
            ("PHP", "PROPN", "ROOT", 1),
            (",", "PUNCT", "punct", 1),
            ("Python", "PROPN", "appos", 1),
        ]]);
        let doc_skills = skills(&doc);
        assert!(!doc_skills.contains(&"php".to_string()));
    }

    #[test]
    fn test_acronym_stack_expands() {
        let doc = Doc::from_rows(&[&[
            ("LAMP", "PROPN", "compound", 1),
            ("developer", "NOUN", "ROOT", 1),
        ]]);
        assert_eq!(skills(&doc), vec!["linux", "apache", "mysql", "php"]);

        let desk = Doc::from_rows(&[&[
            ("a", "DET", "det", 2),
            ("desk", "NOUN", "compound", 2),
            ("lamp", "NOUN", "ROOT", 2),
        ]]);
        assert!(skills(&desk).is_empty());
    }

    #[test]
    fn test_wider_skill_wins() {
        let doc = Doc::from_rows(&[&[
            ("React", "PROPN", "compound", 1),
            ("Native", "PROPN", "compound", 2),
            ("developer", "NOUN", "ROOT", 2),
        ]]);
        assert_eq!(skills(&doc), vec!["react-native"]);
    }

    #[test]
    fn test_repeated_skill_listed_once() {
        let doc = Doc::from_rows(&[&[
            ("Python", "PROPN", "ROOT", 0),
            (",", "PUNCT", "punct", 0),
            ("python", "NOUN", "appos", 0),
        ]]);
        assert_eq!(skills(&doc), vec!["python"]);
    }

    #[test]
    fn test_cancel_beats_supporting_context() {
        let doc = Doc::from_rows(&[&[
            ("Google", "VERB", "ROOT", 0),
            ("it", "PRON", "dobj", 0),
            (",", "PUNCT", "punct", 0),
            ("then", "ADV", "advmod", 4),
            ("go", "VERB", "conj", 0),
            ("to", "ADP", "prep", 4),
            ("bed", "NOUN", "pobj", 5),
        ]]);
        assert!(skills(&doc).is_empty());
    }
}
