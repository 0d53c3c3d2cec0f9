//! Disambiguation of pending matches.
//!
//! Rules flagged `maybe` produce pending candidates ("go", "ts", a lone "C").
//! A pending candidate survives when at least one predicate registered on its
//! tag holds for its anchor. Predicates only look at confirmed candidates,
//! so two ambiguous terms cannot vouch for each other.

use tracing::debug;

use crate::core::{
    doc::{Doc, Pos},
    entity::Entity,
    tags::TagRegistry,
};

/// Words that turn a single letter into a language name ("C language", "R-lang").
const LANGUAGE_SUFFIXES: &[&str] = &[
    "language",
    "lang",
    "programming",
    "developer",
    "programmer",
    "dev",
];

/// Separators of an enumerated list ("Python, Go and Rust").
const LIST_SEPARATORS: &[&str] = &[",", "/", "and", "&", "|"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Sentence,
    Document,
}

#[derive(Debug, Clone)]
pub enum Predicate {
    /// A confirmed candidate of one of `terms` appears in the same scope.
    CoOccurs { terms: Vec<String>, scope: Scope },
    /// Preceded by `#`.
    Hashtagged,
    /// Enclosed in parentheses.
    Parenthesized,
    /// An adjacent word is capitalized or hashtagged. Pronouns do not count
    /// ("I go").
    CapitalizedNeighbor,
    /// The candidate is capitalized and sits next to another capitalized item
    /// across a list separator (`,` `/` `and` `&` `|`).
    CommaRun,
    /// Single letter followed by a language suffix, directly or hyphenated.
    LanguageLetter,
    Custom(fn(&Doc, &Entity) -> bool),
}

impl Predicate {
    /// Tag names this predicate depends on; checked at registry build time.
    pub fn referenced_tags(&self) -> &[String] {
        match self {
            Predicate::CoOccurs { terms, .. } => terms,
            _ => &[],
        }
    }

    pub fn holds(&self, doc: &Doc, candidate: &Entity, confirmed: &[&Entity]) -> bool {
        match self {
            Predicate::CoOccurs { terms, scope } => confirmed.iter().any(|other| {
                terms.contains(&other.name)
                    && (*scope == Scope::Document
                        || doc.tokens[other.anchor].sent == doc.tokens[candidate.anchor].sent)
            }),
            Predicate::Hashtagged => doc.is_hashtagged(first(candidate)),
            Predicate::Parenthesized => is_parenthesized(doc, candidate),
            Predicate::CapitalizedNeighbor => has_capitalized_neighbor(doc, candidate),
            Predicate::CommaRun => in_capitalized_run(doc, candidate),
            Predicate::LanguageLetter => is_language_letter(doc, candidate.anchor),
            Predicate::Custom(f) => f(doc, candidate),
        }
    }
}

/// Keep confirmed candidates and the pending ones some predicate vouches for.
pub fn disambiguate(registry: &TagRegistry, doc: &Doc, candidates: Vec<Entity>) -> Vec<Entity> {
    let confirmed: Vec<&Entity> = candidates.iter().filter(|c| !c.pending).collect();
    let keep: Vec<bool> = candidates
        .iter()
        .map(|candidate| {
            if !candidate.pending {
                return true;
            }
            let tag = registry.tag(candidate.tag);
            let kept = tag
                .predicates
                .iter()
                .any(|p| p.holds(doc, candidate, &confirmed));
            debug!(
                tag = %tag.name,
                text = %candidate.text(doc),
                kept,
                "disambiguated"
            );
            kept
        })
        .collect();

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(mut candidate, keep)| {
            candidate.pending = false;
            keep.then_some(candidate)
        })
        .collect()
}

fn first(candidate: &Entity) -> usize {
    candidate.offsets[0]
}

fn last(candidate: &Entity) -> usize {
    candidate.offsets[candidate.offsets.len() - 1]
}

fn is_parenthesized(doc: &Doc, candidate: &Entity) -> bool {
    let sentence = doc.sentence_of(candidate.anchor);
    let (start, end) = (first(candidate), last(candidate));
    start > sentence.start
        && end + 1 < sentence.end
        && doc.tokens[start - 1].text == "("
        && doc.tokens[end + 1].text == ")"
}

fn has_capitalized_neighbor(doc: &Doc, candidate: &Entity) -> bool {
    let sentence = doc.sentence_of(candidate.anchor);
    let (start, end) = (first(candidate), last(candidate));
    let is_marked_word = |i: usize| {
        let token = &doc.tokens[i];
        !token.is_punct()
            && token.pos != Pos::Pron
            && (token.is_capitalized() || doc.is_hashtagged(i))
    };
    (start > sentence.start && is_marked_word(start - 1))
        || (end + 1 < sentence.end && is_marked_word(end + 1))
}

fn in_capitalized_run(doc: &Doc, candidate: &Entity) -> bool {
    if !doc.tokens[first(candidate)].is_capitalized() {
        return false;
    }
    let sentence = doc.sentence_of(candidate.anchor);
    let is_separator = |i: usize| LIST_SEPARATORS.contains(&doc.tokens[i].lower.as_str());
    let is_item = |i: usize| doc.tokens[i].is_capitalized() && !doc.tokens[i].is_punct();

    let (start, end) = (first(candidate), last(candidate));
    let left = start >= sentence.start + 2 && is_separator(start - 1) && is_item(start - 2);
    let right = end + 2 < sentence.end && is_separator(end + 1) && is_item(end + 2);
    left || right
}

fn is_language_letter(doc: &Doc, i: usize) -> bool {
    let token = &doc.tokens[i];
    let mut chars = token.text.chars();
    let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
    if !single_letter {
        return false;
    }
    let sentence = doc.sentence_of(i);
    let is_suffix = |j: usize| j < sentence.end && LANGUAGE_SUFFIXES.contains(&doc.tokens[j].lower.as_str());
    is_suffix(i + 1) || (i + 1 < sentence.end && doc.tokens[i + 1].text == "-" && is_suffix(i + 2))
}
