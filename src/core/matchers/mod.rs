//! Multi-matcher engine.
//!
//! Every match rule implements [`Matcher`]; [`MatchRule`] closes over the
//! three strategies and dispatches through `enum_dispatch`:
//!
//! - `literal`: exact case-insensitive token sequences
//! - `sequence`: contiguous spans constrained per position
//! - `graph`: dependency-tree constraint graphs with optional phantom nodes
//!
//! [`find_matches`] runs every rule of every tag over every sentence and
//! returns raw matches with duplicates removed.

mod graph;
mod literal;
mod sequence;

use std::collections::HashMap;

use enum_dispatch::enum_dispatch;
use regex::Regex;
use tracing::trace;

pub use graph::{GraphNode, GraphRule, Link, Relation};
pub use literal::PhraseRule;
pub use sequence::SequenceRule;

use crate::core::{
    doc::{Doc, Pos, Sentence, Token},
    error::RegistryError,
    tags::{TagId, TagRegistry},
};

/// A strategy that finds token spans inside one sentence.
#[enum_dispatch]
pub trait Matcher {
    /// Push every matching span (document-wide offsets, ascending) onto `out`.
    fn find(&self, doc: &Doc, sentence: Sentence, out: &mut Vec<Vec<usize>>);
}

#[enum_dispatch(Matcher)]
#[derive(Debug, Clone)]
pub enum MatchRule {
    Phrase(PhraseRule),
    Sequence(SequenceRule),
    Graph(GraphRule),
}

impl MatchRule {
    pub fn validate(&self) -> Result<(), RegistryError> {
        match self {
            MatchRule::Phrase(rule) if rule.words.is_empty() => Err(RegistryError::InvalidPattern {
                pattern: String::new(),
                reason: "empty phrase".to_string(),
            }),
            MatchRule::Sequence(rule) if rule.specs.iter().all(|s| s.optional) => {
                Err(RegistryError::InvalidPattern {
                    pattern: format!("{:?}", rule.specs),
                    reason: "sequence needs at least one required position".to_string(),
                })
            }
            MatchRule::Graph(rule) => rule.validate(),
            _ => Ok(()),
        }
    }
}

/// A match rule together with its ambiguity flag. Matches produced by a
/// `maybe` rule stay pending until a disambiguation predicate confirms them.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: MatchRule,
    pub maybe: bool,
}

impl Rule {
    pub fn new(kind: impl Into<MatchRule>) -> Self {
        Self {
            kind: kind.into(),
            maybe: false,
        }
    }

    pub fn maybe(kind: impl Into<MatchRule>) -> Self {
        Self {
            kind: kind.into(),
            maybe: true,
        }
    }
}

/// Per-position token constraint shared by sequence and graph rules.
/// Empty constraint lists accept anything.
#[derive(Debug, Clone, Default)]
pub struct TokenSpec {
    pub pos: Vec<Pos>,
    pub lower: Vec<String>,
    pub regex: Option<Regex>,
    /// Only meaningful inside a sequence rule.
    pub optional: bool,
}

impl TokenSpec {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn lower(words: &[&str]) -> Self {
        Self {
            lower: words.iter().map(|w| w.to_lowercase()).collect(),
            ..Self::default()
        }
    }

    pub fn pos(tags: &[Pos]) -> Self {
        Self {
            pos: tags.to_vec(),
            ..Self::default()
        }
    }

    /// Match token text against `pattern`.
    pub fn text_matching(pattern: &str) -> Result<Self, RegistryError> {
        let regex = Regex::new(pattern).map_err(|e| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            regex: Some(regex),
            ..Self::default()
        })
    }

    pub fn with_pos(mut self, tags: &[Pos]) -> Self {
        self.pos = tags.to_vec();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn matches(&self, token: &Token) -> bool {
        (self.pos.is_empty() || self.pos.contains(&token.pos))
            && (self.lower.is_empty() || self.lower.iter().any(|w| *w == token.lower))
            && self.regex.as_ref().is_none_or(|r| r.is_match(&token.text))
    }
}

/// Identity of a raw match: which tag fired, and whether it still needs
/// disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey {
    pub tag: TagId,
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub key: TagKey,
    /// Ascending, never empty.
    pub offsets: Vec<usize>,
}

/// Run all rules of all tags over `doc`.
///
/// A span matched several times by the same tag is reported once; when one
/// of those firings came from a confirmed rule the match is confirmed.
pub fn find_matches(registry: &TagRegistry, doc: &Doc) -> Vec<RawMatch> {
    let mut matches: Vec<RawMatch> = Vec::new();
    let mut seen: HashMap<(TagId, Vec<usize>), usize> = HashMap::new();
    let mut spans = Vec::new();

    for (id, tag) in registry.iter() {
        for rule in &tag.rules {
            for sentence in &doc.sents {
                spans.clear();
                rule.kind.find(doc, *sentence, &mut spans);
                for span in spans.drain(..) {
                    if span.is_empty() {
                        continue;
                    }
                    match seen.get(&(id, span.clone())) {
                        Some(&index) => {
                            if !rule.maybe {
                                matches[index].key.pending = false;
                            }
                        }
                        None => {
                            trace!(tag = %tag.name, offsets = ?span, maybe = rule.maybe, "raw match");
                            seen.insert((id, span.clone()), matches.len());
                            matches.push(RawMatch {
                                key: TagKey {
                                    tag: id,
                                    pending: rule.maybe,
                                },
                                offsets: span,
                            });
                        }
                    }
                }
            }
        }
    }

    matches
}
