//! Structural marker detection over the dependency tree.
//!
//! Every check starts from the anchor's *content chain*: the anchor plus the
//! ancestors reached while heads stay content words (`senior` → `developer`
//! → `job`). The first non-content head above the chain is its *governor*,
//! usually the copula or verb the phrase hangs off.

use crate::core::doc::{Doc, Pos};

use super::{FUTURE_ADJECTIVES, MODALS, NEGATORS, PAST_COPULAS, PAST_MODIFIERS, Polarity};

/// Ancestor hops searched above the chain for intent and search verbs.
const VERB_HOPS: usize = 4;

const COPULA_INFINITIVES: &[&str] = &["be", "become"];

const INTENT_VERBS: &[&str] = &[
    "want", "wants", "wanted", "wanting", "plan", "plans", "planned", "planning", "wish", "wishes",
    "wished", "wishing", "strive", "strives", "striving", "strove",
];

const SEARCH_VERBS: &[&str] = &["looking", "seeking", "searching", "hunting"];

const OPPORTUNITY_NOUNS: &[&str] = &[
    "job",
    "jobs",
    "position",
    "positions",
    "role",
    "roles",
    "opportunity",
    "opportunities",
    "work",
    "gig",
    "gigs",
    "project",
    "projects",
    "internship",
    "internships",
    "offer",
    "offers",
    "contract",
    "contracts",
];

pub fn markers(doc: &Doc, anchor: usize) -> Polarity {
    let chain = content_chain(doc, anchor);
    let governor = governor(doc, &chain);
    Polarity {
        hashtag: doc.is_hashtagged(anchor),
        negated: negated(doc, anchor, &chain, governor),
        past: past(doc, anchor, &chain, governor),
        future: future(doc, anchor, &chain, governor),
    }
}

/// The anchor followed by its content-word ancestors, nearest first.
pub fn content_chain(doc: &Doc, anchor: usize) -> Vec<usize> {
    let mut chain = vec![anchor];
    chain.extend(
        doc.ancestors(anchor)
            .take_while(|&a| doc.tokens[a].pos.is_content()),
    );
    chain
}

fn governor(doc: &Doc, chain: &[usize]) -> Option<usize> {
    let top = *chain.last()?;
    let head = doc.tokens[top].head;
    (head != top).then_some(head)
}

fn chain_and_governor<'a>(
    chain: &'a [usize],
    governor: Option<usize>,
) -> impl Iterator<Item = usize> + 'a {
    chain.iter().copied().chain(governor)
}

fn is_clause_break(text: &str) -> bool {
    matches!(text, "," | ";")
}

/// Tokens left of `i` in the same clause, nearest first.
fn clause_left(doc: &Doc, i: usize) -> impl Iterator<Item = usize> + '_ {
    let start = doc.sentence_of(i).start;
    (start..i)
        .rev()
        .take_while(move |&k| !is_clause_break(&doc.tokens[k].text))
}

/// Tokens right of `i` in the same clause, nearest first.
fn clause_right(doc: &Doc, i: usize) -> impl Iterator<Item = usize> + '_ {
    let end = doc.sentence_of(i).end;
    (i + 1..end).take_while(move |&k| {
        let text = doc.tokens[k].text.as_str();
        !is_clause_break(text) && text != "."
    })
}

/// Whether `i` is written as `prefix-word`, `prefix- word` or `prefix word`.
fn is_prefixed(doc: &Doc, i: usize, prefix: &str) -> bool {
    let start = doc.sentence_of(i).start;
    if i == start {
        return false;
    }
    let previous = doc.tokens[i - 1].lower.as_str();
    if previous == prefix || previous.strip_suffix('-') == Some(prefix) {
        return true;
    }
    previous == "-" && i >= start + 2 && doc.tokens[i - 2].lower == prefix
}

/// `ex-` on `t` or on one of its contiguous left modifiers: `ex-Google
/// engineer` is past, `ex-Googler now indie developer` is not.
fn ex_prefixed(doc: &Doc, t: usize) -> bool {
    (doc.modifier_start(t)..=t).any(|k| is_prefixed(doc, k, "ex"))
}

fn has_negating_dependent(doc: &Doc, t: usize) -> bool {
    doc.children(t).any(|c| {
        c.dep == "neg"
            || (NEGATORS.contains(&c.lower.as_str()) && matches!(c.dep.as_str(), "det" | "advmod"))
    })
}

fn negated(doc: &Doc, anchor: usize, chain: &[usize], governor: Option<usize>) -> bool {
    if chain
        .iter()
        .any(|&t| is_prefixed(doc, t, "non") || has_negating_dependent(doc, t))
    {
        return true;
    }
    clause_left(doc, anchor).any(|k| {
        let token = &doc.tokens[k];
        token.dep == "neg" && (chain.contains(&token.head) || Some(token.head) == governor)
    })
}

fn past(doc: &Doc, anchor: usize, chain: &[usize], governor: Option<usize>) -> bool {
    if chain.iter().any(|&t| ex_prefixed(doc, t)) {
        return true;
    }
    if let Some(g) = governor {
        let copula = PAST_COPULAS.contains(&doc.tokens[g].lower.as_str())
            || doc.children(g).any(|c| {
                PAST_COPULAS.contains(&c.lower.as_str())
                    && matches!(c.dep.as_str(), "aux" | "auxpass" | "cop")
            });
        if copula {
            return true;
        }
    }
    if chain_and_governor(chain, governor)
        .any(|t| doc.children(t).any(|c| PAST_MODIFIERS.contains(&c.lower.as_str())))
    {
        return true;
    }
    let reach = doc.sentence_of(anchor).len();
    clause_right(doc, anchor).any(|k| {
        doc.tokens[k].lower == "ago"
            && chain_and_governor(chain, governor).any(|t| doc.is_ancestor(t, k, reach))
    })
}

fn future(doc: &Doc, anchor: usize, chain: &[usize], governor: Option<usize>) -> bool {
    chain.last().is_some_and(|&top| intends(doc, top))
        || chain.iter().any(|&t| {
            doc.children(t)
                .any(|c| FUTURE_ADJECTIVES.contains(&c.lower.as_str()))
        })
        || searching(doc, anchor)
        || chain_and_governor(chain, governor)
            .any(|t| doc.children(t).any(|c| MODALS.contains(&c.lower.as_str())))
}

/// `want to be a …`, `planning to become a …`.
fn intends(doc: &Doc, top: usize) -> bool {
    let mut copula = false;
    for a in doc.ancestors(top).take(VERB_HOPS) {
        let lower = doc.tokens[a].lower.as_str();
        if COPULA_INFINITIVES.contains(&lower) {
            copula = true;
        } else if INTENT_VERBS.contains(&lower) {
            return copula;
        }
    }
    false
}

/// `looking for a developer role`: the anchor reaches a search verb through
/// prepositions and opportunity nouns only.
fn searching(doc: &Doc, anchor: usize) -> bool {
    for a in doc.ancestors(anchor).take(VERB_HOPS) {
        let token = &doc.tokens[a];
        if SEARCH_VERBS.contains(&token.lower.as_str()) {
            return true;
        }
        if token.pos != Pos::Adp && !OPPORTUNITY_NOUNS.contains(&token.lower.as_str()) {
            return false;
        }
    }
    false
}
