//! Lexical fallback: look at the words right before the anchor.
//!
//! Parsers regularly attach `ex`, `former` or `not` to the wrong head,
//! especially in the telegraphic style bios are written in. This pass
//! ignores the tree and only checks a short window to the left.

use crate::core::doc::Doc;

/// Preceding words inspected, not counting hyphens.
const WINDOW: usize = 2;

const NEGATION_CUES: &[&str] = &["not", "no", "non", "never", "n't"];

const PAST_CUES: &[&str] = &["ex", "former", "formerly", "previously", "retired", "was", "were"];

const FUTURE_CUES: &[&str] = &["aspiring", "future", "wannabe", "become", "becoming", "will", "'ll"];

pub fn markers(doc: &Doc, anchor: usize) -> super::Polarity {
    let cues: Vec<&str> = window(doc, anchor)
        .into_iter()
        .filter(|&k| !compounded(doc, k, anchor))
        .map(|k| doc.tokens[k].lower.trim_end_matches('-'))
        .collect();
    let any = |list: &[&str]| cues.iter().any(|w| list.contains(w));
    super::Polarity {
        hashtag: false,
        negated: any(NEGATION_CUES),
        past: any(PAST_CUES),
        future: any(FUTURE_CUES),
    }
}

/// Up to [`WINDOW`] word positions before `anchor`, nearest first. Hyphens
/// are skipped and any other punctuation ends the window.
fn window(doc: &Doc, anchor: usize) -> Vec<usize> {
    let start = doc.sentence_of(anchor).start;
    let mut words = Vec::with_capacity(WINDOW);
    for k in (start..anchor).rev() {
        let token = &doc.tokens[k];
        if token.text == "-" {
            continue;
        }
        if token.is_punct() || words.len() == WINDOW {
            break;
        }
        words.push(k);
    }
    words
}

/// Whether word `k` is hyphen-joined to a following word other than the
/// anchor. `no-code` in `no-code developer` is a modifier, not a negation;
/// `non-freelancer` still negates.
fn compounded(doc: &Doc, k: usize, anchor: usize) -> bool {
    let joined_to = if doc.tokens[k].lower.ends_with('-') {
        k + 1
    } else if k + 1 < anchor && doc.tokens[k + 1].text == "-" {
        k + 2
    } else {
        return false;
    };
    joined_to != anchor
}
