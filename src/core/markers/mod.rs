//! Marker engine: hashtag, negation, past and future polarity of an anchor.
//!
//! Two passes run independently:
//!
//! - [`tree`]: structural detection by walking the dependency tree
//! - [`fallback`]: fixed-window lexical checks on the tokens right before
//!   the anchor, to recover from misattached parses
//!
//! [`polarity`] combines them per axis: an axis's fallback only counts when
//! the tree pass left that axis unset. Axes are independent; deciding which
//! one wins is the resolvers' job (see [`Polarity::stance`]).

pub mod fallback;
pub mod tree;

use serde::Serialize;

use crate::core::doc::Doc;

pub(crate) const NEGATORS: &[&str] = &["not", "no", "never", "n't"];

pub(crate) const PAST_MODIFIERS: &[&str] = &["former", "formerly", "retired", "previously"];

pub(crate) const PAST_COPULAS: &[&str] = &["was", "were"];

pub(crate) const FUTURE_ADJECTIVES: &[&str] = &["aspiring", "future", "wannabe"];

pub(crate) const MODALS: &[&str] = &["will", "'ll"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Polarity {
    pub hashtag: bool,
    pub negated: bool,
    pub past: bool,
    pub future: bool,
}

/// The single reading a resolver acts on, after precedence:
/// hashtag > negated > past > future > plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Affirmed,
    Negated,
    Past,
    Future,
}

impl Polarity {
    /// Fill every axis the structural pass left unset from `fallback`.
    pub fn or_fallback(self, fallback: Polarity) -> Polarity {
        Polarity {
            hashtag: self.hashtag,
            negated: self.negated || fallback.negated,
            past: self.past || fallback.past,
            future: self.future || fallback.future,
        }
    }

    /// A hashtag affirms even when the text also negates ("not #hireable"
    /// still reads as hireable).
    pub fn stance(&self) -> Stance {
        if self.hashtag {
            Stance::Affirmed
        } else if self.negated {
            Stance::Negated
        } else if self.past {
            Stance::Past
        } else if self.future {
            Stance::Future
        } else {
            Stance::Affirmed
        }
    }
}

pub fn polarity(doc: &Doc, anchor: usize) -> Polarity {
    tree::markers(doc, anchor).or_fallback(fallback::markers(doc, anchor))
}
