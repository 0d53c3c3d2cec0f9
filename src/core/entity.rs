use crate::core::{
    doc::Doc,
    markers::{self, Polarity},
    matchers::RawMatch,
    tags::{TagId, TagRegistry},
};

/// A match that survived conflict resolution (and, once the engine returns
/// it, disambiguation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub tag: TagId,
    /// Canonical tag name.
    pub name: String,
    /// Ascending token offsets.
    pub offsets: Vec<usize>,
    /// Shallowest token of the span in the dependency tree.
    pub anchor: usize,
    /// Still waiting on a disambiguation predicate.
    pub pending: bool,
}

impl Entity {
    pub fn from_match(registry: &TagRegistry, doc: &Doc, m: RawMatch) -> Option<Self> {
        let anchor = anchor(doc, &m.offsets)?;
        Some(Self {
            tag: m.key.tag,
            name: registry.tag(m.key.tag).name.clone(),
            offsets: m.offsets,
            anchor,
            pending: m.key.pending,
        })
    }

    pub fn polarity(&self, doc: &Doc) -> Polarity {
        markers::polarity(doc, self.anchor)
    }

    pub fn text(&self, doc: &Doc) -> String {
        doc.span_text(&self.offsets)
    }
}

/// Minimum-depth token of `offsets`, lowest position on ties.
pub fn anchor(doc: &Doc, offsets: &[usize]) -> Option<usize> {
    offsets.iter().copied().min_by_key(|&i| (doc.depth(i), i))
}
