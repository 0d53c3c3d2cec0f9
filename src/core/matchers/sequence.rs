use super::{Matcher, TokenSpec};
use crate::core::doc::{Doc, Sentence};

/// Contiguous span where each position satisfies a [`TokenSpec`].
///
/// Optional positions may be skipped; every way of satisfying the pattern
/// from a start token is reported, so `[over?] NUM years` yields both
/// `over 5 years` and `5 years`. The conflict resolver keeps the widest.
#[derive(Debug, Clone, Default)]
pub struct SequenceRule {
    pub specs: Vec<TokenSpec>,
}

impl SequenceRule {
    pub fn new(specs: Vec<TokenSpec>) -> Self {
        Self { specs }
    }

    fn extend(
        &self,
        doc: &Doc,
        sentence: Sentence,
        spec_index: usize,
        position: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        let Some(spec) = self.specs.get(spec_index) else {
            if !current.is_empty() {
                out.push(current.clone());
            }
            return;
        };

        if spec.optional {
            self.extend(doc, sentence, spec_index + 1, position, current, out);
        }
        if position < sentence.end && spec.matches(&doc.tokens[position]) {
            current.push(position);
            self.extend(doc, sentence, spec_index + 1, position + 1, current, out);
            current.pop();
        }
    }
}

impl Matcher for SequenceRule {
    fn find(&self, doc: &Doc, sentence: Sentence, out: &mut Vec<Vec<usize>>) {
        let mut current = Vec::with_capacity(self.specs.len());
        for start in sentence.indices() {
            let before = out.len();
            self.extend(doc, sentence, 0, start, &mut current, out);
            // Skipping leading optionals lets later starts rediscover a span.
            let mut fresh: Vec<Vec<usize>> = out.drain(before..).collect();
            fresh.retain(|span| span[0] == start);
            fresh.dedup();
            out.extend(fresh);
        }
    }
}
