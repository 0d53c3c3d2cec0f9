use super::Matcher;
use crate::core::doc::{Doc, Sentence};

/// Exact, case-insensitive token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRule {
    /// Lowercase token texts.
    pub words: Vec<String>,
}

impl PhraseRule {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }
}

impl Matcher for PhraseRule {
    fn find(&self, doc: &Doc, sentence: Sentence, out: &mut Vec<Vec<usize>>) {
        let n = self.words.len();
        if n == 0 || n > sentence.len() {
            return;
        }
        for start in sentence.start..=sentence.end - n {
            let hit = self
                .words
                .iter()
                .zip(&doc.tokens[start..start + n])
                .all(|(word, token)| *word == token.lower);
            if hit {
                out.push((start..start + n).collect());
            }
        }
    }
}
