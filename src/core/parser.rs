//! Boundary with the external sentence parser.
//!
//! Tokenization, tagging and dependency parsing happen outside this crate.
//! Anything that can turn normalized text into a [`Doc`] can drive the
//! engine by implementing [`SentenceParser`]. [`PreParsed`] covers the
//! common case where the parser already ran and serialized its output.

use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::core::doc::{Doc, ParsedDoc};

pub trait SentenceParser {
    fn parse(&self, text: &str) -> Result<Doc>;
}

/// Serves documents that were parsed ahead of time, keyed by their text.
#[derive(Debug, Default)]
pub struct PreParsed {
    docs: HashMap<String, ParsedDoc>,
}

impl PreParsed {
    pub fn new(docs: impl IntoIterator<Item = ParsedDoc>) -> Self {
        Self {
            docs: docs.into_iter().map(|d| (d.text.clone(), d)).collect(),
        }
    }
}

impl SentenceParser for PreParsed {
    fn parse(&self, text: &str) -> Result<Doc> {
        let parsed = self
            .docs
            .get(text)
            .with_context(|| format!("no parse available for text: {:?}", text))?;
        Ok(Doc::from(parsed.clone()))
    }
}

/// Read parser output: a JSON array of documents, a single document, or
/// one document per line (JSON Lines).
pub fn read_parsed_docs(content: &str) -> Result<Vec<ParsedDoc>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Failed to parse document array");
    }
    if let Ok(doc) = serde_json::from_str::<ParsedDoc>(trimmed) {
        return Ok(vec![doc]);
    }
    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid document on line {}", n + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"text":"Dev","sentences":[{"tokens":[{"text":"Dev","pos":"NOUN","dep":"ROOT","head":0}]}]}"#;

    #[test]
    fn test_read_single_document() {
        let docs = read_parsed_docs(DOC).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_read_array() {
        let docs = read_parsed_docs(&format!("[{DOC},{DOC}]")).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_read_json_lines() {
        let docs = read_parsed_docs(&format!("{DOC}\n\n{DOC}\n")).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_read_reports_bad_line() {
        let err = read_parsed_docs(&format!("{DOC}\nnot json")).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_pre_parsed_lookup() {
        let parser = PreParsed::new(read_parsed_docs(DOC).unwrap());
        let doc = parser.parse("Dev").unwrap();
        assert_eq!(doc.tokens.len(), 1);
        assert!(parser.parse("missing").is_err());
    }
}
