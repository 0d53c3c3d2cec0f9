//! Parsed document model.
//!
//! A [`Doc`] is the engine's view of one biography after the external parser
//! has split it into sentences and annotated every token with a coarse POS
//! tag, a dependency label and a head. Token indices are document-wide;
//! heads never cross sentence boundaries.
//!
//! Parsers make mistakes, so every navigation helper here is total: a head
//! pointing outside its sentence is treated as a self-headed root, and walks
//! up the tree are bounded by the sentence length so a cyclic parse cannot
//! hang the engine.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Dependency labels of left modifiers that belong to a noun phrase
/// ("senior backend engineer").
const MODIFIER_DEPS: &[&str] = &["compound", "amod", "nmod"];

/// Coarse part-of-speech category (Universal POS tag set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    X,
}

impl Pos {
    /// Parse a tag name such as `"NOUN"`. Unknown tags map to [`Pos::X`].
    pub fn parse(tag: &str) -> Pos {
        match tag.to_ascii_uppercase().as_str() {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            "CCONJ" | "CONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            "SPACE" => Pos::Space,
            _ => Pos::X,
        }
    }

    /// Nouns, adjectives and numerals: the categories the marker engine
    /// climbs through when it looks for a token's governing phrase.
    pub fn is_content(self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn | Pos::Adj | Pos::Num)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::Space => "SPACE",
            Pos::X => "X",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Document-wide position.
    pub i: usize,
    pub text: String,
    pub lower: String,
    pub pos: Pos,
    /// Dependency relation to the head (`nsubj`, `amod`, `ROOT`, ...).
    pub dep: String,
    /// Document-wide index of the head. Equal to `i` at the sentence root.
    pub head: usize,
    /// Index of the owning sentence.
    pub sent: usize,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.head == self.i
    }

    pub fn is_punct(&self) -> bool {
        self.pos == Pos::Punct
    }

    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Token range `[start, end)` of one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

impl Sentence {
    pub fn contains(&self, i: usize) -> bool {
        (self.start..self.end).contains(&i)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sents: Vec<Sentence>,
}

// ============================================================
// Wire format produced by the external parser
// ============================================================

/// A document as serialized by the external parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedDoc {
    #[serde(default)]
    pub text: String,
    pub sentences: Vec<ParsedSentence>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSentence {
    pub tokens: Vec<ParsedToken>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedToken {
    pub text: String,
    pub pos: String,
    pub dep: String,
    /// Sentence-relative index of the head token.
    pub head: usize,
}

impl From<ParsedDoc> for Doc {
    fn from(parsed: ParsedDoc) -> Self {
        let mut doc = Doc {
            text: parsed.text,
            ..Doc::default()
        };
        for sentence in parsed.sentences {
            doc.push_sentence(
                sentence
                    .tokens
                    .into_iter()
                    .map(|t| (t.text, Pos::parse(&t.pos), t.dep, t.head)),
            );
        }
        if doc.text.is_empty() {
            doc.text = doc.surface();
        }
        doc
    }
}

impl Doc {
    /// Build a document from rows of `(text, pos, dep, head)` per sentence,
    /// where `head` is sentence-relative.
    ///
    /// ```
    /// use biotag::core::doc::Doc;
    ///
    /// let doc = Doc::from_rows(&[&[
    ///     ("Senior", "ADJ", "amod", 1),
    ///     ("developer", "NOUN", "ROOT", 1),
    /// ]]);
    /// assert_eq!(doc.tokens[0].head, 1);
    /// assert_eq!(doc.depth(0), 1);
    /// ```
    pub fn from_rows(sentences: &[&[(&str, &str, &str, usize)]]) -> Doc {
        let mut doc = Doc::default();
        for rows in sentences {
            doc.push_sentence(rows.iter().map(|(text, pos, dep, head)| {
                (text.to_string(), Pos::parse(pos), dep.to_string(), *head)
            }));
        }
        doc.text = doc.surface();
        doc
    }

    fn push_sentence(&mut self, tokens: impl Iterator<Item = (String, Pos, String, usize)>) {
        let start = self.tokens.len();
        let sent = self.sents.len();
        let rows: Vec<_> = tokens.collect();
        let len = rows.len();
        for (offset, (text, pos, dep, head)) in rows.into_iter().enumerate() {
            let i = start + offset;
            let head = if head < len {
                start + head
            } else {
                warn!(token = %text, head, "head index out of range, treating token as root");
                i
            };
            self.tokens.push(Token {
                i,
                lower: text.to_lowercase(),
                text,
                pos,
                dep,
                head,
                sent,
            });
        }
        if len > 0 {
            self.sents.push(Sentence {
                start,
                end: start + len,
            });
        }
    }

    /// Space-joined token text; used when the parser did not echo the input.
    fn surface(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn sentence_of(&self, i: usize) -> Sentence {
        self.sents[self.tokens[i].sent]
    }

    pub fn head(&self, i: usize) -> &Token {
        &self.tokens[self.tokens[i].head]
    }

    /// Direct dependents of `i`, in sentence order.
    pub fn children(&self, i: usize) -> impl Iterator<Item = &Token> + '_ {
        let sentence = self.sentence_of(i);
        self.tokens[sentence.start..sentence.end]
            .iter()
            .filter(move |t| t.head == i && t.i != i)
    }

    /// Number of head hops from `i` to its sentence root.
    pub fn depth(&self, i: usize) -> usize {
        self.ancestors(i).count()
    }

    /// Ancestors of `i`, nearest first. Stops at the root, or after as many
    /// hops as the sentence has tokens when the parse contains a cycle.
    pub fn ancestors(&self, i: usize) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            current: i,
            remaining: self.sentence_of(i).len(),
        }
    }

    /// Whether `ancestor` dominates `i` within `max_hops` head links.
    pub fn is_ancestor(&self, ancestor: usize, i: usize, max_hops: usize) -> bool {
        self.ancestors(i).take(max_hops).any(|a| a == ancestor)
    }

    /// Whether token `i` is directly preceded by `#` in its sentence.
    pub fn is_hashtagged(&self, i: usize) -> bool {
        i > self.sentence_of(i).start && self.tokens[i - 1].text == "#"
    }

    /// Leftmost token of the contiguous modifier run in front of `i`: compound,
    /// amod and nmod dependents whose head lies inside the run, hyphens
    /// skipped. `senior full - stack developer` starts at `senior`; an
    /// adverb such as `now` ends the run.
    pub fn modifier_start(&self, i: usize) -> usize {
        let sentence_start = self.sentence_of(i).start;
        let mut start = i;
        while start > sentence_start {
            let mut j = start - 1;
            if self.tokens[j].text == "-" && j > sentence_start {
                j -= 1;
            }
            let token = &self.tokens[j];
            let attached = token.head > j && token.head <= i;
            if token.is_punct() || !attached || !MODIFIER_DEPS.contains(&token.dep.as_str()) {
                break;
            }
            start = j;
        }
        start
    }

    /// Token text joined with single spaces, gluing hyphens to their
    /// neighbours so `tech - lead` reads back as `tech-lead`.
    pub fn span_text(&self, offsets: &[usize]) -> String {
        let mut out = String::new();
        let mut previous: Option<usize> = None;
        for &i in offsets {
            let text = &self.tokens[i].text;
            let glued = previous.is_some_and(|p| {
                p + 1 == i && (text == "-" || self.tokens[p].text == "-")
            });
            if previous.is_some() && !glued {
                out.push(' ');
            }
            out.push_str(text);
            previous = Some(i);
        }
        out
    }
}

pub struct Ancestors<'a> {
    doc: &'a Doc,
    current: usize,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let head = self.doc.tokens[self.current].head;
        if head == self.current {
            return None;
        }
        self.remaining -= 1;
        self.current = head;
        Some(head)
    }
}
