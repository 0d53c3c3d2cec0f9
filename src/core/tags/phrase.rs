//! Compact phrase notation.
//!
//! Tag vocabularies are written as short strings that expand into match
//! rules:
//!
//! | notation          | expands to                                        |
//! |-------------------|---------------------------------------------------|
//! | `freelance(r)`    | `freelance`, `freelancer`                         |
//! | `tech=lead`       | `tech - lead`, `tech lead`, `techlead`            |
//! | `full-stack`      | `full - stack` (hyphens are separate tokens)      |
//! | `let's go`        | `let 's go` (clitics split like the parser does)  |
//! | `go?`             | any of the above, marked as needing disambiguation |
//! | `lead<<engineer`  | graph rule: `lead` within two hops below `engineer` |

use crate::core::{
    error::RegistryError,
    matchers::{GraphRule, PhraseRule, Relation, Rule, TokenSpec},
};

/// Hops allowed between modifier and anchor in a `modifier<<anchor` rule.
pub const DOMINANCE_HOPS: usize = 2;

/// Compile one phrase in compact notation into match rules.
pub fn compile(notation: &str) -> Result<Vec<Rule>, RegistryError> {
    let trimmed = notation.trim();
    let (body, maybe) = match trimmed.strip_suffix('?') {
        Some(body) => (body.trim_end(), true),
        None => (trimmed, false),
    };
    if body.is_empty() {
        return Err(malformed(notation, "empty phrase"));
    }

    let wrap = |kind: crate::core::matchers::MatchRule| Rule { kind, maybe };

    if body.contains("<<") {
        let graph = compile_dominance(body)?;
        return Ok(vec![wrap(graph.into())]);
    }
    if body.contains('<') || body.contains('>') {
        return Err(RegistryError::UnsupportedSeparator {
            rule: notation.to_string(),
        });
    }

    let mut sequences: Vec<Vec<String>> = vec![Vec::new()];
    for word in body.split_whitespace() {
        let variants = expand_word(word).map_err(|reason| malformed(notation, reason))?;
        sequences = sequences
            .iter()
            .flat_map(|prefix| {
                variants.iter().map(move |variant| {
                    let mut sequence = prefix.clone();
                    sequence.extend(variant.iter().cloned());
                    sequence
                })
            })
            .collect();
    }
    sequences.dedup();

    Ok(sequences
        .into_iter()
        .map(|words| wrap(PhraseRule { words }.into()))
        .collect())
}

fn compile_dominance(body: &str) -> Result<GraphRule, RegistryError> {
    let unsupported = || RegistryError::UnsupportedSeparator {
        rule: body.to_string(),
    };
    let sides: Vec<&str> = body.split("<<").collect();
    let [modifier, anchor] = sides.as_slice() else {
        return Err(unsupported());
    };
    let side_words = |side: &str| -> Result<Vec<String>, RegistryError> {
        let side = side.trim();
        if side.is_empty()
            || side.contains(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '=' | '-'))
        {
            return Err(unsupported());
        }
        expand_optional(&side.to_lowercase()).map_err(|reason| malformed(body, reason))
    };
    let modifiers = side_words(modifier)?;
    let anchors = side_words(anchor)?;

    let spec = |words: &[String]| -> TokenSpec {
        TokenSpec {
            lower: words.to_vec(),
            ..TokenSpec::default()
        }
    };
    Ok(GraphRule::new(spec(&anchors)).node(
        spec(&modifiers),
        0,
        Relation::AncestorWithin(DOMINANCE_HOPS),
    ))
}

/// Expand one whitespace-free word into its alternative token sequences.
fn expand_word(word: &str) -> Result<Vec<Vec<String>>, &'static str> {
    let mut sequences = Vec::new();
    for variant in expand_optional(&word.to_lowercase())? {
        let parts: Vec<&str> = variant.split('=').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err("empty side of '='");
        }
        let mut joined: Vec<String> = vec![parts[0].to_string()];
        for part in &parts[1..] {
            joined = joined
                .iter()
                .flat_map(|prefix| {
                    [
                        format!("{}-{}", prefix, part),
                        format!("{} {}", prefix, part),
                        format!("{}{}", prefix, part),
                    ]
                })
                .collect();
        }
        for form in joined {
            sequences.push(form.split(' ').flat_map(tokenize).collect());
        }
    }
    Ok(sequences)
}

/// `dev(s)` -> `dev`, `devs`. Several groups multiply out.
fn expand_optional(word: &str) -> Result<Vec<String>, &'static str> {
    let Some(open) = word.find('(') else {
        if word.contains(')') {
            return Err("unbalanced ')'");
        }
        return Ok(vec![word.to_string()]);
    };
    let Some(close) = word[open..].find(')').map(|c| open + c) else {
        return Err("unbalanced '('");
    };
    let (head, optional, rest) = (&word[..open], &word[open + 1..close], &word[close + 1..]);
    let mut out = Vec::new();
    for tail in expand_optional(rest)? {
        out.push(format!("{}{}", head, tail));
        out.push(format!("{}{}{}", head, optional, tail));
    }
    Ok(out)
}

/// Split a surface form the way the parser does: hyphens become their own
/// tokens and clitics (`'s`, `n't`) detach from the stem.
fn tokenize(form: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for (index, piece) in form.split('-').enumerate() {
        if index > 0 {
            tokens.push("-".to_string());
        }
        if piece.is_empty() {
            continue;
        }
        if let Some(stem) = piece.strip_suffix("n't").filter(|s| !s.is_empty()) {
            tokens.push(stem.to_string());
            tokens.push("n't".to_string());
        } else if let Some(apostrophe) = piece.find('\'').filter(|&a| a > 0) {
            tokens.push(piece[..apostrophe].to_string());
            tokens.push(piece[apostrophe..].to_string());
        } else {
            tokens.push(piece.to_string());
        }
    }
    tokens
}

fn malformed(phrase: &str, reason: &str) -> RegistryError {
    RegistryError::MalformedPhrase {
        phrase: phrase.to_string(),
        reason: reason.to_string(),
    }
}
