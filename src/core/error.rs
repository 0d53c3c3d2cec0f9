//! Error types raised by the tag registry and the engine.
//!
//! Both are configuration defects rather than input problems: malformed or
//! unusual bios never produce an error, only inconsistent tag definitions do.

use thiserror::Error;

/// Raised while assembling a [`TagRegistry`](crate::core::tags::TagRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tag '{name}' described twice: \"{existing}\" vs \"{new}\"")]
    ConflictingDescription {
        name: String,
        existing: String,
        new: String,
    },

    #[error("tag '{name}' registered both as exclusive and non-exclusive")]
    ConflictingExclusivity { name: String },

    #[error("tag '{name}' registered under two different groups")]
    ConflictingGroup { name: String },

    #[error("disambiguation predicates registered twice for '{name}'")]
    DuplicatePredicate { name: String },

    #[error("unsupported separator in dependency rule \"{rule}\"")]
    UnsupportedSeparator { rule: String },

    #[error("malformed phrase \"{phrase}\": {reason}")]
    MalformedPhrase { phrase: String, reason: String },

    #[error("invalid token pattern \"{pattern}\": {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("tag '{name}' has ambiguous rules but no disambiguation predicate")]
    MissingPredicate { name: String },

    #[error("tag '{name}' refers to unknown tag '{target}'")]
    UnknownTag { name: String, target: String },

    #[error("tag '{name}' is not registered")]
    NotRegistered { name: String },

    #[error("tag '{name}' has no match rules")]
    EmptyRule { name: String },
}

/// Raised on first use of a registry whose tags overlap in a way the
/// conflict resolver cannot settle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(
        "tags '{first}' and '{second}' both match tokens {offsets:?} with no cancel relation between them"
    )]
    AmbiguousMatch {
        first: String,
        second: String,
        offsets: Vec<usize>,
    },
}
