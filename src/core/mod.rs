//! Core extraction engine.
//!
//! A document flows through four phases:
//!
//! 1. **Match** ([`matchers`]): every rule of every tag runs over each
//!    sentence and yields raw `(tag, offsets)` matches.
//! 2. **Resolve** ([`conflict`]): ambiguous spans are rejected, cancelled
//!    and shadowed matches are dropped.
//! 3. **Disambiguate** ([`disambiguate`]): matches from `maybe` rules are
//!    kept only when one of their tag's predicates holds.
//! 4. **Mark** ([`markers`]): resolvers ask each entity's anchor for its
//!    hashtag/negated/past/future polarity.
//!
//! [`engine::Engine`] runs phases 1 to 3; the domain resolvers in
//! [`crate::rules`] consume the result.

pub mod conflict;
pub mod disambiguate;
pub mod doc;
pub mod engine;
pub mod entity;
pub mod error;
pub mod markers;
pub mod matchers;
pub mod parser;
pub mod tags;

pub use doc::Doc;
pub use engine::Engine;
pub use entity::Entity;
pub use error::{EngineError, RegistryError};
pub use parser::{PreParsed, SentenceParser};
