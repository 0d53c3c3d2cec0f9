//! biotag - polarity-aware fact extraction from short developer bios
//!
//! biotag reads dependency-parsed bios and reports who the author is (role,
//! seniority, years of experience, skills), taking negation, past tense and
//! intent into account: "not a student", "ex-Googler" and "aspiring
//! developer" each resolve differently from a plain mention.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and validation
//! - `core`: Extraction engine (tags, matchers, conflicts, markers)
//! - `profile`: Output records
//! - `rules`: Built-in tags and the role, experience and skill resolvers
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod profile;
pub mod rules;
pub mod utils;
