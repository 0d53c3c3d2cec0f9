//! Tag definitions and the immutable tag registry.
//!
//! A tag names one kind of fact ("developer", "remote", "typescript") and
//! carries everything the engine needs to find and interpret it: match
//! rules, exclusivity, disambiguation predicates, a resolve function and an
//! optional cancel target. Definitions are collected by a
//! [`TagRegistryBuilder`] and frozen into a [`TagRegistry`] in one pass.

pub mod phrase;
mod registry;

pub use registry::{TagRegistry, TagRegistryBuilder};

use crate::{
    core::{disambiguate::Predicate, matchers::Rule},
    profile::{Level, Role},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub usize);

/// Canonical group of a tag: decides which resolver consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Role(Role),
    Freelancer,
    Lead,
    Remote,
    Hireable,
    Level(Level),
    ExactExperience,
    Skill,
    /// Exists only to suppress another tag; never reaches a resolver.
    Cancel,
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Group::Role(role) => write!(f, "role:{}", role),
            Group::Freelancer => write!(f, "freelancer"),
            Group::Lead => write!(f, "lead"),
            Group::Remote => write!(f, "remote"),
            Group::Hireable => write!(f, "hireable"),
            Group::Level(level) => write!(f, "level:{}", level),
            Group::ExactExperience => write!(f, "experience"),
            Group::Skill => write!(f, "skill"),
            Group::Cancel => write!(f, "cancel"),
        }
    }
}

/// Maps a matched entity to its output labels.
#[derive(Debug, Clone, Default)]
pub enum Resolve {
    /// The tag's own name.
    #[default]
    Identity,
    Alias(String),
    /// Composite tag ("stack"): expands to its components, in order.
    Expand(Vec<String>),
    /// Matched, but contributes nothing.
    Skip,
}

impl Resolve {
    pub fn labels(&self, name: &str) -> Vec<String> {
        match self {
            Resolve::Identity => vec![name.to_string()],
            Resolve::Alias(label) => vec![label.clone()],
            Resolve::Expand(labels) => labels.clone(),
            Resolve::Skip => Vec::new(),
        }
    }
}

/// Declarative tag definition, consumed by [`TagRegistryBuilder::add`].
///
/// ```
/// use biotag::core::tags::{Group, Resolve, TagDef};
///
/// let mern = TagDef::new("mern", Group::Skill)
///     .phrases(&["mern", "mern stack"])
///     .exclusive()
///     .resolve(Resolve::Expand(vec!["mongodb".into(), "express".into()]))
///     .describe("MongoDB, Express, React and Node.js");
/// assert_eq!(mern.phrases.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TagDef {
    pub name: String,
    pub group: Group,
    /// Compact notation, compiled when the registry is built.
    pub phrases: Vec<String>,
    pub rules: Vec<Rule>,
    pub exclusive: bool,
    pub predicates: Vec<Predicate>,
    pub resolve: Resolve,
    /// Name of the tag this one suppresses on overlap.
    pub cancels: Option<String>,
    pub description: Option<String>,
}

impl TagDef {
    pub fn new(name: &str, group: Group) -> Self {
        Self {
            name: name.to_string(),
            group,
            phrases: Vec::new(),
            rules: Vec::new(),
            exclusive: false,
            predicates: Vec::new(),
            resolve: Resolve::Identity,
            cancels: None,
            description: None,
        }
    }

    /// A tag that removes `target` matches it overlaps with.
    pub fn cancel(name: &str, target: &str) -> Self {
        let mut def = Self::new(name, Group::Cancel);
        def.cancels = Some(target.to_string());
        def
    }

    pub fn phrases(mut self, phrases: &[&str]) -> Self {
        self.phrases.extend(phrases.iter().map(|p| p.to_string()));
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }

    pub fn disambiguate(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicates = predicates;
        self
    }

    pub fn resolve(mut self, resolve: Resolve) -> Self {
        self.resolve = resolve;
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// A compiled tag as stored in the registry.
#[derive(Debug, Clone)]
pub struct Tag {
    pub name: String,
    pub group: Group,
    pub rules: Vec<Rule>,
    pub exclusive: bool,
    pub predicates: Vec<Predicate>,
    pub resolve: Resolve,
    pub cancels: Option<TagId>,
    pub description: Option<String>,
}

impl Tag {
    pub fn is_cancel(&self) -> bool {
        self.cancels.is_some()
    }
}
