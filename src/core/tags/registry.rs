use std::collections::HashMap;

use tracing::debug;

use super::{Resolve, Tag, TagDef, TagId, phrase};
use crate::core::{disambiguate::Predicate, error::RegistryError};

/// Collects tag definitions. Re-registering a name merges the new rules
/// into the existing definition; conflicting metadata is an error.
#[derive(Debug, Default)]
pub struct TagRegistryBuilder {
    defs: Vec<TagDef>,
    index: HashMap<String, usize>,
}

impl TagRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, def: TagDef) -> Result<&mut Self, RegistryError> {
        let Some(&i) = self.index.get(&def.name) else {
            self.index.insert(def.name.clone(), self.defs.len());
            self.defs.push(def);
            return Ok(self);
        };

        let existing = &mut self.defs[i];
        let name = || def.name.clone();
        if existing.group != def.group {
            return Err(RegistryError::ConflictingGroup { name: name() });
        }
        if existing.exclusive != def.exclusive {
            return Err(RegistryError::ConflictingExclusivity { name: name() });
        }
        if let (Some(a), Some(b)) = (&existing.description, &def.description)
            && a != b
        {
            return Err(RegistryError::ConflictingDescription {
                name: name(),
                existing: a.clone(),
                new: b.clone(),
            });
        }
        if !existing.predicates.is_empty() && !def.predicates.is_empty() {
            return Err(RegistryError::DuplicatePredicate { name: name() });
        }

        existing.phrases.extend(def.phrases);
        existing.rules.extend(def.rules);
        if existing.description.is_none() {
            existing.description = def.description;
        }
        if existing.predicates.is_empty() {
            existing.predicates = def.predicates;
        }
        if existing.cancels.is_none() {
            existing.cancels = def.cancels;
        }
        if matches!(existing.resolve, Resolve::Identity) {
            existing.resolve = def.resolve;
        }
        Ok(self)
    }

    /// Attach disambiguation predicates to an already registered tag.
    pub fn disambiguate(
        &mut self,
        name: &str,
        predicates: Vec<Predicate>,
    ) -> Result<&mut Self, RegistryError> {
        let def = self.def_mut(name)?;
        if !def.predicates.is_empty() {
            return Err(RegistryError::DuplicatePredicate {
                name: name.to_string(),
            });
        }
        def.predicates = predicates;
        Ok(self)
    }

    pub fn describe(&mut self, name: &str, description: &str) -> Result<&mut Self, RegistryError> {
        let def = self.def_mut(name)?;
        match &def.description {
            Some(existing) if existing != description => {
                Err(RegistryError::ConflictingDescription {
                    name: name.to_string(),
                    existing: existing.clone(),
                    new: description.to_string(),
                })
            }
            _ => {
                def.description = Some(description.to_string());
                Ok(self)
            }
        }
    }

    fn def_mut(&mut self, name: &str) -> Result<&mut TagDef, RegistryError> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.defs[i]),
            None => Err(RegistryError::NotRegistered {
                name: name.to_string(),
            }),
        }
    }

    /// Compile phrases, validate every rule and cross-reference, and freeze.
    pub fn build(self) -> Result<TagRegistry, RegistryError> {
        let by_name: HashMap<String, TagId> = self
            .index
            .iter()
            .map(|(name, &i)| (name.clone(), TagId(i)))
            .collect();

        let mut tags = Vec::with_capacity(self.defs.len());
        for def in self.defs {
            let mut rules = Vec::new();
            for notation in &def.phrases {
                rules.extend(phrase::compile(notation)?);
            }
            rules.extend(def.rules);
            if rules.is_empty() {
                return Err(RegistryError::EmptyRule { name: def.name });
            }
            for rule in &rules {
                rule.kind.validate()?;
            }
            if rules.iter().any(|r| r.maybe) && def.predicates.is_empty() {
                return Err(RegistryError::MissingPredicate { name: def.name });
            }

            let lookup = |target: &str| {
                by_name
                    .get(target)
                    .copied()
                    .ok_or_else(|| RegistryError::UnknownTag {
                        name: def.name.clone(),
                        target: target.to_string(),
                    })
            };
            let cancels = def.cancels.as_deref().map(&lookup).transpose()?;
            for predicate in &def.predicates {
                for term in predicate.referenced_tags() {
                    lookup(term)?;
                }
            }

            tags.push(Tag {
                name: def.name,
                group: def.group,
                rules,
                exclusive: def.exclusive,
                predicates: def.predicates,
                resolve: def.resolve,
                cancels,
                description: def.description,
            });
        }

        debug!(tags = tags.len(), "tag registry built");
        Ok(TagRegistry { tags, by_name })
    }
}

/// Immutable set of compiled tags, shared read-only by every analysis.
#[derive(Debug)]
pub struct TagRegistry {
    tags: Vec<Tag>,
    by_name: HashMap<String, TagId>,
}

impl TagRegistry {
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder::new()
    }

    pub fn tag(&self, id: TagId) -> &Tag {
        &self.tags[id.0]
    }

    pub fn id(&self, name: &str) -> Option<TagId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagId, &Tag)> {
        self.tags.iter().enumerate().map(|(i, t)| (TagId(i), t))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether `canceller` is registered as the cancel tag for `target`.
    pub fn cancels(&self, canceller: TagId, target: TagId) -> bool {
        self.tag(canceller).cancels == Some(target)
    }
}
