//! Built-in vocabulary and the resolvers that fold entities into a profile.
//!
//! Each submodule owns one slice of the output record: it registers the tags
//! it understands and exposes a pure `resolve` function over the marked
//! entities of a document.
//!
//! ## Module Structure
//!
//! - `roles`: role nouns plus freelancer/lead/remote/hireable attributes
//! - `experience`: seniority levels and stated durations
//! - `skills`: technologies, aliases, stacks and their disambiguation

pub mod experience;
pub mod roles;
pub mod skills;

use tracing::trace;

use crate::{
    config::Config,
    core::{
        doc::Doc,
        entity::Entity,
        error::RegistryError,
        markers::Stance,
        tags::{Tag, TagRegistry, TagRegistryBuilder},
    },
    profile::Profile,
};

/// An entity together with its tag and the polarity reading resolvers act on.
#[derive(Debug, Clone, Copy)]
pub struct Marked<'a> {
    pub entity: &'a Entity,
    pub tag: &'a Tag,
    pub stance: Stance,
}

impl Marked<'_> {
    /// Plain or hashtagged.
    pub fn is_affirmed(&self) -> bool {
        self.stance == Stance::Affirmed
    }
}

pub fn register_defaults(builder: &mut TagRegistryBuilder) -> Result<(), RegistryError> {
    roles::register(builder)?;
    experience::register(builder)?;
    skills::register(builder)?;
    Ok(())
}

pub fn default_registry() -> Result<TagRegistry, RegistryError> {
    let mut builder = TagRegistry::builder();
    register_defaults(&mut builder)?;
    builder.build()
}

/// The built-in vocabulary plus whatever the configuration adds.
pub fn registry_from_config(config: &Config) -> Result<TagRegistry, RegistryError> {
    let mut builder = TagRegistry::builder();
    register_defaults(&mut builder)?;
    skills::register_extra(&mut builder, &config.extra_skills)?;
    builder.build()
}

/// Fold resolved entities (in engine order) into a [`Profile`].
pub fn build_profile(registry: &TagRegistry, doc: &Doc, entities: &[Entity]) -> Profile {
    let marked: Vec<Marked> = entities
        .iter()
        .map(|entity| {
            let polarity = entity.polarity(doc);
            trace!(tag = %entity.name, text = %entity.text(doc), ?polarity, "marked");
            Marked {
                entity,
                tag: registry.tag(entity.tag),
                stance: polarity.stance(),
            }
        })
        .filter(|m| !m.tag.is_cancel())
        .collect();

    Profile {
        roles: roles::resolve(doc, &marked),
        experience: experience::resolve(doc, &marked),
        skills: skills::resolve(&marked),
    }
}
