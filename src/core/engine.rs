//! Per-document orchestration: match, resolve, anchor, disambiguate.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    core::{
        conflict::resolve_conflicts,
        disambiguate::disambiguate,
        doc::Doc,
        entity::Entity,
        error::EngineError,
        matchers::find_matches,
        parser::SentenceParser,
        tags::TagRegistry,
    },
    profile::Profile,
    rules,
};

/// Runs a shared, immutable [`TagRegistry`] over documents.
///
/// Cloning is cheap and every clone sees the same registry, so one engine can
/// serve many worker threads.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<TagRegistry>,
}

impl Engine {
    pub fn new(registry: impl Into<Arc<TagRegistry>>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Resolved entities of `doc`, ordered by `(anchor, first offset, name)`.
    pub fn analyze(&self, doc: &Doc) -> Result<Vec<Entity>, EngineError> {
        let registry = self.registry();
        let raw = find_matches(registry, doc);
        let raw_count = raw.len();
        let survivors = resolve_conflicts(registry, raw)?;

        let mut candidates: Vec<Entity> = survivors
            .into_iter()
            .filter_map(|m| Entity::from_match(registry, doc, m))
            .collect();
        candidates.sort_by(|a, b| {
            (a.anchor, a.offsets[0], &a.name).cmp(&(b.anchor, b.offsets[0], &b.name))
        });

        let entities = disambiguate(registry, doc, candidates);
        debug!(
            tokens = doc.len(),
            raw = raw_count,
            entities = entities.len(),
            "analyzed document"
        );
        Ok(entities)
    }

    pub fn extract(&self, doc: &Doc) -> Result<Profile, EngineError> {
        let entities = self.analyze(doc)?;
        Ok(rules::build_profile(self.registry(), doc, &entities))
    }

    /// Parse `text` with `parser`, then [`extract`](Self::extract).
    pub fn extract_text(&self, parser: &impl SentenceParser, text: &str) -> Result<Profile> {
        let doc = parser.parse(text)?;
        self.extract(&doc)
            .with_context(|| format!("Failed to extract profile from {:?}", text))
    }
}
