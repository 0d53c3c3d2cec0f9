//! Conflict resolution over raw matches.
//!
//! Rules, applied per match against every other match:
//!
//! 1. Two different tags on the identical span with no cancel relation
//!    between them is a tag-design defect: [`EngineError::AmbiguousMatch`].
//! 2. A match overlapped by its registered cancel tag is dropped.
//! 3. An exclusive match whose span is a strict subset of another exclusive
//!    match's span is dropped.
//!
//! Cancel tags never survive: they exist only to suppress.

use tracing::debug;

use crate::core::{error::EngineError, matchers::RawMatch, tags::TagRegistry};

pub fn resolve_conflicts(
    registry: &TagRegistry,
    matches: Vec<RawMatch>,
) -> Result<Vec<RawMatch>, EngineError> {
    check_ambiguity(registry, &matches)?;

    let keep: Vec<bool> = matches
        .iter()
        .enumerate()
        .map(|(index, m)| {
            let tag = registry.tag(m.key.tag);
            !tag.is_cancel()
                && !matches.iter().enumerate().any(|(other_index, other)| {
                    if other_index == index || !overlaps(&m.offsets, &other.offsets) {
                        return false;
                    }
                    if registry.cancels(other.key.tag, m.key.tag) {
                        debug!(tag = %tag.name, offsets = ?m.offsets, "cancelled");
                        return true;
                    }
                    let other_tag = registry.tag(other.key.tag);
                    if tag.exclusive
                        && other_tag.exclusive
                        && is_strict_superset(&other.offsets, &m.offsets)
                    {
                        debug!(
                            tag = %tag.name,
                            offsets = ?m.offsets,
                            by = %other_tag.name,
                            "dropped by wider exclusive match"
                        );
                        return true;
                    }
                    false
                })
        })
        .collect();

    Ok(matches
        .into_iter()
        .zip(keep)
        .filter_map(|(m, keep)| keep.then_some(m))
        .collect())
}

fn check_ambiguity(registry: &TagRegistry, matches: &[RawMatch]) -> Result<(), EngineError> {
    for (index, m) in matches.iter().enumerate() {
        for other in &matches[index + 1..] {
            if other.key.tag == m.key.tag || other.offsets != m.offsets {
                continue;
            }
            if registry.cancels(m.key.tag, other.key.tag)
                || registry.cancels(other.key.tag, m.key.tag)
            {
                continue;
            }
            return Err(EngineError::AmbiguousMatch {
                first: registry.tag(m.key.tag).name.clone(),
                second: registry.tag(other.key.tag).name.clone(),
                offsets: m.offsets.clone(),
            });
        }
    }
    Ok(())
}

/// Both slices are ascending.
fn overlaps(a: &[usize], b: &[usize]) -> bool {
    a.iter().any(|i| b.binary_search(i).is_ok())
}

fn is_strict_superset(wider: &[usize], narrower: &[usize]) -> bool {
    wider.len() > narrower.len() && narrower.iter().all(|i| wider.binary_search(i).is_ok())
}
