use anyhow::Result;

use super::super::{args::TagsCommand, exit_status::ExitStatus, report};
use super::{build_registry, load_settings};
use crate::core::tags::Tag;

/// List the active registry, extra skills from the config included.
pub fn tags(cmd: TagsCommand) -> Result<ExitStatus> {
    let config = load_settings(&cmd.common)?;
    let registry = build_registry(&config)?;

    let selected: Vec<&Tag> = registry
        .iter()
        .map(|(_, tag)| tag)
        .filter(|tag| in_group(tag, cmd.group.as_deref()))
        .collect();

    if selected.is_empty()
        && let Some(group) = &cmd.group
    {
        eprintln!("No tags in group \"{}\"", group);
        return Ok(ExitStatus::Failure);
    }

    report::print_tags(selected, &registry);
    Ok(ExitStatus::Success)
}

fn in_group(tag: &Tag, group: Option<&str>) -> bool {
    group.is_none_or(|g| tag.group.to_string().starts_with(g))
}
