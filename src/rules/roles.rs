//! Roles and work attributes.
//!
//! | group       | affirmed        | negated          | past | future         |
//! |-------------|-----------------|------------------|------|----------------|
//! | Role(Dev)   | role=dev, title | -                | -    | role=student   |
//! | Role(other) | role, title     | -                | -    | -              |
//! | Freelancer  | freelancer=true | freelancer=false | -    | hireable=true  |
//! | Lead        | lead=true       | lead=false       | -    | -              |
//! | Remote      | remote=true     | remote=false     | -    | remote=true    |
//! | Hireable    | hireable=true   | hireable=false   | -    | hireable=true  |
//!
//! Every field keeps the first value assigned to it.

use crate::{
    core::{
        doc::Doc,
        error::RegistryError,
        markers::Stance,
        tags::{Group, TagDef, TagRegistryBuilder},
    },
    profile::{Role, RoleRecord},
};

use super::Marked;

pub fn register(builder: &mut TagRegistryBuilder) -> Result<(), RegistryError> {
    let role_tag = |name: &str, role: Role, phrases: &[&str], description: &str| {
        TagDef::new(name, Group::Role(role))
            .phrases(phrases)
            .exclusive()
            .describe(description)
    };

    builder
        .add(role_tag(
            "developer",
            Role::Dev,
            &["developer(s)", "engineer(s)", "programmer(s)", "coder(s)", "dev(s)"],
            "Writes software for a living",
        ))?
        .add(role_tag("student", Role::Student, &["student(s)"], "Studying"))?
        .add(role_tag("designer", Role::Designer, &["designer(s)"], "Designs products or interfaces"))?
        .add(role_tag("manager", Role::Manager, &["manager(s)"], "Manages people or products"))?
        .add(role_tag(
            "founder",
            Role::Founder,
            &["founder(s)", "co=founder(s)", "ceo"],
            "Founded a company",
        ))?
        .add(role_tag("recruiter", Role::Recruiter, &["recruiter(s)"], "Hires people"))?
        .add(role_tag("researcher", Role::Researcher, &["researcher(s)"], "Does research"))?
        .add(
            TagDef::new("freelancer", Group::Freelancer)
                .phrases(&["freelance(r)", "freelancing"])
                .describe("Works freelance"),
        )?
        .add(
            TagDef::new("lead", Group::Lead)
                .phrases(&[
                    "tech=lead",
                    "team lead",
                    "lead<<engineer(s)",
                    "lead<<developer(s)",
                    "lead<<dev(s)",
                    "lead<<programmer(s)",
                ])
                .describe("Leads a team"),
        )?
        .add(
            TagDef::new("remote", Group::Remote)
                .phrases(&["remote", "remotely", "remote=first"])
                .describe("Works remotely"),
        )?
        .add(
            TagDef::new("hireable", Group::Hireable)
                .phrases(&[
                    "hireable",
                    "open to work",
                    "available for hire",
                    "looking for work",
                    "for hire",
                    "opentowork",
                ])
                .exclusive()
                .describe("Open to job offers"),
        )?;
    Ok(())
}

pub fn resolve(doc: &Doc, marked: &[Marked]) -> RoleRecord {
    let mut record = RoleRecord::default();
    for m in marked {
        match (m.tag.group, m.stance) {
            (Group::Role(role), Stance::Affirmed) => {
                if record.role.is_none() {
                    record.role = Some(role);
                    record.title = Some(title_of(doc, m.entity.anchor));
                }
            }
            (Group::Role(Role::Dev), Stance::Future) => set_once(&mut record.role, Role::Student),
            (Group::Freelancer, Stance::Affirmed) => set_once(&mut record.freelancer, true),
            (Group::Freelancer, Stance::Negated) => set_once(&mut record.freelancer, false),
            (Group::Freelancer, Stance::Future) => set_once(&mut record.hireable, true),
            (Group::Lead, Stance::Affirmed) => set_once(&mut record.lead, true),
            (Group::Lead, Stance::Negated) => set_once(&mut record.lead, false),
            (Group::Remote, Stance::Affirmed | Stance::Future) => {
                set_once(&mut record.remote, true)
            }
            (Group::Remote, Stance::Negated) => set_once(&mut record.remote, false),
            (Group::Hireable, Stance::Affirmed | Stance::Future) => {
                set_once(&mut record.hireable, true)
            }
            (Group::Hireable, Stance::Negated) => set_once(&mut record.hireable, false),
            _ => {}
        }
    }
    record
}

fn set_once<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// The role noun at `anchor` with its contiguous left modifiers, hyphenated
/// pairs included ("full-stack developer").
pub fn title_of(doc: &Doc, anchor: usize) -> String {
    let offsets: Vec<usize> = (doc.modifier_start(anchor)..=anchor).collect();
    doc.span_text(&offsets)
}
