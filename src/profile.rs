//! Output record types.
//!
//! A [`Profile`] is everything extracted from one bio. Scalar fields are
//! `None` when the text gave no evidence, which is different from an explicit
//! `Some(false)` ("not a freelancer").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Dev,
    Student,
    Designer,
    Manager,
    Founder,
    Recruiter,
    Researcher,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Dev => write!(f, "dev"),
            Role::Student => write!(f, "student"),
            Role::Designer => write!(f, "designer"),
            Role::Manager => write!(f, "manager"),
            Role::Founder => write!(f, "founder"),
            Role::Recruiter => write!(f, "recruiter"),
            Role::Researcher => write!(f, "researcher"),
        }
    }
}

/// Seniority named in the text ("junior", "senior", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Middle,
    Senior,
    Principal,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Junior => write!(f, "junior"),
            Level::Middle => write!(f, "middle"),
            Level::Senior => write!(f, "senior"),
            Level::Principal => write!(f, "principal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    /// A duration was stated ("5+ years of experience").
    Exact,
    Junior,
    Middle,
    Senior,
    Principal,
}

impl std::fmt::Display for ExperienceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceKind::Exact => write!(f, "exact"),
            ExperienceKind::Junior => write!(f, "junior"),
            ExperienceKind::Middle => write!(f, "middle"),
            ExperienceKind::Senior => write!(f, "senior"),
            ExperienceKind::Principal => write!(f, "principal"),
        }
    }
}

impl From<Level> for ExperienceKind {
    fn from(level: Level) -> Self {
        match level {
            Level::Junior => ExperienceKind::Junior,
            Level::Middle => ExperienceKind::Middle,
            Level::Senior => ExperienceKind::Senior,
            Level::Principal => ExperienceKind::Principal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub kind: ExperienceKind,
    /// Only set for [`ExperienceKind::Exact`].
    pub months: Option<u32>,
    /// "5+ years", "over 5 years".
    pub over: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub role: Option<Role>,
    pub freelancer: Option<bool>,
    pub lead: Option<bool>,
    pub remote: Option<bool>,
    pub hireable: Option<bool>,
    /// Surface form of the phrase that set `role`, e.g. "senior backend engineer".
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(flatten)]
    pub roles: RoleRecord,
    pub experience: Option<Experience>,
    pub skills: Vec<String>,
}
