use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::tags::phrase;

pub const CONFIG_FILE_NAME: &str = ".biotagrc.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON profile per line
    #[default]
    Json,
    /// Human-readable summary
    Text,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extra skill tags: output label to phrases in compact notation.
    #[serde(default)]
    pub extra_skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a skill label is empty, has no phrases, or a phrase
    /// does not compile.
    pub fn validate(&self) -> Result<()> {
        for (label, phrases) in &self.extra_skills {
            if label.trim().is_empty() {
                bail!("Empty skill label in 'extraSkills'");
            }
            if phrases.is_empty() {
                bail!("Skill \"{}\" in 'extraSkills' has no phrases", label);
            }
            for notation in phrases {
                phrase::compile(notation).with_context(|| {
                    format!("Invalid phrase in 'extraSkills.{}': \"{}\"", label, notation)
                })?;
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extra_skills.is_empty());
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "extraSkills": { "elixir": ["elixir", "phoenix"] },
              "format": "text"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.extra_skills["elixir"], vec!["elixir", "phoenix"]);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "format": "text" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.extra_skills.is_empty());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let json = r#"{ "format": "yaml" }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("bios").join("2024");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, r#"{ "extraSkills": { "zig": ["zig(lang)"] } }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert_eq!(result.path, Some(config_path));
        assert_eq!(result.config.extra_skills["zig"], vec!["zig(lang)"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.path.is_none());
        assert!(result.config.extra_skills.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_phrase() {
        let config = Config {
            extra_skills: BTreeMap::from([("bad".to_string(), vec!["a>>b".to_string()])]),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("extraSkills.bad"));
    }

    #[test]
    fn test_validate_rejects_empty_phrase_list() {
        let config = Config {
            extra_skills: BTreeMap::from([("zig".to_string(), Vec::new())]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        assert!(json.contains("extraSkills"));
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
    }
}
