use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;

mod extract;
mod init;
mod tags;

const BIN_NAME: &str = "biotag";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Keeps config discovery from walking above the sandbox.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn extract_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("extract");
        cmd
    }

    pub fn tags_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("tags");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// One parser token: text, coarse POS, dependency label, sentence-relative head.
pub type Row<'a> = (&'a str, &'a str, &'a str, usize);

/// Serialize sentences of tokens the way the external parser does.
pub fn parsed_doc(text: &str, sentences: &[&[Row]]) -> Value {
    let sentences: Vec<Value> = sentences
        .iter()
        .map(|tokens| {
            let tokens: Vec<Value> = tokens
                .iter()
                .map(|(text, pos, dep, head)| {
                    json!({ "text": text, "pos": pos, "dep": dep, "head": head })
                })
                .collect();
            json!({ "tokens": tokens })
        })
        .collect();
    json!({ "text": text, "sentences": sentences })
}

/// Profiles printed on stdout in JSON mode, one per line.
pub fn profiles(stdout: &[u8]) -> Result<Vec<Value>> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).context("stdout line should be a JSON profile"))
        .collect()
}
