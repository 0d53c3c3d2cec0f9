//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract profiles from pre-parsed bios
//! - `tags`: List the tags of the active registry
//! - `init`: Initialize biotag configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Tags(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Configuration file (default: nearest .biotagrc.json)
    #[arg(long, env = "BIOTAG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Parser output files (JSON array, single document or JSON Lines).
    /// Reads stdin when no file is given or the file is "-"
    pub files: Vec<PathBuf>,

    /// Output format (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TagsCommand {
    /// Only list tags whose group starts with this (e.g. "skill", "role", "level:senior")
    #[arg(long)]
    pub group: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract role, experience and skills from pre-parsed bios
    Extract(ExtractCommand),
    /// List registered tags with their group and description
    Tags(TagsCommand),
    /// Initialize a new .biotagrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract() {
        let args = Arguments::parse_from(["biotag", "extract", "a.json", "b.jsonl", "--format", "text", "-v"]);
        let Some(Command::Extract(cmd)) = &args.command else {
            panic!("expected extract command");
        };
        assert_eq!(cmd.files, vec![PathBuf::from("a.json"), PathBuf::from("b.jsonl")]);
        assert_eq!(cmd.format, Some(OutputFormat::Text));
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_tags_group() {
        let args = Arguments::parse_from(["biotag", "tags", "--group", "skill"]);
        let Some(Command::Tags(cmd)) = &args.command else {
            panic!("expected tags command");
        };
        assert_eq!(cmd.group.as_deref(), Some("skill"));
        assert!(!args.verbose());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Arguments::command().debug_assert();
    }
}
