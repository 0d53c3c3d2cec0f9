use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::{debug, info_span};

use super::super::{args::ExtractCommand, exit_status::ExitStatus, report};
use super::{build_registry, load_settings};
use crate::{
    core::{
        doc::{Doc, ParsedDoc},
        engine::Engine,
        error::EngineError,
        parser::read_parsed_docs,
    },
    profile::Profile,
};

/// Outcome of one input document.
#[derive(Debug)]
pub struct DocumentResult {
    /// `file#n`, 1-based.
    pub source: String,
    pub text: String,
    pub outcome: Result<Profile, EngineError>,
}

struct Input {
    source: String,
    parsed: ParsedDoc,
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let config = load_settings(&cmd.common)?;
    let format = cmd.format.unwrap_or(config.format);
    let engine = Engine::new(build_registry(&config)?);

    let inputs = read_inputs(&cmd.files)?;
    debug!(documents = inputs.len(), "read inputs");

    let results = extract_all(&engine, inputs);
    report::print_results(&results, format);

    if results.iter().any(|r| r.outcome.is_err()) {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// Run every document through `engine` in parallel; results keep input order.
fn extract_all(engine: &Engine, inputs: Vec<Input>) -> Vec<DocumentResult> {
    inputs
        .into_par_iter()
        .map(|input| {
            let _span = info_span!("document", source = %input.source).entered();
            let doc = Doc::from(input.parsed);
            let outcome = engine.extract(&doc);
            DocumentResult {
                source: input.source,
                text: doc.text,
                outcome,
            }
        })
        .collect()
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>> {
    if files.is_empty() {
        return read_source("<stdin>", read_stdin()?);
    }
    let mut inputs = Vec::new();
    for path in files {
        if path == Path::new("-") {
            inputs.extend(read_source("<stdin>", read_stdin()?)?);
        } else {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?;
            let label = path.display().to_string();
            inputs.extend(read_source(&label, content)?);
        }
    }
    Ok(inputs)
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;
    Ok(content)
}

fn read_source(label: &str, content: String) -> Result<Vec<Input>> {
    let docs = read_parsed_docs(&content).with_context(|| format!("Invalid input in {}", label))?;
    Ok(docs
        .into_iter()
        .enumerate()
        .map(|(i, parsed)| Input {
            source: format!("{}#{}", label, i + 1),
            parsed,
        })
        .collect())
}
