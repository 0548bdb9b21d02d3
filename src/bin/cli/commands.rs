//! Command handlers
//!
//! Each handler returns the process exit code, or an error that `main` prints.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use chainspec::config::ChainspecConfig;
use chainspec::generator::sanitize_identifier;
use chainspec::output::{write_record, write_rendered};
use chainspec::parser;
use chainspec::pipeline::{generate, select_template, GenerateRequest};

use super::output::{
    format_batch, format_generation, format_spec, format_templates, BatchEntry, BatchOutcome,
    GenerationReport,
};
use crate::OutputFormat;

pub fn handle_parse(file: &Path, output: Option<&Path>, format: OutputFormat) -> Result<i32> {
    let spec = parser::parse_file(file)?;

    if let Some(path) = output {
        write_record(&spec, path)?;
    }

    print!("{}", format_spec(&spec, format)?);
    Ok(0)
}

pub fn handle_generate(
    config: &ChainspecConfig,
    file: &Path,
    template: Option<&str>,
    record: Option<&Path>,
    to_stdout: bool,
    format: OutputFormat,
) -> Result<i32> {
    let markdown = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read spec {}", file.display()))?;

    let request = GenerateRequest {
        markdown,
        template_name: template
            .map(str::to_string)
            .or_else(|| config.default_template.clone()),
    };
    let store = config.template_store();
    let response = generate(&request, store.as_ref())?;

    if to_stdout {
        print!("{}", response.code);
        if let Some(path) = record {
            write_record(&response.spec, path)?;
        }
        return Ok(0);
    }

    let contract_path = write_rendered(&response.code, &response.spec.contract_name, &config.output_dir)?;
    if let Some(path) = record {
        write_record(&response.spec, path)?;
    }

    let report = GenerationReport {
        source: file.to_path_buf(),
        contract: sanitize_identifier(&response.spec.contract_name),
        template: response.template_used,
        digest: response.digest,
        contract_path: Some(contract_path),
        record_path: record.map(Path::to_path_buf),
    };
    print!("{}", format_generation(&report, format)?);
    Ok(0)
}

/// Parse and generate every spec in `dir`, continuing past failures
pub fn handle_batch(config: &ChainspecConfig, dir: &Path, format: OutputFormat) -> Result<i32> {
    let files = discover_specs(dir)?;
    if files.is_empty() {
        warn!(dir = %dir.display(), "no markdown specs found");
    }

    let store = config.template_store();
    let mut entries = Vec::with_capacity(files.len());

    for file in files {
        let outcome = match process_one(config, store.as_ref(), &file) {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = format!("{:#}", e);
                warn!(file = %file.display(), %error, "skipping spec");
                BatchOutcome::Failed { error }
            }
        };
        entries.push(BatchEntry { file, outcome });
    }

    print!("{}", format_batch(&entries, format)?);

    let failed = entries
        .iter()
        .any(|e| matches!(e.outcome, BatchOutcome::Failed { .. }));
    Ok(if failed { 1 } else { 0 })
}

pub fn handle_templates(config: &ChainspecConfig) -> Result<i32> {
    let store = config.template_store();
    let names = store.names()?;
    let source = match &config.templates_dir {
        Some(dir) => dir.display().to_string(),
        None => "bundled".to_string(),
    };
    print!("{}", format_templates(&names, &source));
    Ok(0)
}

fn process_one(
    config: &ChainspecConfig,
    store: &dyn chainspec::TemplateStore,
    file: &Path,
) -> Result<BatchOutcome> {
    let spec = parser::parse_file(file)?;
    let template = select_template(&spec, config.default_template.as_deref());
    let code = chainspec::render(&spec, &template, store)
        .with_context(|| format!("Failed to render {}", file.display()))?;

    let identifier = sanitize_identifier(&spec.contract_name);
    let contract_path = write_rendered(&code, &spec.contract_name, &config.output_dir)?;
    let record_path = config.records_dir.join(format!("{}.json", identifier));
    write_record(&spec, &record_path)?;

    info!(file = %file.display(), contract = %identifier, "processed spec");

    Ok(BatchOutcome::Generated {
        contract: identifier,
        template,
        contract_path,
        record_path,
    })
}

/// `*.md` files directly inside `dir`, sorted by name
fn discover_specs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
