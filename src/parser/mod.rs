//! Markdown specification parser
//!
//! This module contains:
//! - `document`: splits markdown into level-2 sections
//! - `extract`: per-field extractors over those sections
//! - `types`: the `ContractSpec` record they produce
//!
//! Parsing is total. Malformed or missing sections give empty fields, never an
//! error; only reading a file from disk can fail.

pub mod document;
pub mod extract;
pub mod types;

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

pub use document::{Document, Section};
pub use extract::{
    extract_bullet_list, extract_contract_name, extract_events, extract_functions,
    extract_section, extract_state_variables, parse_parameters, sanitize_contract_name,
    DEFAULT_CONTRACT_NAME,
};
pub use types::{ContractSpec, EventSpec, FunctionParameter, FunctionSpec, StateVariable};

/// Parse a markdown specification into a `ContractSpec`
pub fn parse(text: &str) -> ContractSpec {
    let doc = Document::parse(text);

    let spec = ContractSpec {
        contract_name: extract::contract_name_in(&doc),
        security_requirements: extract::security_requirements_in(&doc),
        functions: extract::functions_in(&doc),
        state_variables: extract::state_variables_in(&doc),
        events: extract::events_in(&doc),
        state_invariants: extract::state_invariants_in(&doc),
    };

    debug!(
        contract = %spec.contract_name,
        sections = doc.sections.len(),
        functions = spec.functions.len(),
        state_variables = spec.state_variables.len(),
        events = spec.events.len(),
        "parsed contract spec"
    );

    spec
}

/// Read a markdown file and parse it
pub fn parse_file(path: &Path) -> Result<ContractSpec> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse(&content))
}

/// Parse every `*.md` file directly inside `dir`, sorted by file name
pub fn parse_directory(dir: &Path) -> Result<Vec<(PathBuf, ContractSpec)>> {
    let mut specs = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::io(path, e.into())
        })?;
        let path = entry.path();

        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            specs.push((path.to_path_buf(), parse_file(path)?));
        }
    }

    debug!(dir = %dir.display(), count = specs.len(), "parsed spec directory");
    Ok(specs)
}
