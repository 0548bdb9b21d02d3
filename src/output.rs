//! Output writer
//!
//! The only part of the pipeline that touches the filesystem for writing.
//! Errors are returned unchanged; nothing is retried or cleaned up.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Error, Result};
use crate::generator::{sanitize_identifier, template::TEMPLATE_EXTENSION};
use crate::parser::ContractSpec;

/// Write rendered source to `<target_dir>/<Identifier>.sol`
///
/// `identifier_hint` goes through the generator's identifier sanitizer, so the
/// file name always matches the contract name in the rendered source.
pub fn write_rendered(text: &str, identifier_hint: &str, target_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(target_dir).map_err(|e| Error::io(target_dir, e))?;

    let file_name = format!("{}.{}", sanitize_identifier(identifier_hint), TEMPLATE_EXTENSION);
    let path = target_dir.join(file_name);
    fs::write(&path, text).map_err(|e| Error::io(&path, e))?;

    info!(path = %path.display(), bytes = text.len(), "wrote generated contract");
    Ok(path)
}

/// Write the record as pretty-printed JSON
pub fn write_record(spec: &ContractSpec, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(spec)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))?;

    info!(path = %path.display(), contract = %spec.contract_name, "wrote contract spec record");
    Ok(())
}
