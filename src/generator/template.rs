//! Template stores and placeholder substitution
//!
//! Templates are opaque Solidity text containing `{{TOKEN}}` placeholders.
//! Substitution is a single pass over the template against a token map, so
//! the order in which tokens were derived never matters.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Error, Result};
use super::family::{ERC20_TEMPLATE, VAULT_TEMPLATE};

/// File extension of stored templates
pub const TEMPLATE_EXTENSION: &str = "sol";

/// A token with an optional `//` marker before it on the same line
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(//[ \t]*)?\{\{([A-Za-z0-9_]+)\}\}").unwrap());

/// Source of template text keyed by template name
pub trait TemplateStore {
    /// Template text, or `Error::TemplateNotFound`
    fn load(&self, name: &str) -> Result<String>;

    /// Available template names, sorted
    fn names(&self) -> Result<Vec<String>>;
}

/// Templates stored as `<dir>/<name>.sol`
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    dir: PathBuf,
}

impl DirTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirTemplateStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
    }
}

impl TemplateStore for DirTemplateStore {
    fn load(&self, name: &str) -> Result<String> {
        // A template name is a bare file stem, never a path
        if !is_template_name(name) {
            return Err(Error::TemplateNotFound { name: name.to_string() });
        }

        let path = self.path_for(name);
        if !path.is_file() {
            return Err(Error::TemplateNotFound { name: name.to_string() });
        }
        std::fs::read_to_string(&path).map_err(|e| Error::io(path, e))
    }

    fn names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| Error::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| Error::io(&self.dir, e))?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Templates held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<String, String>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        MemoryTemplateStore::default()
    }

    /// The ERC20 and DAO vault templates bundled with the crate
    pub fn builtin() -> Self {
        MemoryTemplateStore::new()
            .with(ERC20_TEMPLATE, include_str!("../../templates/ERC20_Template.sol"))
            .with(VAULT_TEMPLATE, include_str!("../../templates/DAOVault_Template.sol"))
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn load(&self, name: &str) -> Result<String> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TemplateNotFound { name: name.to_string() })
    }

    fn names(&self) -> Result<Vec<String>> {
        Ok(self.templates.keys().cloned().collect())
    }
}

fn is_template_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.contains("..")
}

/// Token name → replacement text
pub type TokenMap = BTreeMap<&'static str, String>;

/// Replace every known `{{TOKEN}}` in one pass
///
/// A `//` marker directly before a known token is replaced along with it, so
/// an empty replacement leaves no dangling comment. Unknown tokens (and their
/// markers) are left exactly as written.
pub fn substitute(template: &str, tokens: &TokenMap) -> String {
    TOKEN_RE
        .replace_all(template, |caps: &Captures| match tokens.get(&caps[2]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of all `{{TOKEN}}` placeholders in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    TOKEN_RE
        .captures_iter(template)
        .map(|caps| caps[2].to_string())
        .collect()
}
