//! ChainSpec configuration with layered resolution
//!
//! Resolution order (highest priority first):
//! 1. CLI flags (applied via `apply_cli_overrides`)
//! 2. Environment variables (`CHAINSPEC_*`)
//! 3. Config file (`chainspec.toml` in the working directory, or `--config`)
//! 4. Compiled defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::generator::{DirTemplateStore, MemoryTemplateStore, TemplateStore};

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "chainspec.toml";

/// Default directory for rendered contracts
pub const DEFAULT_OUTPUT_DIR: &str = "contracts/generated";

/// Default directory for JSON records
pub const DEFAULT_RECORDS_DIR: &str = "output";

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainspecConfig {
    /// Template directory; the bundled templates are used when unset
    pub templates_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub records_dir: PathBuf,
    /// Template for `generate` when none is requested; auto-selected when unset
    pub default_template: Option<String>,
}

impl Default for ChainspecConfig {
    fn default() -> Self {
        ChainspecConfig {
            templates_dir: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            records_dir: PathBuf::from(DEFAULT_RECORDS_DIR),
            default_template: None,
        }
    }
}

/// One file layer. Every key is optional and unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    templates_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    records_dir: Option<PathBuf>,
    default_template: Option<String>,
}

/// CLI override arguments that can be applied to a config
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub records_dir: Option<PathBuf>,
}

impl ChainspecConfig {
    /// Load configuration rooted at `root` (normally the working directory)
    pub fn load(root: &Path, cli: &CliOverrides) -> Result<Self> {
        Self::load_with_env(root, cli, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an explicit environment lookup
    pub fn load_with_env(
        root: &Path,
        cli: &CliOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();

        // An explicit --config must exist; the implicit one is optional
        match &cli.config_path {
            Some(path) => config.merge_toml_file(path)?,
            None => {
                let path = root.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    config.merge_toml_file(&path)?;
                }
            }
        }

        config.apply_env_overrides(env);
        config.apply_cli_overrides(cli);
        Ok(config)
    }

    /// Parse a TOML string over the defaults
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge(parse_toml(toml_str, "<string>")?);
        Ok(config)
    }

    /// Template store described by this config
    pub fn template_store(&self) -> Box<dyn TemplateStore> {
        match &self.templates_dir {
            Some(dir) => Box::new(DirTemplateStore::new(dir.clone())),
            None => Box::new(MemoryTemplateStore::builtin()),
        }
    }

    fn merge_toml_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let file = parse_toml(&content, &path.display().to_string())?;
        self.merge(file);
        Ok(())
    }

    fn merge(&mut self, file: ConfigFile) {
        if file.templates_dir.is_some() {
            self.templates_dir = file.templates_dir;
        }
        if let Some(dir) = file.output_dir {
            self.output_dir = dir;
        }
        if let Some(dir) = file.records_dir {
            self.records_dir = dir;
        }
        if file.default_template.is_some() {
            self.default_template = file.default_template;
        }
    }

    /// Pattern: `CHAINSPEC_TEMPLATES_DIR`, `CHAINSPEC_OUTPUT_DIR`, etc.
    /// Empty values are ignored.
    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(val) = var("CHAINSPEC_TEMPLATES_DIR") {
            self.templates_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = var("CHAINSPEC_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(val);
        }
        if let Some(val) = var("CHAINSPEC_RECORDS_DIR") {
            self.records_dir = PathBuf::from(val);
        }
        if let Some(val) = var("CHAINSPEC_DEFAULT_TEMPLATE") {
            self.default_template = Some(val);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(dir) = &cli.templates_dir {
            self.templates_dir = Some(dir.clone());
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(dir) = &cli.records_dir {
            self.records_dir = dir.clone();
        }
    }
}

fn parse_toml(content: &str, path: &str) -> Result<ConfigFile> {
    toml::from_str(content).map_err(|e| Error::Config {
        path: path.to_string(),
        message: e.to_string(),
    })
}
