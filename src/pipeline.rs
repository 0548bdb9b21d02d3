//! Generation pipeline
//!
//! markdown → `ContractSpec` → rendered Solidity, as a single call. This is
//! the shape a web handler or tool server wraps: it takes the markdown and an
//! optional template name and returns the code together with the record.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::generator::{Renderer, TemplateStore, ERC20_TEMPLATE, VAULT_TEMPLATE};
use crate::output::write_rendered;
use crate::parser::{self, ContractSpec};

/// Input of a generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}

/// Output of a generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Rendered Solidity source
    pub code: String,
    /// The parsed record
    pub spec: ContractSpec,
    /// Template actually used (requested or auto-selected)
    pub template_used: String,
    /// Hex SHA-256 of `code`
    pub digest: String,
}

/// Template for a spec: the requested one, else chosen from the contract name
pub fn select_template(spec: &ContractSpec, requested: Option<&str>) -> String {
    match requested.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None if spec.contract_name.to_lowercase().contains("vault") => VAULT_TEMPLATE.to_string(),
        None => ERC20_TEMPLATE.to_string(),
    }
}

/// Parse the markdown and render it
pub fn generate(request: &GenerateRequest, store: &dyn TemplateStore) -> Result<GenerateResponse> {
    let spec = parser::parse(&request.markdown);
    let template_used = select_template(&spec, request.template_name.as_deref());
    let code = Renderer::new(store).render(&spec, &template_used)?;
    let digest = digest(&code);

    debug!(contract = %spec.contract_name, template = %template_used, %digest, "generated contract");

    Ok(GenerateResponse {
        code,
        spec,
        template_used,
        digest,
    })
}

/// Render an already parsed spec and write it to `dir`
pub fn generate_to_dir(
    spec: &ContractSpec,
    template_name: &str,
    store: &dyn TemplateStore,
    dir: &Path,
) -> Result<PathBuf> {
    let code = Renderer::new(store).render(spec, template_name)?;
    write_rendered(&code, &spec.contract_name, dir)
}

/// Hex SHA-256 of rendered source
pub fn digest(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}
