//! Solidity generator
//!
//! Renders a `ContractSpec` into a template:
//! 1. Load the template text from a [`TemplateStore`]
//! 2. Derive content for every placeholder token (imports, inheritance,
//!    declarations, constructor wiring, function scaffolds)
//! 3. Substitute all tokens in one pass
//!
//! Only a missing template is an error. The derivations themselves are
//! heuristic and never fail.

pub mod family;
pub mod identifier;
pub mod rules;
pub mod solidity;
pub mod template;

use tracing::debug;

use crate::error::Result;
use crate::parser::ContractSpec;

pub use family::{TemplateFamily, ERC20_TEMPLATE, VAULT_TEMPLATE};
pub use identifier::{sanitize_identifier, DEFAULT_IDENTIFIER};
pub use rules::{Capability, Matcher, Rule, RuleSet};
pub use template::{
    placeholders, substitute, DirTemplateStore, MemoryTemplateStore, TemplateStore, TokenMap,
};

/// Renders specs against templates from a store
pub struct Renderer<'a> {
    store: &'a dyn TemplateStore,
    rules: RuleSet,
}

impl<'a> Renderer<'a> {
    /// Renderer with the standard heuristic rules
    pub fn new(store: &'a dyn TemplateStore) -> Self {
        Renderer {
            store,
            rules: RuleSet::standard(),
        }
    }

    /// Replace the heuristic rules
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Render `spec` into the named template
    pub fn render(&self, spec: &ContractSpec, template_name: &str) -> Result<String> {
        let template = self.store.load(template_name)?;
        let family = TemplateFamily::from_template_name(template_name);
        let tokens = solidity::build_tokens(spec, family, &self.rules);

        debug!(
            template = template_name,
            ?family,
            contract = %tokens.get("CONTRACT_NAME").map(String::as_str).unwrap_or_default(),
            "rendering contract"
        );

        Ok(substitute(&template, &tokens))
    }
}

/// Render with the standard rules
pub fn render(spec: &ContractSpec, template_name: &str, store: &dyn TemplateStore) -> Result<String> {
    Renderer::new(store).render(spec, template_name)
}
