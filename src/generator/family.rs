//! Template families
//!
//! A family describes what a base template already provides, so the generator
//! neither redeclares inherited members nor misses the base-contract wiring.

/// Name of the bundled ERC20 template
pub const ERC20_TEMPLATE: &str = "ERC20_Template";
/// Name of the bundled DAO vault template
pub const VAULT_TEMPLATE: &str = "DAOVault_Template";

/// Tokens every family recognizes
const COMMON_TOKENS: &[&str] = &[
    "CONTRACT_NAME",
    "IMPORTS",
    "INHERITANCE",
    "STATE_VARIABLES",
    "EVENTS",
    "CONSTRUCTOR_ARGS",
    "CONSTRUCTOR_INHERITANCE",
    "CONSTRUCTOR_LOGIC",
    "FUNCTIONS",
    "OVERRIDES",
];

/// Tokens only the vault family recognizes
const VAULT_TOKENS: &[&str] = &["ROLES_DEFINITION", "DEPOSIT_HOOKS", "TIMELOCK_CHECK"];

/// Base-class invocation emitted into the constructor header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseConstructor {
    /// Base contract name, e.g. `ERC20`
    pub contract: &'static str,
    /// Literal arguments used when the spec gives no name/symbol parameters
    pub default_args: [&'static str; 2],
}

/// Known template families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFamily {
    Erc20,
    Vault,
}

impl TemplateFamily {
    /// Pick the family from a template name (`*vault*` → Vault)
    pub fn from_template_name(name: &str) -> Self {
        if name.to_lowercase().contains("vault") {
            TemplateFamily::Vault
        } else {
            TemplateFamily::Erc20
        }
    }

    /// Short label used in generated comments
    pub fn label(self) -> &'static str {
        match self {
            TemplateFamily::Erc20 => "ERC20",
            TemplateFamily::Vault => "vault",
        }
    }

    /// Placeholder tokens this family fills in
    pub fn tokens(self) -> Vec<&'static str> {
        match self {
            TemplateFamily::Erc20 => COMMON_TOKENS.to_vec(),
            TemplateFamily::Vault => COMMON_TOKENS.iter().chain(VAULT_TOKENS).copied().collect(),
        }
    }

    /// Import lines that are always emitted
    pub fn base_imports(self) -> &'static [&'static str] {
        match self {
            TemplateFamily::Erc20 => &[r#"import "@openzeppelin/contracts/token/ERC20/ERC20.sol";"#],
            TemplateFamily::Vault => &[
                r#"import "@openzeppelin/contracts/access/AccessControl.sol";"#,
                r#"import "@openzeppelin/contracts/security/Pausable.sol";"#,
                r#"import "@openzeppelin/contracts/security/ReentrancyGuard.sol";"#,
            ],
        }
    }

    /// Base contracts that are always inherited
    pub fn base_inheritance(self) -> &'static [&'static str] {
        match self {
            TemplateFamily::Erc20 => &["ERC20"],
            TemplateFamily::Vault => &["AccessControl", "Pausable", "ReentrancyGuard"],
        }
    }

    pub fn base_constructor(self) -> Option<BaseConstructor> {
        match self {
            TemplateFamily::Erc20 => Some(BaseConstructor {
                contract: "ERC20",
                default_args: [r#""DefaultToken""#, r#""DFT""#],
            }),
            TemplateFamily::Vault => None,
        }
    }

    /// State variables declared by the base template (exact names)
    pub fn provided_state_variables(self) -> &'static [&'static str] {
        match self {
            TemplateFamily::Erc20 => &["balances", "allowances", "totalSupply", "name", "symbol"],
            TemplateFamily::Vault => &["asset", "balances", "totalDeposits", "withdrawalDelay", "lastDeposit"],
        }
    }

    /// Events declared by the base template (exact names)
    pub fn provided_events(self) -> &'static [&'static str] {
        match self {
            TemplateFamily::Erc20 => &["Transfer", "Approval"],
            TemplateFamily::Vault => &["Deposited", "Withdrawn", "Paused", "Unpaused"],
        }
    }

    /// Functions implemented by the base template (lowercase)
    pub fn provided_functions(self) -> &'static [&'static str] {
        match self {
            TemplateFamily::Erc20 => &[
                "constructor",
                "transfer",
                "approve",
                "transferfrom",
                "balanceof",
                "allowance",
            ],
            TemplateFamily::Vault => &["constructor", "deposit", "withdraw", "pause", "unpause"],
        }
    }

    /// Literal content for the family-specific tokens
    pub fn extra_tokens(self) -> Vec<(&'static str, String)> {
        match self {
            TemplateFamily::Erc20 => Vec::new(),
            TemplateFamily::Vault => vec![
                (
                    "ROLES_DEFINITION",
                    r#"bytes32 public constant STRATEGIST_ROLE = keccak256("STRATEGIST_ROLE");"#.to_string(),
                ),
                ("DEPOSIT_HOOKS", "// Custom deposit hooks".to_string()),
                ("TIMELOCK_CHECK", "// Custom timelock check".to_string()),
            ],
        }
    }

    pub fn provides_function(self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.provided_functions().contains(&lower.as_str())
    }
}
