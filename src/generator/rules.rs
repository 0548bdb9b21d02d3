//! Heuristic derivation rules
//!
//! Keyword rules over free text that decide what the generator adds on top of
//! the base template: access-control capabilities, commented `require` guards
//! for common precondition phrasings, and implementation hints for well-known
//! operations. All matching is substring-based on lowercased text, so intent
//! phrased without the keyword is missed.

use crate::parser::{ContractSpec, FunctionSpec};

/// Substring predicate over lowercased text
///
/// Matches when every `all` keyword is present and, if `any` is non-empty, at
/// least one `any` keyword is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    pub all: &'static [&'static str],
    pub any: &'static [&'static str],
}

impl Matcher {
    pub const fn all(keywords: &'static [&'static str]) -> Self {
        Matcher { all: keywords, any: &[] }
    }

    pub const fn all_and_any(all: &'static [&'static str], any: &'static [&'static str]) -> Self {
        Matcher { all, any }
    }

    /// `text` must already be lowercased
    pub fn matches(&self, text: &str) -> bool {
        self.all.iter().all(|k| text.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| text.contains(k)))
    }
}

/// An inherited capability such as `Ownable`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub import: &'static str,
    pub base: &'static str,
    pub modifier: &'static str,
}

/// One heuristic rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Matched against each function's security note and preconditions
    Capability {
        matcher: Matcher,
        capability: Capability,
    },
    /// Matched against a single precondition; emits a commented guard
    Guard {
        matcher: Matcher,
        statement: &'static str,
    },
    /// Commented hints for a function name (compared case-insensitively)
    Hint {
        function: &'static str,
        statements: &'static [&'static str],
    },
}

/// Ordered rule collection; earlier rules win where only one result is used
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set
    pub fn new() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// The rules the generator ships with
    pub fn standard() -> Self {
        RuleSet::new()
            .with(Rule::Capability {
                matcher: Matcher::all(&["owner"]),
                capability: Capability {
                    import: r#"import "@openzeppelin/contracts/access/Ownable.sol";"#,
                    base: "Ownable",
                    modifier: "onlyOwner",
                },
            })
            .with(Rule::Guard {
                matcher: Matcher::all(&["caller must be", "owner"]),
                statement: r#"// require(msg.sender == owner(), "Not owner");"#,
            })
            .with(Rule::Guard {
                matcher: Matcher::all(&["balance", ">="]),
                statement: r#"// require(balances[msg.sender] >= amount, "Insufficient balance");"#,
            })
            .with(Rule::Guard {
                matcher: Matcher::all_and_any(&["address"], &["!= 0x0", "!= zero", "!= address(0)"]),
                statement: r#"// require(to != address(0), "Invalid address");"#,
            })
            .with(Rule::Hint {
                function: "mint",
                statements: &["// _mint(to, amount);"],
            })
            .with(Rule::Hint {
                function: "transfer",
                statements: &["// _transfer(msg.sender, to, amount);"],
            })
            .with(Rule::Hint {
                function: "approve",
                statements: &["// _approve(msg.sender, spender, amount);"],
            })
            .with(Rule::Hint {
                function: "transferFrom",
                statements: &[
                    "// _spendAllowance(from, msg.sender, amount);",
                    "// _transfer(from, to, amount);",
                ],
            })
    }

    /// Append a rule
    pub fn with(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Capabilities matched by any function of the spec, in rule order
    pub fn capabilities_for_spec(&self, spec: &ContractSpec) -> Vec<&Capability> {
        let texts: Vec<String> = spec.functions.iter().map(access_text).collect();
        self.capabilities_where(|matcher| texts.iter().any(|t| matcher.matches(t)))
    }

    /// Capabilities matched by a single function
    pub fn capabilities_for_function(&self, function: &FunctionSpec) -> Vec<&Capability> {
        let text = access_text(function);
        self.capabilities_where(|matcher| matcher.matches(&text))
    }

    /// First guard whose matcher accepts the precondition
    pub fn guard_for(&self, precondition: &str) -> Option<&'static str> {
        let text = precondition.to_lowercase();
        self.rules.iter().find_map(|rule| match rule {
            Rule::Guard { matcher, statement } if matcher.matches(&text) => Some(*statement),
            _ => None,
        })
    }

    /// Hint statements for a function name; empty when none apply
    pub fn hints_for(&self, function_name: &str) -> &[&'static str] {
        self.rules
            .iter()
            .find_map(|rule| match rule {
                Rule::Hint { function, statements } if function.eq_ignore_ascii_case(function_name) => {
                    Some(*statements)
                }
                _ => None,
            })
            .unwrap_or(&[])
    }

    fn capabilities_where(&self, mut pred: impl FnMut(&Matcher) -> bool) -> Vec<&Capability> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                Rule::Capability { matcher, capability } if pred(matcher) => Some(capability),
                _ => None,
            })
            .collect()
    }
}

/// Lowercased security note plus every precondition, one per line
fn access_text(function: &FunctionSpec) -> String {
    let mut text = function.security.to_lowercase();
    for pre in &function.preconditions {
        text.push('\n');
        text.push_str(&pre.to_lowercase());
    }
    text
}
