//! Solidity fragment generation
//!
//! Derives the text for every placeholder token from a `ContractSpec`. Nothing
//! here executes or validates Solidity; the output is a scaffold that still
//! needs a human to fill in the logic.

use crate::parser::{ContractSpec, EventSpec, FunctionSpec, StateVariable};

use super::family::TemplateFamily;
use super::identifier::sanitize_identifier;
use super::rules::{Capability, RuleSet};
use super::template::TokenMap;

/// Separator between declarations at contract-body indentation
const MEMBER_SEPARATOR: &str = "\n    ";
/// Indentation of statements inside a function body
const BODY_INDENT: &str = "        ";

/// Marker left in every generated function body
pub const UNIMPLEMENTED_MARKER: &str = "// TODO: Implement function logic";

/// Build the token map for a spec rendered against `family`
pub fn build_tokens(spec: &ContractSpec, family: TemplateFamily, rules: &RuleSet) -> TokenMap {
    let capabilities = rules.capabilities_for_spec(spec);

    let mut tokens = TokenMap::new();
    tokens.insert("CONTRACT_NAME", sanitize_identifier(&spec.contract_name));
    tokens.insert("IMPORTS", imports(family, &capabilities));
    tokens.insert("INHERITANCE", inheritance(family, &capabilities));
    tokens.insert("STATE_VARIABLES", state_variables(family, &spec.state_variables));
    tokens.insert("EVENTS", events(family, &spec.events));
    tokens.insert("CONSTRUCTOR_ARGS", constructor_args(spec));
    tokens.insert("CONSTRUCTOR_INHERITANCE", constructor_inheritance(family, spec));
    tokens.insert("CONSTRUCTOR_LOGIC", constructor_logic(spec));
    tokens.insert("FUNCTIONS", functions(family, rules, &spec.functions));
    tokens.insert("OVERRIDES", String::new());

    for (token, value) in family.extra_tokens() {
        tokens.insert(token, value);
    }

    tokens
}

/// Base imports plus one per matched capability
pub fn imports(family: TemplateFamily, capabilities: &[&Capability]) -> String {
    family
        .base_imports()
        .iter()
        .copied()
        .chain(capabilities.iter().map(|c| c.import))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-separated base contracts
pub fn inheritance(family: TemplateFamily, capabilities: &[&Capability]) -> String {
    family
        .base_inheritance()
        .iter()
        .copied()
        .chain(capabilities.iter().map(|c| c.base))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Declarations for state variables the base template does not provide
pub fn state_variables(family: TemplateFamily, variables: &[StateVariable]) -> String {
    if variables.is_empty() {
        return "// No custom state variables".to_string();
    }

    let provided = family.provided_state_variables();
    let custom: Vec<&StateVariable> = variables
        .iter()
        .filter(|v| !provided.contains(&v.name.as_str()))
        .collect();

    if custom.is_empty() {
        return format!(
            "// No custom state variables (standard {} variables inherited)",
            family.label()
        );
    }

    custom
        .iter()
        .map(|v| {
            // Mappings cannot carry a visibility keyword inside the type text
            let ty = if v.ty.contains("mapping") || v.ty.contains("=>") {
                v.ty.replace("public", "").trim().to_string()
            } else {
                v.ty.clone()
            };
            format!("{} public {}; // {}", ty, v.name, v.description)
        })
        .collect::<Vec<_>>()
        .join(MEMBER_SEPARATOR)
}

/// Declarations for events the base template does not provide
pub fn events(family: TemplateFamily, events: &[EventSpec]) -> String {
    if events.is_empty() {
        return "// No custom events".to_string();
    }

    let provided = family.provided_events();
    let custom: Vec<&EventSpec> = events
        .iter()
        .filter(|e| !provided.contains(&e.name.as_str()))
        .collect();

    if custom.is_empty() {
        return format!("// No custom events (standard {} events inherited)", family.label());
    }

    custom
        .iter()
        .map(|e| format!("event {}({}); // {}", e.name, e.parameters, e.description))
        .collect::<Vec<_>>()
        .join(MEMBER_SEPARATOR)
}

pub fn constructor_args(spec: &ContractSpec) -> String {
    spec.constructor()
        .map(FunctionSpec::parameter_list)
        .unwrap_or_default()
}

/// `ERC20(name, symbol)` when the constructor takes both, else default literals
pub fn constructor_inheritance(family: TemplateFamily, spec: &ContractSpec) -> String {
    let Some(base) = family.base_constructor() else {
        return String::new();
    };

    let param_containing = |needle: &str| {
        spec.constructor().and_then(|ctor| {
            ctor.parameters
                .iter()
                .find(|p| p.name.to_lowercase().contains(needle))
        })
    };

    match (param_containing("name"), param_containing("symbol")) {
        (Some(name), Some(symbol)) => format!("{}({}, {})", base.contract, name.name, symbol.name),
        _ => format!("{}({}, {})", base.contract, base.default_args[0], base.default_args[1]),
    }
}

/// Constructor postconditions as comments; never executable statements
pub fn constructor_logic(spec: &ContractSpec) -> String {
    match spec.constructor() {
        None => "// No constructor logic".to_string(),
        Some(ctor) => ctor
            .postconditions
            .iter()
            .map(|post| format!("// {}", post))
            .collect::<Vec<_>>()
            .join("\n        "),
    }
}

/// Every function not already implemented by the base template
pub fn functions(family: TemplateFamily, rules: &RuleSet, functions: &[FunctionSpec]) -> String {
    if functions.is_empty() {
        return "// No custom functions".to_string();
    }

    let custom: Vec<&FunctionSpec> = functions
        .iter()
        .filter(|f| !f.is_constructor() && !family.provides_function(&f.name))
        .collect();

    if custom.is_empty() {
        return "// Custom functions already implemented in template".to_string();
    }

    custom
        .iter()
        .map(|f| function(rules, f))
        .collect::<Vec<_>>()
        .join("\n\n    ")
}

/// Doc block, declaration and scaffold body for one function
pub fn function(rules: &RuleSet, func: &FunctionSpec) -> String {
    let mut header = format!("function {}({}) public", func.name, func.parameter_list());
    for capability in rules.capabilities_for_function(func) {
        header.push(' ');
        header.push_str(capability.modifier);
    }
    if !func.returns.is_empty() {
        header.push_str(&format!(" returns ({})", func.returns));
    }

    format!(
        "{}\n    {} {{\n{}\n    }}",
        doc_block(func),
        header,
        body(rules, func)
    )
}

/// NatSpec comment for a function
pub fn doc_block(func: &FunctionSpec) -> String {
    let mut lines = vec!["/**".to_string()];

    let description = func.description.trim();
    let description = if description.is_empty() {
        "Function implementation"
    } else {
        description
    };
    lines.push(format!(" * @notice {}", description));

    for p in &func.parameters {
        lines.push(format!(" * @param {} {}", p.name, p.ty));
    }
    if !func.returns.is_empty() {
        lines.push(format!(" * @return {}", func.returns));
    }
    if !func.security.is_empty() {
        lines.push(format!(" * @dev Security: {}", func.security));
    }
    lines.push(" */".to_string());

    lines.join(MEMBER_SEPARATOR)
}

/// Scaffold body: preconditions, marker, hints, events, optional return
pub fn body(rules: &RuleSet, func: &FunctionSpec) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !func.preconditions.is_empty() {
        lines.push("// Preconditions:".to_string());
        for pre in &func.preconditions {
            lines.push(format!("// {}", pre));
            if let Some(guard) = rules.guard_for(pre) {
                lines.push(guard.to_string());
            }
        }
        lines.push(String::new());
    }

    lines.push(UNIMPLEMENTED_MARKER.to_string());
    lines.extend(rules.hints_for(&func.name).iter().map(|s| s.to_string()));

    if !func.events.is_empty() {
        lines.push(String::new());
        lines.extend(func.events.iter().map(|e| format!("// emit {}", e)));
    }

    if func.returns.to_lowercase().contains("bool") {
        lines.push(String::new());
        lines.push("return true;".to_string());
    }

    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", BODY_INDENT, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FunctionParameter;

    fn owner_mint() -> FunctionSpec {
        FunctionSpec {
            name: "mint".to_string(),
            description: "Mint tokens".to_string(),
            parameters: vec![
                FunctionParameter::new("address", "to"),
                FunctionParameter::new("uint256", "amount"),
            ],
            preconditions: vec!["Caller must be owner".to_string()],
            security: "Only owner".to_string(),
            events: vec!["Transfer".to_string()],
            ..Default::default()
        }
    }

    fn spec_with(functions: Vec<FunctionSpec>) -> ContractSpec {
        ContractSpec {
            contract_name: "My_Token".to_string(),
            functions,
            ..Default::default()
        }
    }

    #[test]
    fn test_inheritance_includes_ownable_only_when_needed() {
        let rules = RuleSet::standard();
        let with_owner = spec_with(vec![owner_mint()]);
        let caps = rules.capabilities_for_spec(&with_owner);
        assert_eq!(inheritance(TemplateFamily::Erc20, &caps), "ERC20, Ownable");
        assert!(imports(TemplateFamily::Erc20, &caps).contains("access/Ownable.sol"));

        let plain = spec_with(vec![FunctionSpec {
            name: "burn".to_string(),
            ..Default::default()
        }]);
        let caps = rules.capabilities_for_spec(&plain);
        assert_eq!(inheritance(TemplateFamily::Erc20, &caps), "ERC20");
        assert!(!imports(TemplateFamily::Erc20, &caps).contains("Ownable"));
    }

    #[test]
    fn test_state_variables_filtered_per_family() {
        let vars = vec![
            StateVariable {
                name: "totalSupply".to_string(),
                ty: "uint256".to_string(),
                description: "supply".to_string(),
            },
            StateVariable {
                name: "frozen".to_string(),
                ty: "mapping(address => bool) public".to_string(),
                description: "frozen accounts".to_string(),
            },
        ];
        assert_eq!(
            state_variables(TemplateFamily::Erc20, &vars),
            "mapping(address => bool) public frozen; // frozen accounts"
        );
        assert_eq!(
            state_variables(TemplateFamily::Erc20, &vars[..1]),
            "// No custom state variables (standard ERC20 variables inherited)"
        );
        assert_eq!(state_variables(TemplateFamily::Erc20, &[]), "// No custom state variables");
    }

    #[test]
    fn test_events_filtered() {
        let evs = vec![
            EventSpec {
                name: "Transfer".to_string(),
                parameters: "address from, address to, uint256 value".to_string(),
                description: "moved".to_string(),
            },
            EventSpec {
                name: "Frozen".to_string(),
                parameters: "address account".to_string(),
                description: "frozen".to_string(),
            },
        ];
        assert_eq!(
            events(TemplateFamily::Erc20, &evs),
            "event Frozen(address account); // frozen"
        );
        assert_eq!(
            events(TemplateFamily::Erc20, &evs[..1]),
            "// No custom events (standard ERC20 events inherited)"
        );
    }

    #[test]
    fn test_constructor_with_name_and_symbol() {
        let ctor = FunctionSpec {
            name: "constructor".to_string(),
            parameters: vec![
                FunctionParameter::new("string", "tokenName"),
                FunctionParameter::new("string", "tokenSymbol"),
                FunctionParameter::new("uint256", "initialSupply"),
            ],
            postconditions: vec!["supply minted to deployer".to_string()],
            ..Default::default()
        };
        let spec = spec_with(vec![ctor]);
        assert_eq!(
            constructor_args(&spec),
            "string tokenName, string tokenSymbol, uint256 initialSupply"
        );
        assert_eq!(
            constructor_inheritance(TemplateFamily::Erc20, &spec),
            "ERC20(tokenName, tokenSymbol)"
        );
        assert_eq!(constructor_logic(&spec), "// supply minted to deployer");
    }

    #[test]
    fn test_constructor_defaults() {
        let spec = spec_with(vec![]);
        assert_eq!(constructor_args(&spec), "");
        assert_eq!(
            constructor_inheritance(TemplateFamily::Erc20, &spec),
            r#"ERC20("DefaultToken", "DFT")"#
        );
        assert_eq!(constructor_inheritance(TemplateFamily::Vault, &spec), "");
        assert_eq!(constructor_logic(&spec), "// No constructor logic");
    }

    #[test]
    fn test_function_scaffold() {
        let out = function(&RuleSet::standard(), &owner_mint());
        let expected = "\
/**
     * @notice Mint tokens
     * @param to address
     * @param amount uint256
     * @dev Security: Only owner
     */
    function mint(address to, uint256 amount) public onlyOwner {
        // Preconditions:
        // Caller must be owner
        // require(msg.sender == owner(), \"Not owner\");

        // TODO: Implement function logic
        // _mint(to, amount);

        // emit Transfer
    }";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_bool_return_gets_return_true() {
        let func = FunctionSpec {
            name: "freeze".to_string(),
            returns: "bool success".to_string(),
            ..Default::default()
        };
        let out = function(&RuleSet::standard(), &func);
        assert!(out.contains("function freeze() public returns (bool success) {"));
        assert!(out.contains("     * @notice Function implementation"));
        assert!(out.contains("        return true;"));

        let func = FunctionSpec {
            name: "count".to_string(),
            returns: "uint256".to_string(),
            ..Default::default()
        };
        assert!(!function(&RuleSet::standard(), &func).contains("return true"));
    }

    #[test]
    fn test_functions_filter_constructor_and_base() {
        let fns = vec![
            FunctionSpec {
                name: "constructor".to_string(),
                ..Default::default()
            },
            FunctionSpec {
                name: "transferFrom".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(
            functions(TemplateFamily::Erc20, &RuleSet::standard(), &fns),
            "// Custom functions already implemented in template"
        );
        assert_eq!(
            functions(TemplateFamily::Erc20, &RuleSet::standard(), &[]),
            "// No custom functions"
        );
        // transferFrom is not provided by the vault base, so it is emitted with hints
        let out = functions(TemplateFamily::Vault, &RuleSet::standard(), &fns);
        assert!(out.contains("// _spendAllowance(from, msg.sender, amount);"));
    }

    #[test]
    fn test_build_tokens_covers_family_tokens() {
        for family in [TemplateFamily::Erc20, TemplateFamily::Vault] {
            let tokens = build_tokens(&ContractSpec::default(), family, &RuleSet::standard());
            for token in family.tokens() {
                assert!(tokens.contains_key(token), "{token} missing for {family:?}");
            }
        }
    }
}
