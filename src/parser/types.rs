//! Contract specification record
//!
//! The normalized form of a markdown specification. It is the only thing the
//! parser hands to the generator. Field order matches the serialized key order.

use serde::{Deserialize, Serialize};

/// A complete contract specification parsed from markdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSpec {
    /// Sanitized contract name (never empty)
    pub contract_name: String,
    /// Free-text security requirement bullets
    pub security_requirements: Vec<String>,
    /// Function specifications in document order
    pub functions: Vec<FunctionSpec>,
    /// State variable declarations
    pub state_variables: Vec<StateVariable>,
    /// Event declarations
    pub events: Vec<EventSpec>,
    /// Free-text invariant bullets (backticks removed)
    pub state_invariants: Vec<String>,
}

/// A function specification from a `## Function: name(params)` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name (e.g., "mint")
    pub name: String,
    /// Description field
    pub description: String,
    /// Parsed parameter list
    pub parameters: Vec<FunctionParameter>,
    /// Preconditions (comma-split)
    pub preconditions: Vec<String>,
    /// Postconditions (comma-split)
    pub postconditions: Vec<String>,
    /// Security note, may be empty
    pub security: String,
    /// Names of events this function emits, as written
    pub events: Vec<String>,
    /// Return type text; empty means no return value
    pub returns: String,
}

/// One `type name` pair of a function signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

/// A state variable declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateVariable {
    pub name: String,
    /// Declared type, may contain spaces (e.g. `mapping(address => uint256)`)
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

/// An event declaration; parameters are kept as raw text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
    pub parameters: String,
    pub description: String,
}

impl FunctionParameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        FunctionParameter {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

impl FunctionSpec {
    /// `type name, type name` as written in a Solidity signature
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|p| format!("{} {}", p.ty, p.name).trim().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether this is the contract constructor
    pub fn is_constructor(&self) -> bool {
        self.name.eq_ignore_ascii_case("constructor")
    }
}

impl ContractSpec {
    /// The first function named `constructor` (case-insensitive)
    pub fn constructor(&self) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.is_constructor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_key_order() {
        let spec = ContractSpec {
            contract_name: "MyToken".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(
            json,
            r#"{"contractName":"MyToken","securityRequirements":[],"functions":[],"stateVariables":[],"events":[],"stateInvariants":[]}"#
        );
    }

    #[test]
    fn test_parameter_serializes_type_first() {
        let param = FunctionParameter::new("address", "to");
        let json = serde_json::to_string(&param).unwrap();
        assert_eq!(json, r#"{"type":"address","name":"to"}"#);
    }

    #[test]
    fn test_parameter_list_skips_dangling_space() {
        let func = FunctionSpec {
            name: "mint".to_string(),
            parameters: vec![
                FunctionParameter::new("address", "to"),
                FunctionParameter::new("uint256", ""),
            ],
            ..Default::default()
        };
        assert_eq!(func.parameter_list(), "address to, uint256");
    }

    #[test]
    fn test_constructor_lookup_is_case_insensitive() {
        let spec = ContractSpec {
            functions: vec![
                FunctionSpec {
                    name: "mint".to_string(),
                    ..Default::default()
                },
                FunctionSpec {
                    name: "Constructor".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(spec.constructor().map(|f| f.name.as_str()), Some("Constructor"));
    }
}
