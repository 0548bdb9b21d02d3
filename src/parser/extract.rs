//! Field extraction
//!
//! Best-effort extractors for each `ContractSpec` field. Nothing here fails:
//! an absent or malformed section yields an empty value.
//!
//! Each public function takes the whole markdown text. The `*_in` variants
//! take an already segmented [`Document`] and are what the assembler uses.

use regex::Regex;
use std::sync::LazyLock;

use super::document::Document;
use super::types::{EventSpec, FunctionParameter, FunctionSpec, StateVariable};

/// Fallback when the document has no usable contract name
pub const DEFAULT_CONTRACT_NAME: &str = "UnnamedContract";

const CONTRACT_NAME_HEADING: &str = "Contract Name";
const SECURITY_HEADING: &str = "Security Requirements";
const STATE_VARIABLES_HEADING: &str = "State Variables";
const EVENTS_HEADING: &str = "Events";
const INVARIANTS_HEADING: &str = "State Invariants";

/// `Function: name(params)` as a heading text
static FUNCTION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Function:\s*([^(]+)\(([^)]*)\)").unwrap());

/// `- **Label**: value`, `- **Label:** value` or `- Label: value`
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*-[ \t]*(?:\*\*)?([A-Za-z][A-Za-z ]*?)(?:\*\*)?[ \t]*:(?:\*\*)?[ \t]*(.+?)[ \t]*$")
        .unwrap()
});

/// `` - `uint256 totalSupply` - description ``
static STATE_VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*`([^`]+)`\s*-\s*(.+)$").unwrap());

/// `` - `Transfer(address from, address to)` - description ``
static EVENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*`([^(`]+)\(([^)]*)\)`\s*-\s*(.+)$").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Extract and sanitize the contract name
pub fn extract_contract_name(text: &str) -> String {
    contract_name_in(&Document::parse(text))
}

pub(crate) fn contract_name_in(doc: &Document) -> String {
    let raw = doc
        .section_body(CONTRACT_NAME_HEADING)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    sanitize_contract_name(raw)
}

/// Parser-side name sanitizer: whitespace runs become underscores
///
/// Always returns a non-empty `[A-Za-z0-9_]+` string.
pub fn sanitize_contract_name(raw: &str) -> String {
    let joined = WHITESPACE_RE.replace_all(raw.trim(), "_");
    let name: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if name.is_empty() {
        DEFAULT_CONTRACT_NAME.to_string()
    } else {
        name
    }
}

/// Body of a level-2 section, trimmed; empty if the heading is absent
pub fn extract_section(text: &str, heading: &str) -> String {
    Document::parse(text).section_body(heading).to_string()
}

/// Hyphen bullets of a section with the marker stripped
pub fn extract_bullet_list(text: &str, heading: &str) -> Vec<String> {
    bullets(Document::parse(text).section_body(heading))
}

pub(crate) fn security_requirements_in(doc: &Document) -> Vec<String> {
    bullets(doc.section_body(SECURITY_HEADING))
}

pub(crate) fn state_invariants_in(doc: &Document) -> Vec<String> {
    bullets(doc.section_body(INVARIANTS_HEADING))
        .into_iter()
        .map(|item| item.replace('`', "").trim().to_string())
        .collect()
}

/// Every `## Function: name(params)` section, in document order
pub fn extract_functions(text: &str) -> Vec<FunctionSpec> {
    functions_in(&Document::parse(text))
}

pub(crate) fn functions_in(doc: &Document) -> Vec<FunctionSpec> {
    doc.sections
        .iter()
        .filter_map(|section| {
            let caps = FUNCTION_HEADING_RE.captures(&section.heading)?;
            let name = caps[1].trim().trim_matches('`').trim().to_string();
            let params = caps[2].replace('`', "");
            Some(parse_function(name, &params, &section.body))
        })
        .collect()
}

fn parse_function(name: String, params: &str, body: &str) -> FunctionSpec {
    let fields = FieldSet::parse(body);

    FunctionSpec {
        name,
        description: fields.single("Description"),
        parameters: parse_parameters(params),
        preconditions: fields.list("Precondition"),
        postconditions: fields.list("Postcondition"),
        security: fields.single("Security"),
        events: fields.list("Events"),
        returns: fields.single("Returns"),
    }
}

/// Split `type name, type name` into parameters
///
/// The last token of each entry is the name and the rest is the type, so
/// `uint256[] memory ids` keeps its data location. An entry with a single
/// token gets an empty name; an empty entry gets both fields empty.
pub fn parse_parameters(params: &str) -> Vec<FunctionParameter> {
    if params.trim().is_empty() {
        return Vec::new();
    }

    params
        .split(',')
        .map(|entry| {
            let parts: Vec<&str> = entry.split_whitespace().collect();
            match parts.as_slice() {
                [] => FunctionParameter::default(),
                [ty] => FunctionParameter::new(*ty, ""),
                [ty @ .., name] => FunctionParameter::new(ty.join(" "), *name),
            }
        })
        .collect()
}

/// Entries of the "State Variables" section
pub fn extract_state_variables(text: &str) -> Vec<StateVariable> {
    state_variables_in(&Document::parse(text))
}

pub(crate) fn state_variables_in(doc: &Document) -> Vec<StateVariable> {
    doc.section_body(STATE_VARIABLES_HEADING)
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let caps = STATE_VARIABLE_RE.captures(line)?;
            let parts: Vec<&str> = caps[1].split_whitespace().collect();
            // A declaration needs at least a type and a name
            let (name, ty) = parts.split_last().filter(|(_, ty)| !ty.is_empty())?;
            Some(StateVariable {
                name: name.to_string(),
                ty: ty.join(" "),
                description: caps[2].trim().to_string(),
            })
        })
        .collect()
}

/// Entries of the "Events" section
pub fn extract_events(text: &str) -> Vec<EventSpec> {
    events_in(&Document::parse(text))
}

pub(crate) fn events_in(doc: &Document) -> Vec<EventSpec> {
    doc.section_body(EVENTS_HEADING)
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let caps = EVENT_RE.captures(line)?;
            Some(EventSpec {
                name: caps[1].trim().to_string(),
                parameters: caps[2].trim().to_string(),
                description: caps[3].trim().to_string(),
            })
        })
        .collect()
}

fn bullets(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix('-'))
        .map(|item| item.trim().to_string())
        .collect()
}

/// Labeled list items of one function body, first occurrence wins
struct FieldSet<'a> {
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> FieldSet<'a> {
    fn parse(body: &'a str) -> Self {
        let fields = FIELD_RE
            .captures_iter(body)
            .filter_map(|caps| {
                let label = caps.get(1)?.as_str().trim();
                let value = caps.get(2)?.as_str().trim();
                Some((label, value))
            })
            .collect();
        FieldSet { fields }
    }

    fn single(&self, label: &str) -> String {
        self.fields
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, v)| v.to_string())
            .unwrap_or_default()
    }

    /// Comma-separated values; a value without commas is a single item
    fn list(&self, label: &str) -> Vec<String> {
        let value = self.single(label);
        if value.is_empty() {
            return Vec::new();
        }
        if !value.contains(',') {
            return vec![value];
        }
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_name_underscore_join() {
        assert_eq!(extract_contract_name("## Contract Name\nMy Token\n"), "My_Token");
    }

    #[test]
    fn test_contract_name_skips_blank_lines_and_strips_symbols() {
        let text = "## contract name\n\n\n  Super-Vault   v2!  \n## Next\n";
        assert_eq!(extract_contract_name(text), "SuperVault_v2");
    }

    #[test]
    fn test_contract_name_defaults() {
        assert_eq!(extract_contract_name(""), DEFAULT_CONTRACT_NAME);
        assert_eq!(extract_contract_name("## Contract Name\n\n## Events\n"), DEFAULT_CONTRACT_NAME);
        assert_eq!(extract_contract_name("## Contract Name\n!!!\n"), DEFAULT_CONTRACT_NAME);
    }

    #[test]
    fn test_sanitize_contract_name_is_total() {
        for raw in ["", "   ", "ü", "a b", "\t9 lives\n", "__", "$$$ x"] {
            let name = sanitize_contract_name(raw);
            assert!(!name.is_empty(), "{raw:?}");
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'), "{raw:?}");
        }
    }

    #[test]
    fn test_extract_section_stops_at_next_heading() {
        let text = "## Overview\nfirst\nsecond\n\n## Events\n- x\n";
        assert_eq!(extract_section(text, "overview"), "first\nsecond");
        assert_eq!(extract_section(text, "Missing"), "");
    }

    #[test]
    fn test_bullet_list_keeps_order_and_ignores_prose() {
        let text = "## Security Requirements\nIntro line\n- Only owner can mint\n  - Reentrancy guarded\nnot a bullet\n-No space\n";
        assert_eq!(
            extract_bullet_list(text, "Security Requirements"),
            vec!["Only owner can mint", "Reentrancy guarded", "No space"]
        );
    }

    #[test]
    fn test_invariants_strip_backticks() {
        let doc = Document::parse("## State Invariants\n- `totalSupply` == sum of `balances`\n");
        assert_eq!(state_invariants_in(&doc), vec!["totalSupply == sum of balances"]);
    }

    #[test]
    fn test_function_scenario() {
        let text = "## Function: mint(address to, uint256 amount)\n- **Precondition**: Caller must be owner\n- **Postcondition**: balance increases\n";
        let functions = extract_functions(text);
        assert_eq!(functions.len(), 1);
        let mint = &functions[0];
        assert_eq!(mint.name, "mint");
        assert_eq!(
            mint.parameters,
            vec![
                FunctionParameter::new("address", "to"),
                FunctionParameter::new("uint256", "amount"),
            ]
        );
        assert_eq!(mint.preconditions, vec!["Caller must be owner"]);
        assert_eq!(mint.postconditions, vec!["balance increases"]);
        assert!(mint.security.is_empty());
        assert!(mint.returns.is_empty());
    }

    #[test]
    fn test_function_fields_and_list_splitting() {
        let text = "\
## Function: transfer(address to, uint256 amount)
- **Description**: Move tokens
- **Precondition**: balance >= amount, to != 0x0
- **Security:** Caller must hold tokens
- Returns: bool
- **Events**: Transfer
## Function: `burn`(`uint256 amount`)
- **Events**: Transfer, Burned
";
        let functions = extract_functions(text);
        assert_eq!(functions.len(), 2);

        let transfer = &functions[0];
        assert_eq!(transfer.description, "Move tokens");
        assert_eq!(transfer.preconditions, vec!["balance >= amount", "to != 0x0"]);
        assert_eq!(transfer.security, "Caller must hold tokens");
        assert_eq!(transfer.returns, "bool");
        assert_eq!(transfer.events, vec!["Transfer"]);

        let burn = &functions[1];
        assert_eq!(burn.name, "burn");
        assert_eq!(burn.parameters, vec![FunctionParameter::new("uint256", "amount")]);
        assert_eq!(burn.events, vec!["Transfer", "Burned"]);
    }

    #[test]
    fn test_function_fields_do_not_leak_between_sections() {
        let text = "## Function: a()\n- **Security**: owner only\n## Function: b()\n- **Description**: plain\n";
        let functions = extract_functions(text);
        assert_eq!(functions[0].security, "owner only");
        assert!(functions[1].security.is_empty());
        assert!(functions[0].parameters.is_empty());
    }

    #[test]
    fn test_duplicate_functions_pass_through() {
        let text = "## Function: f(uint256 a)\n- **Description**: one\n## Function: f(uint256 b)\n- **Description**: two\n";
        let functions = extract_functions(text);
        assert_eq!(functions.len(), 2);
        assert_eq!(functions[0].description, "one");
        assert_eq!(functions[1].description, "two");
    }

    #[test]
    fn test_malformed_parameters_degrade() {
        assert_eq!(
            parse_parameters("address, , uint256[] memory ids"),
            vec![
                FunctionParameter::new("address", ""),
                FunctionParameter::default(),
                FunctionParameter::new("uint256[] memory", "ids"),
            ]
        );
        assert!(parse_parameters("   ").is_empty());
    }

    #[test]
    fn test_state_variables_multi_word_types() {
        let text = "\
## State Variables
- `mapping(address => mapping(address => uint256)) allowances` - Allowed spend
- `uint256 public cap` - Supply cap
- `orphan` - no type, skipped
- plain bullet without code
";
        let vars = extract_state_variables(text);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].name, "allowances");
        assert_eq!(vars[0].ty, "mapping(address => mapping(address => uint256))");
        assert_eq!(vars[0].description, "Allowed spend");
        assert_eq!(vars[1].name, "cap");
        assert_eq!(vars[1].ty, "uint256 public");
    }

    #[test]
    fn test_events() {
        let text = "## Events\n- `Transfer(address indexed from, address indexed to, uint256 value)` - Tokens moved\n- `Paused()` - Halted\n- `Broken` - no parens\n";
        let events = extract_events(text);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Transfer");
        assert_eq!(events[0].parameters, "address indexed from, address indexed to, uint256 value");
        assert_eq!(events[0].description, "Tokens moved");
        assert_eq!(events[1].name, "Paused");
        assert_eq!(events[1].parameters, "");
    }
}
