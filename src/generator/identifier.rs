//! Contract identifier sanitizer
//!
//! Renderer-side counterpart of `parser::sanitize_contract_name`. The parser
//! joins words with underscores for the record; the generator joins them in
//! PascalCase for the Solidity contract name and file name.

/// Fallback when nothing usable is left of the name
pub const DEFAULT_IDENTIFIER: &str = "GeneratedContract";

/// Turn a free-form name into a valid Solidity identifier
///
/// Always returns a string matching `^[A-Za-z_][A-Za-z0-9_]*$`.
pub fn sanitize_identifier(name: &str) -> String {
    // "gandalf the great" -> "gandalfTheGreat"
    let mut joined = String::new();
    let mut upper_next = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            joined.extend(c.to_uppercase());
            upper_next = false;
        } else {
            joined.push(c);
        }
    }

    let mut chars = joined.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    let mut ident: String = capitalized
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if ident.is_empty() {
        DEFAULT_IDENTIFIER.to_string()
    } else {
        ident
    }
}
