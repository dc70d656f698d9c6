//! Identifier validation for the configurable catalogue table name.
//!
//! The table name is the only piece of catalogue SQL that comes from
//! configuration rather than the field registry, so it is checked before it
//! is ever interpolated.

use toolfinder_core::{Error, Result};

/// PostgreSQL identifier length limit.
const MAX_IDENTIFIER_LEN: usize = 63;

const RESERVED_KEYWORDS: &[&str] = &[
    "pg_catalog",
    "information_schema",
    "select",
    "insert",
    "update",
    "delete",
    "drop",
    "create",
    "alter",
    "grant",
    "revoke",
    "truncate",
    "table",
    "where",
];

/// Validate a table identifier, optionally schema-qualified (`schema.table`).
///
/// Each part must be non-empty, at most 63 characters, start with a letter
/// or underscore, contain only ASCII alphanumerics and underscores, and not
/// be a reserved word.
///
/// ```
/// use toolfinder_db::validate_identifier;
///
/// assert!(validate_identifier("tools").is_ok());
/// assert!(validate_identifier("catalogue.tools").is_ok());
/// assert!(validate_identifier("tools; DROP TABLE tools").is_err());
/// ```
pub fn validate_identifier(name: &str) -> Result<()> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(Error::InvalidInput(format!(
            "Identifier '{}' has too many qualifiers",
            name
        )));
    }

    for part in parts {
        validate_identifier_part(part)?;
    }
    Ok(())
}

fn validate_identifier_part(part: &str) -> Result<()> {
    if part.is_empty() {
        return Err(Error::InvalidInput(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if part.len() > MAX_IDENTIFIER_LEN {
        return Err(Error::InvalidInput(format!(
            "Identifier exceeds 63 character limit: {} characters",
            part.len()
        )));
    }

    if let Some(first) = part.chars().next() {
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(Error::InvalidInput(format!(
                "Identifier must start with a letter or underscore, found: '{}'",
                first
            )));
        }
    }

    if let Some(ch) = part
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_')
    {
        return Err(Error::InvalidInput(format!(
            "Identifier contains invalid character: '{}'",
            ch
        )));
    }

    if RESERVED_KEYWORDS.contains(&part.to_ascii_lowercase().as_str()) {
        return Err(Error::InvalidInput(format!(
            "Identifier '{}' is a reserved word",
            part
        )));
    }

    Ok(())
}
