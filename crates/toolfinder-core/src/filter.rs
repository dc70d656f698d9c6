//! Intermediate and compiled filter types.
//!
//! [`FilterExpression`] groups classified keywords per registered field;
//! [`CompiledQuery`] is the parameterized predicate the catalogue executes.
//! Both live for a single search request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::error::{Error, Result};
use crate::fields::{lookup_field, FieldSpec, FIELD_REGISTRY};

/// How per-field clauses combine into the final predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldJoin {
    /// A row matches when any classified field matches (OR across fields).
    #[default]
    Any,
    /// A row matches only when every classified field matches (AND across fields).
    All,
}

impl FieldJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldJoin::Any => "any",
            FieldJoin::All => "all",
        }
    }
}

impl fmt::Display for FieldJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldJoin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "or" => Ok(FieldJoin::Any),
            "all" | "and" => Ok(FieldJoin::All),
            other => Err(Error::InvalidInput(format!(
                "Unknown field join '{}', expected 'any' or 'all'",
                other
            ))),
        }
    }
}

/// Substring conditions contributed to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConditions {
    pub field: &'static FieldSpec,
    /// Keywords in classification insertion order.
    pub keywords: Vec<String>,
}

/// Keywords grouped by target field, in registry order.
///
/// Always holds one group per registered field; a group's keyword list is
/// empty iff no keyword was classified into that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    groups: Vec<FieldConditions>,
    dropped_fields: Vec<String>,
}

impl FilterExpression {
    /// Group a classification's keywords by registered field.
    ///
    /// A keyword classified into N known fields contributes one condition to
    /// each. Unknown field names are dropped and reported through
    /// [`dropped_fields`](Self::dropped_fields), never as an error.
    pub fn group(classification: &Classification) -> Self {
        let mut groups: Vec<FieldConditions> = FIELD_REGISTRY
            .iter()
            .map(|field| FieldConditions {
                field,
                keywords: Vec::new(),
            })
            .collect();
        let mut dropped_fields = Vec::new();

        for entry in classification {
            for raw in &entry.fields {
                match lookup_field(raw) {
                    Some((idx, _)) => groups[idx].keywords.push(entry.keyword.clone()),
                    None => dropped_fields.push(raw.clone()),
                }
            }
        }

        Self {
            groups,
            dropped_fields,
        }
    }

    /// All groups, including empty ones, in registry order.
    pub fn groups(&self) -> &[FieldConditions] {
        &self.groups
    }

    /// Groups that will contribute a clause.
    pub fn active_groups(&self) -> impl Iterator<Item = &FieldConditions> {
        self.groups.iter().filter(|g| !g.keywords.is_empty())
    }

    /// Field names that matched nothing in the registry.
    pub fn dropped_fields(&self) -> &[String] {
        &self.dropped_fields
    }

    /// Total number of substring conditions across all fields.
    pub fn condition_count(&self) -> usize {
        self.groups.iter().map(|g| g.keywords.len()).sum()
    }

    /// True when no field will contribute a clause.
    pub fn is_empty(&self) -> bool {
        self.condition_count() == 0
    }
}

/// Parameterized filter predicate plus its ordered bindings.
///
/// Invariant: `filter` holds exactly `params.len()` placeholders, numbered in
/// the same order as `params`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    /// Predicate text (without the `WHERE` keyword).
    pub filter: String,
    /// Bound values, in placeholder order.
    pub params: Vec<String>,
}

impl CompiledQuery {
    /// The always-true predicate with no bindings.
    pub fn match_all() -> Self {
        Self {
            filter: "TRUE".to_string(),
            params: Vec::new(),
        }
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}
