//! Catalogue field registry.
//!
//! The set of filterable catalogue columns is static configuration: each
//! column is tagged with a [`FieldKind`] and kind-specific matching is looked
//! up from the registry rather than branched on per column name.

use serde::{Deserialize, Serialize};

/// Storage shape of a catalogue column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single string column, matched by case-insensitive substring.
    ScalarText,
    /// Ordered `text[]` column, matched when any element contains the substring.
    TagList,
}

/// A registered catalogue column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Column name in the catalogue table.
    pub name: &'static str,
    /// How the column is matched.
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Filterable catalogue columns, in compilation order.
pub const FIELD_REGISTRY: &[FieldSpec] = &[
    FieldSpec::new("reviews", FieldKind::TagList),
    FieldSpec::new("tool_type", FieldKind::TagList),
    FieldSpec::new("learning_activities", FieldKind::TagList),
    FieldSpec::new("ease_of_use", FieldKind::ScalarText),
    FieldSpec::new("name", FieldKind::ScalarText),
    FieldSpec::new("description", FieldKind::ScalarText),
];

/// Canonical form of a field name as emitted by a classifier.
///
/// Trims, lower-cases, and folds spaces and hyphens to underscores, so
/// `"Tool Type"` and `"tool-type"` both become `tool_type`.
pub fn normalize_field_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Look up a registered field by (possibly unnormalized) name.
///
/// Returns the registry index alongside the field; `None` for unknown names.
pub fn lookup_field(raw: &str) -> Option<(usize, &'static FieldSpec)> {
    let name = normalize_field_name(raw);
    FIELD_REGISTRY
        .iter()
        .enumerate()
        .find(|(_, spec)| spec.name == name)
}

/// Names of all registered fields, in registry order.
pub fn field_names() -> Vec<&'static str> {
    FIELD_REGISTRY.iter().map(|f| f.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_and_kinds() {
        assert_eq!(
            field_names(),
            vec![
                "reviews",
                "tool_type",
                "learning_activities",
                "ease_of_use",
                "name",
                "description"
            ]
        );
        let tag_lists: Vec<_> = FIELD_REGISTRY
            .iter()
            .filter(|f| f.kind == FieldKind::TagList)
            .map(|f| f.name)
            .collect();
        assert_eq!(tag_lists, vec!["reviews", "tool_type", "learning_activities"]);
    }

    #[test]
    fn test_lookup_exact() {
        let (idx, spec) = lookup_field("description").unwrap();
        assert_eq!(idx, 5);
        assert_eq!(spec.kind, FieldKind::ScalarText);
    }

    #[test]
    fn test_lookup_normalizes() {
        assert_eq!(lookup_field("Tool Type").unwrap().1.name, "tool_type");
        assert_eq!(lookup_field("  tool-type ").unwrap().1.name, "tool_type");
        assert_eq!(lookup_field("REVIEWS").unwrap().1.name, "reviews");
        assert_eq!(
            lookup_field("Learning Activities").unwrap().1.name,
            "learning_activities"
        );
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup_field("price").is_none());
        assert!(lookup_field("").is_none());
        assert!(lookup_field("name; DROP TABLE tools").is_none());
    }

    #[test]
    fn test_field_kind_serde() {
        assert_eq!(
            serde_json::to_string(&FieldKind::ScalarText).unwrap(),
            "\"scalar-text\""
        );
        assert_eq!(
            serde_json::from_str::<FieldKind>("\"tag-list\"").unwrap(),
            FieldKind::TagList
        );
    }
}
