//! Keyword classification mapping.
//!
//! A [`Classification`] is what the keyword classifier hands to the filter
//! compiler: an insertion-ordered mapping from keyword to the catalogue
//! field names it may match. Field names are kept as the classifier emitted
//! them; resolving them against the field registry is the compiler's job.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::fields::normalize_field_name;

/// One keyword and the field names it was classified into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationEntry {
    /// Non-empty, trimmed keyword.
    pub keyword: String,
    /// Field names with duplicates (after normalization) removed.
    pub fields: Vec<String>,
}

impl ClassificationEntry {
    fn merge_field(&mut self, field: String) {
        let normalized = normalize_field_name(&field);
        if normalized.is_empty() {
            return;
        }
        if !self
            .fields
            .iter()
            .any(|f| normalize_field_name(f) == normalized)
        {
            self.fields.push(field.trim().to_string());
        }
    }
}

/// Insertion-ordered keyword → field-names mapping.
///
/// Serializes as a JSON object (`{"best": ["reviews", "description"]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    entries: Vec<ClassificationEntry>,
}

impl Classification {
    /// Create an empty classification (zero keywords recognized).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword with its field names.
    ///
    /// An existing keyword keeps its position and gains any new field names.
    /// Blank keywords and blank field names are ignored.
    pub fn insert<I, S>(&mut self, keyword: &str, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }

        let idx = match self.entries.iter().position(|e| e.keyword == keyword) {
            Some(idx) => idx,
            None => {
                self.entries.push(ClassificationEntry {
                    keyword: keyword.to_string(),
                    fields: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx];
        for field in fields {
            entry.merge_field(field.into());
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<I, S>(mut self, keyword: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(keyword, fields);
        self
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[ClassificationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationEntry> {
        self.entries.iter()
    }

    /// Field names for a keyword, if present.
    pub fn get(&self, keyword: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.fields.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a classification from JSON text, preserving key order.
    ///
    /// Anything other than an object of keyword → field name(s) is a caller
    /// contract violation and fails with [`Error::InvalidInput`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("Invalid classification: {}", e)))
    }

    /// Parse a classification from an already-decoded JSON value.
    ///
    /// Key order follows the value's map order.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Classification::deserialize(value)
            .map_err(|e| Error::InvalidInput(format!("Invalid classification: {}", e)))
    }
}

impl<'a> IntoIterator for &'a Classification {
    type Item = &'a ClassificationEntry;
    type IntoIter = std::slice::Iter<'a, ClassificationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.keyword, &entry.fields)?;
        }
        map.end()
    }
}

/// Field names as they may appear on the wire: one name or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldNames {
    One(String),
    Many(Vec<String>),
}

struct ClassificationVisitor;

impl<'de> Visitor<'de> for ClassificationVisitor {
    type Value = Classification;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping of keyword to field name(s)")
    }

    fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut classification = Classification::new();
        while let Some((keyword, names)) = access.next_entry::<String, FieldNames>()? {
            match names {
                FieldNames::One(name) => classification.insert(&keyword, [name]),
                FieldNames::Many(names) => classification.insert(&keyword, names),
            }
        }
        Ok(classification)
    }
}

impl<'de> Deserialize<'de> for Classification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ClassificationVisitor)
    }
}
