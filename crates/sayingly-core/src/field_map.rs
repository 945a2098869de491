//! Declarative field mapping from raw backend rows to canonical items.
//!
//! Each backing table names its columns differently (`word` vs `original`
//! vs `title` for the headline text). Rather than scattering per-type
//! conditionals through callers, a [`FieldMapRegistry`] holds one
//! [`FieldMapping`] per content type: an ordered fallback chain per
//! canonical field, first non-empty value wins. Columns consumed by the
//! mapping are removed from the row; whatever remains is carried opaquely
//! in [`CanonicalContentItem::extra`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::content::{CanonicalContentItem, ContentType, LanguageRef, UNKNOWN_LANGUAGE_NAME};
use crate::error::{Error, Result};

/// A raw backend row, as returned by the data service.
pub type RawRow = Map<String, Value>;

/// Fallback chains for each canonical field of one content type.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub original: &'static [&'static str],
    pub translation: &'static [&'static str],
    pub pronunciation: &'static [&'static str],
    pub example: &'static [&'static str],
    pub usage_context: &'static [&'static str],
}

/// Shared fallback chains for the expression-like content types.
const DEFAULT_MAPPING: FieldMapping = FieldMapping {
    original: &["original", "text", "expression"],
    translation: &["english_translation", "translation"],
    pronunciation: &["pronunciation", "romanized"],
    example: &["examples", "example", "usage_examples"],
    usage_context: &["cultural_notes", "usage_context", "context"],
};

const UNTRANSLATABLE_MAPPING: FieldMapping = FieldMapping {
    original: &["word"],
    translation: &["meaning"],
    pronunciation: &["pronunciation"],
    example: &["examples", "example"],
    usage_context: &["cultural_notes", "context"],
};

const MYTH_MAPPING: FieldMapping = FieldMapping {
    original: &["title"],
    translation: &["summary"],
    pronunciation: &[],
    example: &["moral_lesson"],
    usage_context: &["cultural_significance"],
};

/// Lookup table from content type to field mapping.
///
/// The built-in registry covers all eight content types; a custom registry
/// may omit types, in which case mapping one is a configuration error.
#[derive(Debug, Clone)]
pub struct FieldMapRegistry {
    mappings: HashMap<ContentType, FieldMapping>,
}

static BUILTIN: Lazy<FieldMapRegistry> = Lazy::new(|| {
    let mut registry = FieldMapRegistry::empty();
    for ct in ContentType::ALL {
        let mapping = match ct {
            ContentType::UntranslatableWord => UNTRANSLATABLE_MAPPING,
            ContentType::MythLegend => MYTH_MAPPING,
            _ => DEFAULT_MAPPING,
        };
        registry.insert(ct, mapping);
    }
    registry
});

impl FieldMapRegistry {
    /// The built-in registry covering all eight content types.
    pub fn builtin() -> &'static FieldMapRegistry {
        &BUILTIN
    }

    /// An empty registry for callers that register their own mappings.
    pub fn empty() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Register (or replace) the mapping for a content type.
    pub fn insert(&mut self, content_type: ContentType, mapping: FieldMapping) {
        self.mappings.insert(content_type, mapping);
    }

    /// Look up the mapping for a content type.
    ///
    /// An unregistered type is a programmer error and fails loudly rather
    /// than silently dropping items.
    pub fn mapping(&self, content_type: ContentType) -> Result<&FieldMapping> {
        self.mappings
            .get(&content_type)
            .ok_or_else(|| Error::Config(format!("no field mapping for {content_type}")))
    }

    /// Map a raw backend row into a canonical item.
    ///
    /// The row's `id` may be a JSON string or integer; both normalize to the
    /// string form. Language columns (`language_code`, `language_name`, or a
    /// nested `languages` object) resolve to a [`LanguageRef`], defaulting to
    /// the unknown sentinel when absent.
    pub fn map_row(
        &self,
        content_type: ContentType,
        mut row: RawRow,
    ) -> Result<CanonicalContentItem> {
        let mapping = *self.mapping(content_type)?;

        let id = row
            .remove("id")
            .map(|v| scalar_to_string(&v))
            .unwrap_or_default();
        let language = take_language(&mut row);

        let original = take_first(&mut row, mapping.original).unwrap_or_default();
        let translation = take_first(&mut row, mapping.translation);
        let pronunciation = take_first(&mut row, mapping.pronunciation);
        let example = take_first(&mut row, mapping.example);
        let usage_context = take_first(&mut row, mapping.usage_context);

        Ok(CanonicalContentItem {
            id,
            content_type,
            original,
            translation,
            pronunciation,
            example,
            usage_context,
            language,
            extra: row,
        })
    }
}

/// Remove every field in the chain; return the first non-empty value.
fn take_first(row: &mut RawRow, fields: &[&str]) -> Option<String> {
    let mut found = None;
    for field in fields {
        if let Some(value) = row.remove(*field) {
            if found.is_none() {
                let text = value_to_text(&value);
                if !text.is_empty() {
                    found = Some(text);
                }
            }
        }
    }
    found
}

/// Resolve language columns from the row.
///
/// Accepts a flat `language_code`/`language_name` pair or a nested
/// `languages` object (the shape a server-side join produces). A missing
/// name is filled from the language table later by the repository; a
/// missing code means the join failed and yields the unknown sentinel.
fn take_language(row: &mut RawRow) -> LanguageRef {
    let mut code = row
        .remove("language_code")
        .map(|v| scalar_to_string(&v))
        .filter(|s| !s.is_empty());
    let mut name = row
        .remove("language_name")
        .map(|v| scalar_to_string(&v))
        .filter(|s| !s.is_empty());

    if let Some(Value::Object(nested)) = row.remove("languages") {
        if code.is_none() {
            code = nested
                .get("code")
                .map(scalar_to_string)
                .filter(|s| !s.is_empty());
        }
        if name.is_none() {
            name = nested
                .get("name")
                .map(scalar_to_string)
                .filter(|s| !s.is_empty());
        }
    }

    match code {
        Some(code) => LanguageRef {
            name: name.unwrap_or_else(|| UNKNOWN_LANGUAGE_NAME.to_string()),
            code,
        },
        None => LanguageRef::unknown(),
    }
}

/// Render a scalar JSON value as a string; objects/arrays/null read empty.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Render a JSON value as display text. String arrays (e.g. a
/// `usage_examples` column) join into one block.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        other => scalar_to_string(other),
    }
}
