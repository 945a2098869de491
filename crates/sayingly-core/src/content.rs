//! Canonical content model for the Sayingly catalog.
//!
//! Every backing table stores its own heterogeneous column set; the query
//! layer normalizes all of them into [`CanonicalContentItem`] so that facet
//! derivation, filtering, and presentation run content-type-agnostically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The eight catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Idiom,
    Proverb,
    Slang,
    Riddle,
    WisdomConcept,
    MythLegend,
    FalseFriend,
    UntranslatableWord,
}

impl ContentType {
    /// All content types, in catalog display order.
    pub const ALL: [ContentType; 8] = [
        ContentType::Idiom,
        ContentType::Proverb,
        ContentType::Slang,
        ContentType::Riddle,
        ContentType::WisdomConcept,
        ContentType::MythLegend,
        ContentType::FalseFriend,
        ContentType::UntranslatableWord,
    ];

    /// Stable snake_case wire name, also used in detail paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Idiom => "idiom",
            ContentType::Proverb => "proverb",
            ContentType::Slang => "slang",
            ContentType::Riddle => "riddle",
            ContentType::WisdomConcept => "wisdom_concept",
            ContentType::MythLegend => "myth_legend",
            ContentType::FalseFriend => "false_friend",
            ContentType::UntranslatableWord => "untranslatable_word",
        }
    }

    /// Backing table name in the data store.
    pub fn table_name(&self) -> &'static str {
        match self {
            ContentType::Idiom => "idioms",
            ContentType::Proverb => "proverbs",
            ContentType::Slang => "slang",
            ContentType::Riddle => "riddles",
            ContentType::WisdomConcept => "wisdom_concepts",
            ContentType::MythLegend => "myths_legends",
            ContentType::FalseFriend => "false_friends",
            ContentType::UntranslatableWord => "untranslatable_words",
        }
    }

    /// Fields the free-text search inspects for this content type.
    ///
    /// Idioms and proverbs match on the expression and its gloss; slang
    /// additionally matches usage examples and the region tag; riddles
    /// also match their answer.
    pub fn searchable_fields(&self) -> &'static [Field] {
        match self {
            ContentType::Slang => &[
                Field::Original,
                Field::Translation,
                Field::Example,
                Field::Extra("region"),
            ],
            ContentType::Riddle => &[
                Field::Original,
                Field::Translation,
                Field::Extra("answer"),
            ],
            ContentType::MythLegend => {
                &[Field::Original, Field::Translation, Field::UsageContext]
            }
            _ => &[Field::Original, Field::Translation],
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown content type: {s}")))
    }
}

/// Display name used when the language join fails.
pub const UNKNOWN_LANGUAGE_NAME: &str = "Unknown Language";

/// Language code used when the language join fails.
pub const UNKNOWN_LANGUAGE_CODE: &str = "unknown";

/// Language metadata attached to every canonical item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRef {
    /// Display name, e.g. "Dutch".
    pub name: String,
    /// Stable short identifier, e.g. "nl". Never empty.
    pub code: String,
}

impl LanguageRef {
    /// Sentinel returned when an item's language cannot be resolved.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_LANGUAGE_NAME.to_string(),
            code: UNKNOWN_LANGUAGE_CODE.to_string(),
        }
    }

    /// Whether this is the unresolved-language sentinel.
    pub fn is_unknown(&self) -> bool {
        self.code == UNKNOWN_LANGUAGE_CODE
    }
}

impl Default for LanguageRef {
    fn default() -> Self {
        Self::unknown()
    }
}

/// A canonical text field of a catalog item.
///
/// `Extra` addresses a type-specific field carried opaquely in
/// [`CanonicalContentItem::extra`], e.g. `Extra("region")` for slang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Original,
    Translation,
    Pronunciation,
    Example,
    UsageContext,
    Extra(&'static str),
}

/// The normalized, content-type-agnostic representation of a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalContentItem {
    /// Opaque stable identifier, unique within its content-type collection.
    pub id: String,
    /// Which of the eight catalog categories this item belongs to.
    pub content_type: ContentType,
    /// Source-language text or title. Never empty in valid data.
    pub original: String,
    /// English gloss/translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Phonetic guide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// Usage example or supporting text (a moral lesson for myths).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Free-text context/explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_context: Option<String>,
    /// Resolved language metadata; falls back to the unknown sentinel.
    #[serde(default)]
    pub language: LanguageRef,
    /// Type-specific fields not unified by the canonical shape, carried
    /// opaquely (riddle `answer`, slang `region`, false-friend pair fields).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl CanonicalContentItem {
    /// Read a canonical field as text. Missing or non-string values read as
    /// the empty string so search never panics on absent optional fields.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Original => &self.original,
            Field::Translation => self.translation.as_deref().unwrap_or(""),
            Field::Pronunciation => self.pronunciation.as_deref().unwrap_or(""),
            Field::Example => self.example.as_deref().unwrap_or(""),
            Field::UsageContext => self.usage_context.as_deref().unwrap_or(""),
            Field::Extra(key) => self
                .extra
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or(""),
        }
    }
}
