//! Presentation adapter: canonical items to render-ready props.
//!
//! View code renders [`DisplayContent`] without any null branching: every
//! field is a plain string, missing glosses show the "Not provided"
//! sentinel, and the rest of the optional text shows empty.

use serde::{Deserialize, Serialize};

use crate::content::CanonicalContentItem;

/// Sentinel shown for a missing translation or meaning.
pub const NOT_PROVIDED: &str = "Not provided";

/// Render-ready projection of a canonical item. Total: no field is ever
/// null and construction cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayContent {
    pub original: String,
    pub translation: String,
    pub pronunciation: String,
    pub example: String,
    pub usage_context: String,
    pub language_name: String,
    pub language_code: String,
    /// Stable route to the detail view, `/{content_type}/{id}`.
    pub detail_path: String,
    /// One-line share text, `original — translation` when a gloss exists.
    pub share_text: String,
}

/// Project a canonical item into display props.
pub fn to_display_props(item: &CanonicalContentItem) -> DisplayContent {
    let translation = item
        .translation
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    let share_text = match &item.translation {
        Some(t) if !t.is_empty() => format!("{} \u{2014} {}", item.original, t),
        _ => item.original.clone(),
    };

    DisplayContent {
        original: item.original.clone(),
        translation,
        pronunciation: item.pronunciation.clone().unwrap_or_default(),
        example: item.example.clone().unwrap_or_default(),
        usage_context: item.usage_context.clone().unwrap_or_default(),
        language_name: item.language.name.clone(),
        language_code: item.language.code.clone(),
        detail_path: format!("/{}/{}", item.content_type, item.id),
        share_text,
    }
}
