//! Facet derivation over a loaded collection.
//!
//! Facets populate the filter controls of a listing page: the distinct
//! languages (or regions, or any other extracted dimension) actually present
//! in the collection. The index is recomputed whenever the backing
//! collection changes and is never persisted.

use std::collections::{HashMap, HashSet};

use crate::content::CanonicalContentItem;

/// Pure extractor from an item to zero or more facet values.
pub type FacetExtractor = fn(&CanonicalContentItem) -> Vec<String>;

/// A named facet dimension with its extractor.
#[derive(Debug, Clone, Copy)]
pub struct FacetDef {
    pub name: &'static str,
    pub extract: FacetExtractor,
}

impl FacetDef {
    /// Facet over the item's language code.
    pub fn language() -> Self {
        Self {
            name: "language",
            extract: extract_language_code,
        }
    }

    /// Facet over the slang `region` extra field.
    pub fn region() -> Self {
        Self {
            name: "region",
            extract: extract_region,
        }
    }
}

/// Extractor for [`FacetDef::language`].
pub fn extract_language_code(item: &CanonicalContentItem) -> Vec<String> {
    vec![item.language.code.clone()]
}

/// Extractor for [`FacetDef::region`]. Items without a region contribute
/// no value.
pub fn extract_region(item: &CanonicalContentItem) -> Vec<String> {
    match item.extra.get("region").and_then(|v| v.as_str()) {
        Some(region) if !region.is_empty() => vec![region.to_string()],
        _ => Vec::new(),
    }
}

/// Distinct facet values observed in a loaded collection, per facet name,
/// in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetIndex {
    facets: HashMap<String, Vec<String>>,
}

impl FacetIndex {
    /// Distinct values for a facet, in first-seen order. Unknown facet
    /// names read as an empty list.
    pub fn values(&self, facet: &str) -> &[String] {
        self.facets.get(facet).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all indexed facets (unordered).
    pub fn facet_names(&self) -> impl Iterator<Item = &str> {
        self.facets.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.facets.values().all(Vec::is_empty)
    }
}

/// Derive the facet index for a collection. O(n * f); collections are
/// page-sized, so no indexing structure beyond a seen-set is warranted.
pub fn build_facets(items: &[CanonicalContentItem], defs: &[FacetDef]) -> FacetIndex {
    let mut facets = HashMap::with_capacity(defs.len());
    for def in defs {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for item in items {
            for value in (def.extract)(item) {
                if seen.insert(value.clone()) {
                    values.push(value);
                }
            }
        }
        facets.insert(def.name.to_string(), values);
    }
    FacetIndex { facets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentType, LanguageRef};
    use serde_json::json;

    fn idiom(id: &str, code: &str) -> CanonicalContentItem {
        CanonicalContentItem {
            id: id.to_string(),
            content_type: ContentType::Idiom,
            original: format!("idiom {id}"),
            translation: None,
            pronunciation: None,
            example: None,
            usage_context: None,
            language: LanguageRef {
                name: code.to_uppercase(),
                code: code.to_string(),
            },
            extra: Default::default(),
        }
    }

    #[test]
    fn test_language_facet_first_seen_order() {
        let items = vec![idiom("1", "nl"), idiom("2", "nl"), idiom("3", "fr")];
        let index = build_facets(&items, &[FacetDef::language()]);
        assert_eq!(index.values("language"), ["nl", "fr"]);
    }

    #[test]
    fn test_facet_completeness() {
        let items = vec![
            idiom("1", "nl"),
            idiom("2", "fr"),
            idiom("3", "ja"),
            idiom("4", "fr"),
        ];
        let index = build_facets(&items, &[FacetDef::language()]);
        let values = index.values("language");

        // Every value occurs on at least one item.
        for value in values {
            assert!(items.iter().any(|i| &i.language.code == value));
        }
        // Every distinct code appears exactly once.
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_region_facet_skips_items_without_region() {
        let mut with_region = idiom("1", "en");
        with_region
            .extra
            .insert("region".to_string(), json!("UK"));
        let items = vec![with_region, idiom("2", "en")];
        let index = build_facets(&items, &[FacetDef::region()]);
        assert_eq!(index.values("region"), ["UK"]);
    }

    #[test]
    fn test_empty_collection_yields_empty_index() {
        let index = build_facets(&[], &[FacetDef::language(), FacetDef::region()]);
        assert!(index.is_empty());
        assert!(index.values("language").is_empty());
    }

    #[test]
    fn test_unknown_facet_name_reads_empty() {
        let index = build_facets(&[idiom("1", "nl")], &[FacetDef::language()]);
        assert!(index.values("dialect").is_empty());
    }
}
