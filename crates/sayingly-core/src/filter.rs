//! In-memory filtering and free-text search over a loaded collection.
//!
//! Filtering is a pure function of (collection, filter state, profile):
//! it never mutates or reorders the source collection, and running the
//! same filter twice yields the same result.

use std::collections::{HashMap, HashSet};

use crate::content::{CanonicalContentItem, ContentType, Field};
use crate::facet::FacetDef;

/// Sentinel selection value meaning "no restriction" for a facet, matching
/// the `"all"` option every filter dropdown carries.
pub const ALL_VALUES: &str = "all";

/// Per-page filter state: one free-text term plus per-facet selections.
///
/// Created per page view and discarded on navigation; never persisted.
/// An empty term matches everything; a facet with no selection (or with the
/// [`ALL_VALUES`] sentinel selected) imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub search_term: String,
    selections: HashMap<String, HashSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search term.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Add a value to a facet's selection (multi-valued OR within the facet).
    pub fn select(mut self, facet: impl Into<String>, value: impl Into<String>) -> Self {
        self.selections
            .entry(facet.into())
            .or_default()
            .insert(value.into());
        self
    }

    /// Replace a facet's selection wholesale.
    pub fn select_values(
        mut self,
        facet: impl Into<String>,
        values: impl IntoIterator<Item = String>,
    ) -> Self {
        self.selections
            .insert(facet.into(), values.into_iter().collect());
        self
    }

    /// Drop all selections for a facet.
    pub fn clear_facet(&mut self, facet: &str) {
        self.selections.remove(facet);
    }

    /// The effective selection for a facet: `None` when the facet imposes
    /// no constraint (absent, empty, or "all" selected).
    fn constraint(&self, facet: &str) -> Option<&HashSet<String>> {
        self.selections
            .get(facet)
            .filter(|set| !set.is_empty() && !set.contains(ALL_VALUES))
    }

    /// Whether this state imposes no constraint at all.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.selections.keys().all(|f| self.constraint(f).is_none())
    }
}

/// Per-content-type query configuration: which fields the text search
/// inspects and which facet dimensions apply.
#[derive(Debug, Clone)]
pub struct QueryProfile {
    pub searchable: &'static [Field],
    pub facets: Vec<FacetDef>,
}

impl QueryProfile {
    /// The default profile for a content type: language facet everywhere,
    /// region facet for slang, searchable fields per
    /// [`ContentType::searchable_fields`].
    pub fn for_type(content_type: ContentType) -> Self {
        let mut facets = vec![FacetDef::language()];
        if content_type == ContentType::Slang {
            facets.push(FacetDef::region());
        }
        Self {
            searchable: content_type.searchable_fields(),
            facets,
        }
    }
}

/// Return the subset of `items` matching the filter state, in input order.
///
/// Text match is case-insensitive substring containment over any searchable
/// field; absent fields read as empty. Facet constraints compose with AND
/// across facets (and with the text match), OR within a facet's values.
pub fn filter_items(
    items: &[CanonicalContentItem],
    state: &FilterState,
    profile: &QueryProfile,
) -> Vec<CanonicalContentItem> {
    let needle = state.search_term.trim().to_lowercase();
    items
        .iter()
        .filter(|item| matches_text(item, &needle, profile.searchable))
        .filter(|item| matches_facets(item, state, &profile.facets))
        .cloned()
        .collect()
}

fn matches_text(item: &CanonicalContentItem, needle: &str, fields: &[Field]) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| item.text(*field).to_lowercase().contains(needle))
}

fn matches_facets(item: &CanonicalContentItem, state: &FilterState, facets: &[FacetDef]) -> bool {
    facets.iter().all(|def| match state.constraint(def.name) {
        Some(selected) => (def.extract)(item)
            .iter()
            .any(|value| selected.contains(value)),
        None => true,
    })
}
