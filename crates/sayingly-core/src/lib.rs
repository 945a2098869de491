//! # sayingly-core
//!
//! Canonical content model and pure query logic for the Sayingly catalog.
//!
//! This crate provides everything that runs without touching the data store:
//! - The [`CanonicalContentItem`] model and the eight [`ContentType`]s
//! - Declarative field mapping from heterogeneous backend rows
//! - Facet derivation over a loaded collection
//! - In-memory filtering and free-text search
//! - Uniform random sampling
//! - The presentation adapter for render-ready props
//!
//! The data access layer lives in `sayingly-db`.

pub mod content;
pub mod display;
pub mod error;
pub mod facet;
pub mod field_map;
pub mod filter;
pub mod logging;
pub mod sample;

// Re-export commonly used types at crate root
pub use content::{
    CanonicalContentItem, ContentType, Field, LanguageRef, UNKNOWN_LANGUAGE_CODE,
    UNKNOWN_LANGUAGE_NAME,
};
pub use display::{to_display_props, DisplayContent, NOT_PROVIDED};
pub use error::{Error, Result};
pub use facet::{build_facets, FacetDef, FacetExtractor, FacetIndex};
pub use field_map::{FieldMapRegistry, FieldMapping, RawRow};
pub use filter::{filter_items, FilterState, QueryProfile, ALL_VALUES};
pub use sample::{sample, sample_with};
