//! Catalog repository: load, normalize, and serve content collections.
//!
//! One repository instance serves a page visit. It owns the raw-to-canonical
//! pipeline: select rows through the injected [`DataService`], map them with
//! the field registry, and resolve each item's language against the language
//! table (fetched once per repository). All operations are read-only.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use sayingly_core::{
    CanonicalContentItem, ContentType, Error, FieldMapRegistry, LanguageRef, Result,
    UNKNOWN_LANGUAGE_NAME,
};

use crate::data_service::{validate_identifier, DataService, OrderDirection, SelectQuery};

/// Table holding language metadata (code, name).
pub const LANGUAGE_TABLE: &str = "languages";

/// Ordering options for [`CatalogRepository::fetch_all`].
///
/// The default is the backend's insertion order; pages that order by
/// popularity rank, creation time, or id pass the column explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub order_by: Option<String>,
    pub direction: OrderDirection,
}

impl FetchOptions {
    /// Order ascending by the given column.
    pub fn order_by(column: impl Into<String>) -> Self {
        Self {
            order_by: Some(column.into()),
            direction: OrderDirection::Asc,
        }
    }

    /// Flip the direction to descending.
    pub fn desc(mut self) -> Self {
        self.direction = OrderDirection::Desc;
        self
    }
}

type CacheKey = (ContentType, Option<String>, OrderDirection);

/// Repository over the eight content collections.
pub struct CatalogRepository {
    service: Arc<dyn DataService>,
    registry: FieldMapRegistry,
    memoize: bool,
    cache: RwLock<HashMap<CacheKey, Arc<[CanonicalContentItem]>>>,
    languages: RwLock<Option<Arc<HashMap<String, LanguageRef>>>>,
}

impl CatalogRepository {
    /// Create a repository over the given data service, using the built-in
    /// field mappings and no memoization.
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self {
            service,
            registry: FieldMapRegistry::builtin().clone(),
            memoize: false,
            cache: RwLock::new(HashMap::new()),
            languages: RwLock::new(None),
        }
    }

    /// Replace the field map registry.
    pub fn with_registry(mut self, registry: FieldMapRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Memoize `fetch_all` results per (content type, order) key for the
    /// lifetime of this repository, avoiding redundant round-trips during a
    /// page visit.
    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Fetch every item of a content type, joined with language metadata.
    pub async fn fetch_all(
        &self,
        content_type: ContentType,
        options: &FetchOptions,
    ) -> Result<Vec<CanonicalContentItem>> {
        let key = (content_type, options.order_by.clone(), options.direction);
        if self.memoize {
            if let Some(cached) = self.cache.read().await.get(&key) {
                debug!(
                    subsystem = "catalog",
                    op = "fetch_all",
                    content_type = %content_type,
                    cache_hit = true,
                    result_count = cached.len(),
                    "served from memoized collection"
                );
                return Ok(cached.to_vec());
            }
        }

        let start = Instant::now();
        let mut query = SelectQuery::table(content_type.table_name());
        if let Some(column) = &options.order_by {
            validate_identifier(column)?;
            query = query.order_by(column.clone(), options.direction);
        }

        let rows = self.service.select(query).await.map_err(|e| {
            warn!(
                subsystem = "catalog",
                op = "fetch_all",
                content_type = %content_type,
                error = %e,
                "fetch failed"
            );
            e
        })?;
        let languages = self.language_map().await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let mut item = self.registry.map_row(content_type, row)?;
            resolve_language(&mut item, &languages);
            items.push(item);
        }

        debug!(
            subsystem = "catalog",
            op = "fetch_all",
            content_type = %content_type,
            result_count = items.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "collection loaded"
        );

        if self.memoize {
            self.cache
                .write()
                .await
                .insert(key, Arc::from(items.as_slice()));
        }
        Ok(items)
    }

    /// Fetch a single item by id. `Ok(None)` when the id has no row,
    /// distinct from a fetch failure.
    pub async fn fetch_by_id(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<Option<CanonicalContentItem>> {
        let row = self
            .service
            .select_one(content_type.table_name(), id)
            .await?;
        let Some(row) = row else {
            debug!(
                subsystem = "catalog",
                op = "fetch_by_id",
                content_type = %content_type,
                content_id = %id,
                "no such item"
            );
            return Ok(None);
        };

        let mut item = self.registry.map_row(content_type, row)?;
        let languages = self.language_map().await?;
        resolve_language(&mut item, &languages);
        Ok(Some(item))
    }

    /// Like [`fetch_by_id`](Self::fetch_by_id), but a missing id is the
    /// typed [`Error::ContentNotFound`].
    pub async fn require(
        &self,
        content_type: ContentType,
        id: &str,
    ) -> Result<CanonicalContentItem> {
        self.fetch_by_id(content_type, id)
            .await?
            .ok_or_else(|| Error::ContentNotFound {
                content_type,
                id: id.to_string(),
            })
    }

    /// Fetch up to `limit` items of the same type and language, excluding
    /// one id. No ordering contract.
    pub async fn fetch_related(
        &self,
        content_type: ContentType,
        language_code: &str,
        exclude_id: &str,
        limit: i64,
    ) -> Result<Vec<CanonicalContentItem>> {
        let query = SelectQuery::table(content_type.table_name())
            .eq("language_code", language_code)
            .ne("id", exclude_id)
            .limit(limit);
        let rows = self.service.select(query).await?;
        let languages = self.language_map().await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let mut item = self.registry.map_row(content_type, row)?;
            resolve_language(&mut item, &languages);
            items.push(item);
        }

        debug!(
            subsystem = "catalog",
            op = "fetch_related",
            content_type = %content_type,
            language = %language_code,
            result_count = items.len(),
            "related items loaded"
        );
        Ok(items)
    }

    /// All known languages, sorted by display name. Used to populate the
    /// language explorer independent of any loaded collection.
    pub async fn languages(&self) -> Result<Vec<LanguageRef>> {
        let map = self.language_map().await?;
        let mut languages: Vec<LanguageRef> = map.values().cloned().collect();
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(languages)
    }

    /// The language table, fetched once per repository lifetime.
    async fn language_map(&self) -> Result<Arc<HashMap<String, LanguageRef>>> {
        if let Some(map) = self.languages.read().await.as_ref() {
            return Ok(Arc::clone(map));
        }

        let rows = self.service.select(SelectQuery::table(LANGUAGE_TABLE)).await?;
        let map: HashMap<String, LanguageRef> = rows
            .iter()
            .filter_map(|row| {
                let code = row.get("code")?.as_str()?.to_string();
                if code.is_empty() {
                    return None;
                }
                let name = row
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or(UNKNOWN_LANGUAGE_NAME)
                    .to_string();
                Some((code.clone(), LanguageRef { name, code }))
            })
            .collect();

        let map = Arc::new(map);
        *self.languages.write().await = Some(Arc::clone(&map));
        Ok(map)
    }
}

/// Resolve an item's language against the language table.
///
/// Rows that carried a full language object keep it; a bare code looks its
/// name up, and a code with no language row collapses to the unknown
/// sentinel so downstream rendering never sees a half-resolved reference.
fn resolve_language(item: &mut CanonicalContentItem, languages: &HashMap<String, LanguageRef>) {
    if item.language.is_unknown() || item.language.name != UNKNOWN_LANGUAGE_NAME {
        return;
    }
    item.language = languages
        .get(&item.language.code)
        .cloned()
        .unwrap_or_else(LanguageRef::unknown);
}
