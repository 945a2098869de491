//! End-to-end flow over the in-memory backend: load a collection, derive
//! facets, filter, sample, and project for display — the full path a
//! listing page takes.

use std::sync::Arc;

use sayingly_db::test_fixtures::seed_catalog;
use sayingly_db::{
    build_facets, filter_items, sample_with, to_display_props, CatalogRepository, ContentType,
    Error, FacetDef, FetchOptions, FilterState, MemoryDataService, QueryProfile, NOT_PROVIDED,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

async fn seeded_repo() -> CatalogRepository {
    let service = Arc::new(MemoryDataService::new());
    seed_catalog(&service).await;
    CatalogRepository::new(service)
}

#[tokio::test]
async fn untranslatable_word_maps_to_canonical_shape() {
    let repo = seeded_repo().await;
    let words = repo
        .fetch_all(ContentType::UntranslatableWord, &FetchOptions::default())
        .await
        .unwrap();

    assert_eq!(words.len(), 1);
    assert_eq!(words[0].original, "gezellig");
    assert_eq!(words[0].translation.as_deref(), Some("cozy togetherness"));
    assert_eq!(words[0].language.name, "Dutch");
}

#[tokio::test]
async fn language_facets_come_out_in_first_seen_order() {
    let repo = seeded_repo().await;
    let idioms = repo
        .fetch_all(ContentType::Idiom, &FetchOptions::default())
        .await
        .unwrap();

    let facets = build_facets(&idioms, &[FacetDef::language()]);
    assert_eq!(facets.values("language"), ["nl", "fr"]);
}

#[tokio::test]
async fn text_search_finds_the_arm_idiom() {
    let repo = seeded_repo().await;
    let idioms = repo
        .fetch_all(ContentType::Idiom, &FetchOptions::default())
        .await
        .unwrap();

    let state = FilterState::new().with_term("arm");
    let matching = filter_items(&idioms, &state, &QueryProfile::for_type(ContentType::Idiom));
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].original, "Het kost een arm en een been");
}

#[tokio::test]
async fn language_facet_filter_preserves_order() {
    let repo = seeded_repo().await;
    let idioms = repo
        .fetch_all(ContentType::Idiom, &FetchOptions::default())
        .await
        .unwrap();

    let state = FilterState::new().select("language", "nl");
    let matching = filter_items(&idioms, &state, &QueryProfile::for_type(ContentType::Idiom));
    let ids: Vec<_> = matching.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["i1", "i3"]);
}

#[tokio::test]
async fn missing_id_resolves_to_none_not_error() {
    let repo = seeded_repo().await;
    let found = repo
        .fetch_by_id(ContentType::Idiom, "nonexistent-id")
        .await
        .unwrap();
    assert!(found.is_none());

    let err = repo
        .require(ContentType::Idiom, "nonexistent-id")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ContentNotFound { .. }));
}

#[tokio::test]
async fn surprise_me_samples_from_the_filtered_set() {
    let repo = seeded_repo().await;
    let idioms = repo
        .fetch_all(ContentType::Idiom, &FetchOptions::default())
        .await
        .unwrap();

    let state = FilterState::new().select("language", "nl");
    let matching = filter_items(&idioms, &state, &QueryProfile::for_type(ContentType::Idiom));

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let pick = sample_with(&matching, &mut rng).unwrap();
        assert_eq!(pick.language.code, "nl");
    }
}

#[tokio::test]
async fn detail_page_projection_is_total() {
    let repo = seeded_repo().await;
    let orphan = repo.require(ContentType::Proverb, "p2").await.unwrap();

    // The dangling language code collapsed to the unknown sentinel and the
    // missing translation renders as the sentinel string, not null.
    let props = to_display_props(&orphan);
    assert_eq!(props.language_name, "Unknown Language");
    assert_eq!(props.language_code, "unknown");
    assert_eq!(props.translation, NOT_PROVIDED);
    assert_eq!(props.detail_path, "/proverb/p2");
}

#[tokio::test]
async fn related_items_share_type_and_language() {
    let repo = seeded_repo().await;
    let related = repo
        .fetch_related(ContentType::Idiom, "nl", "i1", 5)
        .await
        .unwrap();

    assert_eq!(related.len(), 1);
    assert_eq!(related[0].id, "i3");
    assert_eq!(related[0].language.code, "nl");
}

#[tokio::test]
async fn every_content_type_loads() {
    let repo = seeded_repo().await;
    for ct in ContentType::ALL {
        let items = repo.fetch_all(ct, &FetchOptions::default()).await.unwrap();
        assert!(!items.is_empty(), "{ct} collection is empty");
        for item in &items {
            assert!(!item.original.is_empty(), "{ct} item has empty original");
            assert!(!item.language.code.is_empty());
        }
    }
}
