//! Smoke test against a live PostgreSQL instance.
//!
//! Requires a migrated test database; set `DATABASE_URL` or run the default
//! test instance on port 15432. Run with `cargo test -- --ignored`.

use sayingly_db::test_fixtures::DEFAULT_TEST_DATABASE_URL;
use sayingly_db::{Catalog, ContentType, FetchOptions};

#[tokio::test]
#[ignore]
async fn pg_fetch_all_round_trip() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string());

    let catalog = Catalog::connect(&url).await?;
    for ct in ContentType::ALL {
        let items = catalog
            .content
            .fetch_all(ct, &FetchOptions::default())
            .await?;
        for item in &items {
            assert!(!item.language.code.is_empty());
        }
    }
    Ok(())
}
