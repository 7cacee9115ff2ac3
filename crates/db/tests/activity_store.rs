//! Integration tests for the Postgres activity store.
//!
//! Exercises the write paths the worker pools depend on:
//! - favourite insert guarded by `uq_favourites_user_cartoon`
//! - transactional favourite removal (present and absent pairs)
//! - view inserts and counts
//! - ordered cartoon hydration for recently-viewed ids

#![cfg(feature = "db-tests")]

use chrono::Utc;
use sqlx::PgPool;
use toonshelf_core::error::StoreError;
use toonshelf_core::store::{FavouriteStore, ViewStore};
use toonshelf_db::models::cartoon::CreateCartoon;
use toonshelf_db::repositories::favourite_repo::UNIQUE_CONSTRAINT;
use toonshelf_db::repositories::{CartoonRepo, FavouriteRepo, ViewRepo};
use toonshelf_db::PgActivityStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_cartoon(pool: &PgPool, title: &str) -> i64 {
    CartoonRepo::create(
        pool,
        &CreateCartoon {
            title: title.to_string(),
            description: None,
            poster_url: None,
            release_year: Some(1940),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Test: duplicate favourite insert reports a unique violation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_favourite_is_unique_violation(pool: PgPool) {
    let cartoon_id = seed_cartoon(&pool, "Fantasia").await;
    let store = PgActivityStore::new(pool.clone());

    store.insert_favourite(1, cartoon_id).await.unwrap();
    let err = store.insert_favourite(1, cartoon_id).await.unwrap_err();

    assert_eq!(
        err,
        StoreError::UniqueViolation {
            constraint: UNIQUE_CONSTRAINT.to_string()
        }
    );
    assert_eq!(
        FavouriteRepo::count_for_pair(&pool, 1, cartoon_id).await.unwrap(),
        1
    );
}

// ---------------------------------------------------------------------------
// Test: remove deletes an existing row and is a no-op for an absent one
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn remove_is_idempotent(pool: PgPool) {
    let cartoon_id = seed_cartoon(&pool, "Dumbo").await;
    let store = PgActivityStore::new(pool.clone());

    assert!(!store.remove_favourite(2, cartoon_id).await.unwrap());

    store.insert_favourite(2, cartoon_id).await.unwrap();
    assert!(store.remove_favourite(2, cartoon_id).await.unwrap());
    assert!(!store.remove_favourite(2, cartoon_id).await.unwrap());

    assert!(FavouriteRepo::find(&pool, 2, cartoon_id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: favourite for a missing cartoon is a backend error, not a duplicate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn favourite_for_missing_cartoon_is_backend_error(pool: PgPool) {
    let store = PgActivityStore::new(pool);
    let err = store.insert_favourite(3, 999_999).await.unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
}

// ---------------------------------------------------------------------------
// Test: views are appended and counted per cartoon
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn views_are_counted(pool: PgPool) {
    let cartoon_id = seed_cartoon(&pool, "Bambi").await;
    let other_id = seed_cartoon(&pool, "Pinocchio").await;
    let store = PgActivityStore::new(pool.clone());

    store.insert_view(cartoon_id, 1, Utc::now()).await.unwrap();
    store.insert_view(cartoon_id, 1, Utc::now()).await.unwrap();
    store.insert_view(other_id, 2, Utc::now()).await.unwrap();

    assert_eq!(ViewRepo::count_for_cartoon(&pool, cartoon_id).await.unwrap(), 2);
    assert_eq!(ViewRepo::count_for_cartoon(&pool, other_id).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: ordered hydration keeps the caller's id order and skips unknown ids
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn find_many_ordered_preserves_order(pool: PgPool) {
    let a = seed_cartoon(&pool, "A").await;
    let b = seed_cartoon(&pool, "B").await;
    let c = seed_cartoon(&pool, "C").await;

    let found = CartoonRepo::find_many_ordered(&pool, &[c, 424_242, a, b])
        .await
        .unwrap();
    let ids: Vec<i64> = found.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![c, a, b]);

    assert!(CartoonRepo::exists(&pool, a).await.unwrap());
    assert!(!CartoonRepo::exists(&pool, 424_242).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: single lookup returns the seeded row or nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn find_by_id_returns_seeded_cartoon(pool: PgPool) {
    let id = seed_cartoon(&pool, "Cinderella").await;

    let cartoon = CartoonRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(cartoon.title, "Cinderella");
    assert_eq!(cartoon.release_year, Some(1940));
    assert!(!cartoon.is_featured);

    assert!(CartoonRepo::find_by_id(&pool, 424_242).await.unwrap().is_none());
}
