#![allow(dead_code)]

use catalog_dal::{Pool, UnitOfWork};
use catalog_types::{Category, Genre};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub async fn init_db() -> Pool {
    const DB_URL: &str = "sqlite::memory:";
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(DB_URL)
        .await
        .unwrap();
    catalog_dal::migrate(&pool).await.unwrap();
    pool
}

pub async fn session(pool: &Pool) -> UnitOfWork {
    UnitOfWork::begin(pool, CancellationToken::new())
        .await
        .unwrap()
}

/// Category with a fixed creation time, `second` apart from the unix epoch.
pub fn category_at(name: &str, second: i64) -> Category {
    Category::restore(
        Uuid::new_v4(),
        name.to_string(),
        format!("{name} description"),
        true,
        OffsetDateTime::from_unix_timestamp(second).unwrap(),
    )
}

pub async fn insert_categories(pool: &Pool, names: &[&str]) -> Vec<Category> {
    let mut uow = session(pool).await;
    let mut categories = Vec::new();
    for name in names {
        let category = Category::new(*name, "", true).unwrap();
        uow.categories().insert(&category).await.unwrap();
        categories.push(category);
    }
    uow.commit().await.unwrap();
    categories
}

pub async fn insert_genres(pool: &Pool, names: &[&str]) -> Vec<Genre> {
    let mut uow = session(pool).await;
    let mut genres = Vec::new();
    for name in names {
        let genre = Genre::new(*name, true).unwrap();
        uow.genres().insert(&genre).await.unwrap();
        genres.push(genre);
    }
    uow.commit().await.unwrap();
    genres
}
