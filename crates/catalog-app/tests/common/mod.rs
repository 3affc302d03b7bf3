#![allow(dead_code)]

use catalog_app::{
    category::{CategoryModelOutput, CreateCategory, CreateCategoryInput},
    genre::{CreateGenre, CreateGenreInput, GenreModelOutput},
    UseCase,
};
use catalog_dal::Pool;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub async fn init_db() -> Pool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    catalog_dal::migrate(&pool).await.unwrap();
    pool
}

pub async fn create_category(pool: &Pool, name: &str) -> CategoryModelOutput {
    CreateCategory::new(pool.clone())
        .handle(
            CreateCategoryInput {
                name: name.to_string(),
                description: Some(format!("All about {name}")),
                is_active: true,
            },
            CancellationToken::new(),
        )
        .await
        .unwrap()
}

pub async fn create_genre(pool: &Pool, name: &str, categories: &[Uuid]) -> GenreModelOutput {
    CreateGenre::new(pool.clone())
        .handle(
            CreateGenreInput {
                name: name.to_string(),
                is_active: true,
                categories_ids: Some(categories.to_vec()),
            },
            CancellationToken::new(),
        )
        .await
        .unwrap()
}
