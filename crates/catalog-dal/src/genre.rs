use std::collections::HashMap;

use catalog_types::Genre;
use futures::TryStreamExt as _;
use sqlx::QueryBuilder;
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::{
    cancellable,
    error::{Error, Result},
    search_key, search_rows, ChosenConnection, ChosenDB, SearchInput, SearchOutput, IDS_CHUNK,
};

const TABLE: &str = "genres";
const COLUMNS: &str = "id, name, is_active, created_at";

#[derive(Debug, sqlx::FromRow)]
struct GenreRow {
    id: Uuid,
    name: String,
    is_active: bool,
    created_at: OffsetDateTime,
}

impl From<GenreRow> for Genre {
    fn from(row: GenreRow) -> Self {
        Genre::restore(row.id, row.name, row.is_active, row.created_at)
    }
}

/// Category ids related to each genre, in the order the relations were stored.
type Relations = HashMap<Uuid, Vec<Uuid>>;

fn attach(genre: &mut Genre, relations: &mut Relations) {
    if let Some(categories) = relations.remove(&genre.id()) {
        for category_id in categories {
            genre.add_category(category_id);
        }
    }
}

/// Genre storage. Relation rows in `genres_categories` are owned by the genre
/// and rewritten together with it.
pub struct GenreRepository<'c> {
    conn: &'c mut ChosenConnection,
    cancel: &'c CancellationToken,
}

impl<'c> GenreRepository<'c> {
    pub fn new(conn: &'c mut ChosenConnection, cancel: &'c CancellationToken) -> Self {
        GenreRepository { conn, cancel }
    }

    pub async fn insert(&mut self, genre: &Genre) -> Result<()> {
        let query = sqlx::query(
            "INSERT INTO genres (id, name, name_search, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(genre.id())
        .bind(genre.name())
        .bind(search_key(genre.name()))
        .bind(genre.is_active())
        .bind(genre.created_at());
        cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        self.insert_relations(genre).await?;
        debug!(id = %genre.id(), name = genre.name(), categories = genre.categories().len(), "Inserted genre");
        Ok(())
    }

    pub async fn get(&mut self, id: Uuid) -> Result<Genre> {
        let query = sqlx::query_as::<_, GenreRow>(
            "SELECT id, name, is_active, created_at FROM genres WHERE id = ?",
        )
        .bind(id);
        let mut genre = cancellable(self.cancel, query.fetch_optional(&mut *self.conn))
            .await?
            .map(Genre::from)
            .ok_or_else(|| Error::not_found("Genre", id))?;

        let mut relations = self.load_relations(&[id]).await?;
        attach(&mut genre, &mut relations);
        Ok(genre)
    }

    /// Updates the genre row and replaces all its relations with the current categories.
    pub async fn update(&mut self, genre: &Genre) -> Result<()> {
        let query =
            sqlx::query("UPDATE genres SET name = ?, name_search = ?, is_active = ? WHERE id = ?")
                .bind(genre.name())
                .bind(search_key(genre.name()))
                .bind(genre.is_active())
                .bind(genre.id());
        let result = cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Genre", genre.id()));
        }
        self.delete_relations(genre.id()).await?;
        self.insert_relations(genre).await?;
        debug!(id = %genre.id(), categories = genre.categories().len(), "Updated genre");
        Ok(())
    }

    pub async fn delete(&mut self, genre: &Genre) -> Result<()> {
        self.delete_relations(genre.id()).await?;
        let query = sqlx::query("DELETE FROM genres WHERE id = ?").bind(genre.id());
        let result = cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Genre", genre.id()));
        }
        debug!(id = %genre.id(), "Deleted genre");
        Ok(())
    }

    /// Page of genres with their categories, loaded with one relation query per page.
    pub async fn search(&mut self, input: &SearchInput) -> Result<SearchOutput<Genre>> {
        let (mut genres, total) = self.load_page(input).await?;
        let ids: Vec<Uuid> = genres.iter().map(Genre::id).collect();
        let mut relations = self.load_relations(&ids).await?;
        for genre in genres.iter_mut() {
            attach(genre, &mut relations);
        }
        Ok(SearchOutput {
            current_page: input.page,
            per_page: input.per_page,
            total,
            items: genres,
        })
    }

    async fn load_page(&mut self, input: &SearchInput) -> Result<(Vec<Genre>, u64)> {
        let (rows, total) =
            search_rows::<GenreRow>(&mut *self.conn, self.cancel, TABLE, COLUMNS, input).await?;
        Ok((rows.into_iter().map(Genre::from).collect(), total))
    }

    async fn load_relations(&mut self, genre_ids: &[Uuid]) -> Result<Relations> {
        let mut relations = Relations::new();
        for chunk in genre_ids.chunks(IDS_CHUNK) {
            let mut query = QueryBuilder::<ChosenDB>::new(
                "SELECT genre_id, category_id FROM genres_categories WHERE genre_id IN (",
            );
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(") ORDER BY rowid");

            let rows = cancellable(
                self.cancel,
                query
                    .build_query_as::<(Uuid, Uuid)>()
                    .fetch(&mut *self.conn)
                    .try_collect::<Vec<_>>(),
            )
            .await?;

            for (genre_id, category_id) in rows {
                relations.entry(genre_id).or_default().push(category_id);
            }
        }
        Ok(relations)
    }

    async fn insert_relations(&mut self, genre: &Genre) -> Result<()> {
        for chunk in genre.categories().chunks(IDS_CHUNK) {
            let mut query = QueryBuilder::<ChosenDB>::new(
                "INSERT INTO genres_categories (category_id, genre_id) ",
            );
            query.push_values(chunk, |mut row, category_id| {
                row.push_bind(*category_id).push_bind(genre.id());
            });
            cancellable(self.cancel, query.build().execute(&mut *self.conn)).await?;
        }
        Ok(())
    }

    async fn delete_relations(&mut self, genre_id: Uuid) -> Result<()> {
        let query = sqlx::query("DELETE FROM genres_categories WHERE genre_id = ?").bind(genre_id);
        cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        Ok(())
    }
}
