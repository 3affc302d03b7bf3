use catalog_types::Category;
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

const TABLE: &str = "categories";
const COLUMNS: &str = "id, name, description, is_active, created_at";

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    description: String,
    is_active: bool,
    created_at: OffsetDateTime,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::restore(
            row.id,
            row.name,
            row.description,
            row.is_active,
            row.created_at,
        )
    }
}

pub struct CategoryRepository<'c> {
    conn: &'c mut ChosenConnection,
    cancel: &'c CancellationToken,
}

impl<'c> CategoryRepository<'c> {
    pub fn new(conn: &'c mut ChosenConnection, cancel: &'c CancellationToken) -> Self {
        CategoryRepository { conn, cancel }
    }

    pub async fn insert(&mut self, category: &Category) -> Result<()> {
        let query = sqlx::query(
            "INSERT INTO categories (id, name, name_search, description, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(category.id())
        .bind(category.name())
        .bind(search_key(category.name()))
        .bind(category.description())
        .bind(category.is_active())
        .bind(category.created_at());
        cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        debug!(id = %category.id(), name = category.name(), "Inserted category");
        Ok(())
    }

    pub async fn get(&mut self, id: Uuid) -> Result<Category> {
        let query = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, is_active, created_at FROM categories WHERE id = ?",
        )
        .bind(id);
        cancellable(self.cancel, query.fetch_optional(&mut *self.conn))
            .await?
            .map(Category::from)
            .ok_or_else(|| Error::not_found("Category", id))
    }

    pub async fn update(&mut self, category: &Category) -> Result<()> {
        let query = sqlx::query(
            "UPDATE categories SET name = ?, name_search = ?, description = ?, is_active = ? WHERE id = ?",
        )
        .bind(category.name())
        .bind(search_key(category.name()))
        .bind(category.description())
        .bind(category.is_active())
        .bind(category.id());
        let result = cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Category", category.id()));
        }
        debug!(id = %category.id(), "Updated category");
        Ok(())
    }

    pub async fn delete(&mut self, category: &Category) -> Result<()> {
        let query = sqlx::query("DELETE FROM categories WHERE id = ?").bind(category.id());
        let result = cancellable(self.cancel, query.execute(&mut *self.conn)).await?;
        if result.rows_affected() == 0 {
            return Err(Error::not_found("Category", category.id()));
        }
        debug!(id = %category.id(), "Deleted category");
        Ok(())
    }

    pub async fn search(&mut self, input: &SearchInput) -> Result<SearchOutput<Category>> {
        let (rows, total) =
            search_rows::<CategoryRow>(&mut *self.conn, self.cancel, TABLE, COLUMNS, input).await?;
        Ok(SearchOutput {
            current_page: input.page,
            per_page: input.per_page,
            total,
            items: rows.into_iter().map(Category::from).collect(),
        })
    }

    /// Categories with given ids ordered by name, unknown ids are skipped.
    pub async fn get_list_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<Category>> {
        let mut categories = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(IDS_CHUNK) {
            let mut query = QueryBuilder::<ChosenDB>::new(format!(
                "SELECT {COLUMNS} FROM {TABLE} WHERE id IN ("
            ));
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let rows = cancellable(
                self.cancel,
                query
                    .build_query_as::<CategoryRow>()
                    .fetch(&mut *self.conn)
                    .map_ok(Category::from)
                    .try_collect::<Vec<_>>(),
            )
            .await?;
            categories.extend(rows);
        }
        categories.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(categories)
    }

    /// Subset of given ids which exist in the store.
    pub async fn get_ids_list_by_ids(&mut self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        let mut found = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(IDS_CHUNK) {
            let mut query =
                QueryBuilder::<ChosenDB>::new("SELECT id FROM categories WHERE id IN (");
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let ids = cancellable(
                self.cancel,
                query
                    .build_query_scalar::<Uuid>()
                    .fetch_all(&mut *self.conn),
            )
            .await?;
            found.extend(ids);
        }
        Ok(found)
    }
}
