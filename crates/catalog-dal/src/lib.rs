pub mod category;
pub mod error;
pub mod genre;
pub mod session;

use std::{fmt::Display, future::Future, str::FromStr};

pub use error::Error;
pub use session::UnitOfWork;
pub use sqlx::Error as SqlxError;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio_util::sync::CancellationToken;

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type ChosenRow = sqlx::sqlite::SqliteRow;
pub type ChosenConnection = sqlx::SqliteConnection;
pub type Pool = sqlx::Pool<ChosenDB>;

pub const DEFAULT_PER_PAGE: u32 = 15;

/// Max ids bound in one `IN (...)` list, longer lists are queried in chunks.
pub(crate) const IDS_CHUNK: usize = 500;

/// Case folded name, stored in `name_search` and matched by the name filter.
pub(crate) fn search_key(name: &str) -> String {
    name.to_lowercase()
}

pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &Pool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// Runs a database call unless the token fires first.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, operation: F) -> Result<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = operation => Ok(result?),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SearchOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SearchOrder::Asc),
            "desc" => Ok(SearchOrder::Desc),
            other => Err(format!("Invalid search order: {other}")),
        }
    }
}

impl Display for SearchOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchOrder::Asc => write!(f, "asc"),
            SearchOrder::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone)]
enum Order {
    Asc(&'static str),
    Desc(&'static str),
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc(s) => write!(f, "{}", s),
            Order::Desc(s) => write!(f, "{} DESC", s),
        }
    }
}

/// Page request shared by all searchable repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub order_by: String,
    pub order: SearchOrder,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
            order_by: String::new(),
            order: SearchOrder::Asc,
        }
    }
}

impl SearchInput {
    pub fn new(
        page: u32,
        per_page: u32,
        search: impl Into<String>,
        order_by: impl Into<String>,
        order: SearchOrder,
    ) -> Self {
        Self {
            page,
            per_page,
            search: search.into(),
            order_by: order_by.into(),
            order,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_order(mut self, order_by: impl Into<String>, order: SearchOrder) -> Self {
        self.order_by = order_by.into();
        self.order = order;
        self
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// ORDER BY clause, always ending with the id so that equal keys page deterministically.
    pub fn ordering(&self) -> String {
        let columns: &[&'static str] = match self.order_by.to_lowercase().as_str() {
            "name" => &["name", "id"],
            "id" => &["id"],
            "createdat" => &["created_at", "id"],
            _ => return "name, id".to_string(),
        };
        columns
            .iter()
            .map(|column| match self.order {
                SearchOrder::Asc => Order::Asc(*column),
                SearchOrder::Desc => Order::Desc(*column),
            })
            .map(|o| o.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// LIKE pattern for the case folded name filter, `None` when the search text is blank.
    pub fn name_pattern(&self) -> Option<String> {
        if self.search.trim().is_empty() {
            return None;
        }
        let search = search_key(&self.search);
        let mut pattern = String::with_capacity(search.len() + 2);
        pattern.push('%');
        for c in search.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutput<T> {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> SearchOutput<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchOutput<U> {
        SearchOutput {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Counts all rows matching the filter and loads one ordered page of them.
pub(crate) async fn search_rows<R>(
    conn: &mut ChosenConnection,
    cancel: &CancellationToken,
    table: &str,
    columns: &str,
    input: &SearchInput,
) -> Result<(Vec<R>, u64)>
where
    R: for<'r> sqlx::FromRow<'r, ChosenRow> + Send + Unpin,
{
    let pattern = input.name_pattern();
    let filter = if pattern.is_some() {
        r"WHERE name_search LIKE ? ESCAPE '\'"
    } else {
        ""
    };

    let count_sql = format!("SELECT count(*) FROM {table} {filter}");
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(pattern) = pattern.clone() {
        count_query = count_query.bind(pattern);
    }
    let total = cancellable(cancel, count_query.fetch_one(&mut *conn)).await?;

    let page_sql = format!(
        "SELECT {columns} FROM {table} {filter} ORDER BY {} LIMIT ? OFFSET ?",
        input.ordering()
    );
    let mut page_query = sqlx::query_as::<_, R>(&page_sql);
    if let Some(pattern) = pattern {
        page_query = page_query.bind(pattern);
    }
    let rows = cancellable(
        cancel,
        page_query
            .bind(input.limit())
            .bind(input.offset())
            .fetch_all(&mut *conn),
    )
    .await?;

    Ok((rows, total.max(0) as u64))
}
