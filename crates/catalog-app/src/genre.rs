use std::collections::{HashMap, HashSet};

use catalog_dal::{Pool, UnitOfWork};
use catalog_types::Genre;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    common::{ListInput, PaginatedListOutput},
    error::{Error, Result},
    use_case::UseCase,
};

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCategoryOutput {
    pub id: Uuid,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreModelOutput {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub categories: Vec<GenreCategoryOutput>,
}

impl From<&Genre> for GenreModelOutput {
    fn from(genre: &Genre) -> Self {
        GenreModelOutput {
            id: genre.id(),
            name: genre.name().to_string(),
            is_active: genre.is_active(),
            created_at: genre.created_at(),
            categories: genre
                .categories()
                .iter()
                .map(|id| GenreCategoryOutput { id: *id, name: None })
                .collect(),
        }
    }
}

impl GenreModelOutput {
    /// Fills in category names, ids missing from `names` stay without a name.
    fn fill_category_names(&mut self, names: &HashMap<Uuid, String>) {
        for category in self.categories.iter_mut() {
            category.name = names.get(&category.id).cloned();
        }
    }
}

/// Fails with all requested category ids which do not exist, in request order.
async fn validate_categories_ids(uow: &mut UnitOfWork, ids: &[Uuid]) -> Result<()> {
    let existing: HashSet<Uuid> = uow
        .categories()
        .get_ids_list_by_ids(ids)
        .await?
        .into_iter()
        .collect();

    let mut seen = HashSet::new();
    let not_found: Vec<Uuid> = ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id) && seen.insert(*id))
        .collect();

    if not_found.is_empty() {
        Ok(())
    } else {
        let ids = not_found
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::RelatedAggregate(format!(
            "Related category id (or ids) not found: {ids}"
        )))
    }
}

/// Names of all categories referenced by given genres. Best effort, unknown ids are skipped.
async fn category_names(uow: &mut UnitOfWork, genres: &[Genre]) -> Result<HashMap<Uuid, String>> {
    let mut seen = HashSet::new();
    let ids: Vec<Uuid> = genres
        .iter()
        .flat_map(|g| g.categories())
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();
    let categories = uow.categories().get_list_by_ids(&ids).await?;
    if categories.len() < ids.len() {
        debug!(
            requested = ids.len(),
            found = categories.len(),
            "Some related categories are missing"
        );
    }
    Ok(categories
        .into_iter()
        .map(|c| (c.id(), c.name().to_string()))
        .collect())
}

fn replace_categories(genre: &mut Genre, ids: &[Uuid]) {
    genre.remove_all_categories();
    for id in ids {
        genre.add_category(*id);
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenreInput {
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub categories_ids: Option<Vec<Uuid>>,
}

pub struct CreateGenre {
    pool: Pool,
}

impl CreateGenre {
    pub fn new(pool: Pool) -> Self {
        CreateGenre { pool }
    }
}

impl UseCase for CreateGenre {
    type Input = CreateGenreInput;
    type Output = GenreModelOutput;

    #[instrument(skip_all, fields(name = %input.name))]
    async fn handle(
        &self,
        input: CreateGenreInput,
        cancel: CancellationToken,
    ) -> Result<GenreModelOutput> {
        let mut genre = Genre::new(input.name, input.is_active)?;

        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        if let Some(ids) = input.categories_ids.filter(|ids| !ids.is_empty()) {
            validate_categories_ids(&mut uow, &ids).await?;
            replace_categories(&mut genre, &ids);
        }
        uow.genres().insert(&genre).await?;
        uow.commit().await?;
        info!(id = %genre.id(), categories = genre.categories().len(), "Created genre");
        Ok(GenreModelOutput::from(&genre))
    }
}

pub struct GetGenre {
    pool: Pool,
}

impl GetGenre {
    pub fn new(pool: Pool) -> Self {
        GetGenre { pool }
    }
}

impl UseCase for GetGenre {
    type Input = Uuid;
    type Output = GenreModelOutput;

    #[instrument(skip(self, cancel))]
    async fn handle(&self, id: Uuid, cancel: CancellationToken) -> Result<GenreModelOutput> {
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let genre = uow.genres().get(id).await?;
        let names = category_names(&mut uow, std::slice::from_ref(&genre)).await?;
        let mut output = GenreModelOutput::from(&genre);
        output.fill_category_names(&names);
        Ok(output)
    }
}

/// `categories_ids` of `None` keeps current relations, an empty list removes them all.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGenreInput {
    pub id: Uuid,
    pub name: String,
    pub is_active: Option<bool>,
    pub categories_ids: Option<Vec<Uuid>>,
}

pub struct UpdateGenre {
    pool: Pool,
}

impl UpdateGenre {
    pub fn new(pool: Pool) -> Self {
        UpdateGenre { pool }
    }
}

impl UseCase for UpdateGenre {
    type Input = UpdateGenreInput;
    type Output = GenreModelOutput;

    #[instrument(skip_all, fields(id = %input.id))]
    async fn handle(
        &self,
        input: UpdateGenreInput,
        cancel: CancellationToken,
    ) -> Result<GenreModelOutput> {
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let mut genre = uow.genres().get(input.id).await?;
        genre.update(input.name)?;
        match input.is_active {
            Some(true) => genre.activate(),
            Some(false) => genre.deactivate(),
            None => {}
        }
        if let Some(ids) = input.categories_ids {
            if !ids.is_empty() {
                validate_categories_ids(&mut uow, &ids).await?;
            }
            replace_categories(&mut genre, &ids);
        }
        uow.genres().update(&genre).await?;
        uow.commit().await?;
        info!(categories = genre.categories().len(), "Updated genre");
        Ok(GenreModelOutput::from(&genre))
    }
}

pub struct DeleteGenre {
    pool: Pool,
}

impl DeleteGenre {
    pub fn new(pool: Pool) -> Self {
        DeleteGenre { pool }
    }
}

impl UseCase for DeleteGenre {
    type Input = Uuid;
    type Output = ();

    #[instrument(skip(self, cancel))]
    async fn handle(&self, id: Uuid, cancel: CancellationToken) -> Result<()> {
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let genre = uow.genres().get(id).await?;
        uow.genres().delete(&genre).await?;
        uow.commit().await?;
        info!("Deleted genre");
        Ok(())
    }
}

pub struct ListGenres {
    pool: Pool,
}

impl ListGenres {
    pub fn new(pool: Pool) -> Self {
        ListGenres { pool }
    }
}

impl UseCase for ListGenres {
    type Input = ListInput;
    type Output = PaginatedListOutput<GenreModelOutput>;

    #[instrument(skip(self, cancel))]
    async fn handle(
        &self,
        input: ListInput,
        cancel: CancellationToken,
    ) -> Result<PaginatedListOutput<GenreModelOutput>> {
        let search = input.into_search_input()?;
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let output = uow.genres().search(&search).await?;
        let names = category_names(&mut uow, &output.items).await?;
        Ok(output
            .map(|genre| {
                let mut item = GenreModelOutput::from(&genre);
                item.fill_category_names(&names);
                item
            })
            .into())
    }
}
