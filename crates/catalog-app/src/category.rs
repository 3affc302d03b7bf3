use catalog_dal::{Pool, UnitOfWork};
use catalog_types::{validation::not_null, Category};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    common::{ListInput, PaginatedListOutput},
    error::Result,
    use_case::UseCase,
};

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryModelOutput {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&Category> for CategoryModelOutput {
    fn from(category: &Category) -> Self {
        CategoryModelOutput {
            id: category.id(),
            name: category.name().to_string(),
            description: category.description().to_string(),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

pub struct CreateCategory {
    pool: Pool,
}

impl CreateCategory {
    pub fn new(pool: Pool) -> Self {
        CreateCategory { pool }
    }
}

impl UseCase for CreateCategory {
    type Input = CreateCategoryInput;
    type Output = CategoryModelOutput;

    #[instrument(skip_all, fields(name = %input.name))]
    async fn handle(
        &self,
        input: CreateCategoryInput,
        cancel: CancellationToken,
    ) -> Result<CategoryModelOutput> {
        let description = not_null(input.description, "Description")?;
        let category = Category::new(input.name, description, input.is_active)?;

        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        uow.categories().insert(&category).await?;
        uow.commit().await?;
        info!(id = %category.id(), "Created category");
        Ok(CategoryModelOutput::from(&category))
    }
}

pub struct GetCategory {
    pool: Pool,
}

impl GetCategory {
    pub fn new(pool: Pool) -> Self {
        GetCategory { pool }
    }
}

impl UseCase for GetCategory {
    type Input = Uuid;
    type Output = CategoryModelOutput;

    #[instrument(skip(self, cancel))]
    async fn handle(&self, id: Uuid, cancel: CancellationToken) -> Result<CategoryModelOutput> {
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let category = uow.categories().get(id).await?;
        Ok(CategoryModelOutput::from(&category))
    }
}

/// Name is always replaced, missing description and activity keep their values.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategoryInput {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct UpdateCategory {
    pool: Pool,
}

impl UpdateCategory {
    pub fn new(pool: Pool) -> Self {
        UpdateCategory { pool }
    }
}

impl UseCase for UpdateCategory {
    type Input = UpdateCategoryInput;
    type Output = CategoryModelOutput;

    #[instrument(skip_all, fields(id = %input.id))]
    async fn handle(
        &self,
        input: UpdateCategoryInput,
        cancel: CancellationToken,
    ) -> Result<CategoryModelOutput> {
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let mut category = uow.categories().get(input.id).await?;
        category.update(input.name, input.description)?;
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }
        uow.categories().update(&category).await?;
        uow.commit().await?;
        info!("Updated category");
        Ok(CategoryModelOutput::from(&category))
    }
}

pub struct DeleteCategory {
    pool: Pool,
}

impl DeleteCategory {
    pub fn new(pool: Pool) -> Self {
        DeleteCategory { pool }
    }
}

impl UseCase for DeleteCategory {
    type Input = Uuid;
    type Output = ();

    #[instrument(skip(self, cancel))]
    async fn handle(&self, id: Uuid, cancel: CancellationToken) -> Result<()> {
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let category = uow.categories().get(id).await?;
        uow.categories().delete(&category).await?;
        uow.commit().await?;
        info!("Deleted category");
        Ok(())
    }
}

pub struct ListCategories {
    pool: Pool,
}

impl ListCategories {
    pub fn new(pool: Pool) -> Self {
        ListCategories { pool }
    }
}

impl UseCase for ListCategories {
    type Input = ListInput;
    type Output = PaginatedListOutput<CategoryModelOutput>;

    #[instrument(skip(self, cancel))]
    async fn handle(
        &self,
        input: ListInput,
        cancel: CancellationToken,
    ) -> Result<PaginatedListOutput<CategoryModelOutput>> {
        let search = input.into_search_input()?;
        let mut uow = UnitOfWork::begin(&self.pool, cancel).await?;
        let output = uow.categories().search(&search).await?;
        Ok(output.map(|c| CategoryModelOutput::from(&c)).into())
    }
}
