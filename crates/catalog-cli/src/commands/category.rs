use catalog_app::{
    category::{
        CreateCategory, CreateCategoryInput, DeleteCategory, GetCategory, ListCategories,
        UpdateCategory, UpdateCategoryInput,
    },
    UseCase as _,
};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::{Context, Executor, ListArgs};

#[derive(Parser, Debug)]
pub struct CategoryCmd {
    #[command(subcommand)]
    action: CategoryAction,
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    /// Creates new category
    Create {
        #[arg(short, long, help = "Category name, 3 to 255 characters")]
        name: String,
        #[arg(short, long, default_value = "", help = "Category description")]
        description: String,
        #[arg(long, help = "Create the category as inactive")]
        inactive: bool,
    },
    /// Shows one category
    Get { id: Uuid },
    /// Renames category, optionally changes description and activity
    Update {
        id: Uuid,
        #[arg(short, long, help = "New category name")]
        name: String,
        #[arg(short, long, help = "New description, current one is kept if not provided")]
        description: Option<String>,
        #[arg(long, help = "true to activate, false to deactivate")]
        active: Option<bool>,
    },
    /// Deletes category
    Delete { id: Uuid },
    /// Lists categories page by page
    List(ListArgs),
}

impl Executor for CategoryCmd {
    async fn run(self, context: &Context) -> anyhow::Result<serde_json::Value> {
        let pool = context.pool.clone();
        let cancel = context.cancel.clone();
        let output = match self.action {
            CategoryAction::Create {
                name,
                description,
                inactive,
            } => {
                let input = CreateCategoryInput {
                    name,
                    description: Some(description),
                    is_active: !inactive,
                };
                serde_json::to_value(CreateCategory::new(pool).handle(input, cancel).await?)?
            }
            CategoryAction::Get { id } => {
                serde_json::to_value(GetCategory::new(pool).handle(id, cancel).await?)?
            }
            CategoryAction::Update {
                id,
                name,
                description,
                active,
            } => {
                let input = UpdateCategoryInput {
                    id,
                    name,
                    description,
                    is_active: active,
                };
                serde_json::to_value(UpdateCategory::new(pool).handle(input, cancel).await?)?
            }
            CategoryAction::Delete { id } => {
                DeleteCategory::new(pool).handle(id, cancel).await?;
                serde_json::json!({ "deleted": id })
            }
            CategoryAction::List(args) => serde_json::to_value(
                ListCategories::new(pool)
                    .handle(args.into(), cancel)
                    .await?,
            )?,
        };
        Ok(output)
    }
}
