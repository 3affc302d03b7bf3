use catalog_app::{
    genre::{
        CreateGenre, CreateGenreInput, DeleteGenre, GetGenre, ListGenres, UpdateGenre,
        UpdateGenreInput,
    },
    UseCase as _,
};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::{Context, Executor, ListArgs};

#[derive(Parser, Debug)]
pub struct GenreCmd {
    #[command(subcommand)]
    action: GenreAction,
}

#[derive(Subcommand, Debug)]
enum GenreAction {
    /// Creates new genre
    Create {
        #[arg(short, long, help = "Genre name")]
        name: String,
        #[arg(long, help = "Create the genre as inactive")]
        inactive: bool,
        #[arg(short, long, help = "Id of related category, can be used multiple times")]
        category: Vec<Uuid>,
    },
    /// Shows one genre with names of its categories
    Get { id: Uuid },
    /// Renames genre, optionally changes activity and categories
    Update {
        id: Uuid,
        #[arg(short, long, help = "New genre name")]
        name: String,
        #[arg(long, help = "true to activate, false to deactivate")]
        active: Option<bool>,
        #[arg(
            short,
            long,
            help = "Id of related category, can be used multiple times, replaces current categories"
        )]
        category: Vec<Uuid>,
        #[arg(long, conflicts_with = "category", help = "Removes all categories from the genre")]
        clear_categories: bool,
    },
    /// Deletes genre
    Delete { id: Uuid },
    /// Lists genres page by page
    List(ListArgs),
}

impl Executor for GenreCmd {
    async fn run(self, context: &Context) -> anyhow::Result<serde_json::Value> {
        let pool = context.pool.clone();
        let cancel = context.cancel.clone();
        let output = match self.action {
            GenreAction::Create {
                name,
                inactive,
                category,
            } => {
                let input = CreateGenreInput {
                    name,
                    is_active: !inactive,
                    categories_ids: Some(category),
                };
                serde_json::to_value(CreateGenre::new(pool).handle(input, cancel).await?)?
            }
            GenreAction::Get { id } => {
                serde_json::to_value(GetGenre::new(pool).handle(id, cancel).await?)?
            }
            GenreAction::Update {
                id,
                name,
                active,
                category,
                clear_categories,
            } => {
                let categories_ids = if clear_categories {
                    Some(Vec::new())
                } else if category.is_empty() {
                    None
                } else {
                    Some(category)
                };
                let input = UpdateGenreInput {
                    id,
                    name,
                    is_active: active,
                    categories_ids,
                };
                serde_json::to_value(UpdateGenre::new(pool).handle(input, cancel).await?)?
            }
            GenreAction::Delete { id } => {
                DeleteGenre::new(pool).handle(id, cancel).await?;
                serde_json::json!({ "deleted": id })
            }
            GenreAction::List(args) => {
                serde_json::to_value(ListGenres::new(pool).handle(args.into(), cancel).await?)?
            }
        };
        Ok(output)
    }
}
