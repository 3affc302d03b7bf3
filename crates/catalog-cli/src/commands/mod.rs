pub mod category;
pub mod genre;

use catalog_app::common::ListInput;
use catalog_dal::{Pool, SearchOrder, DEFAULT_PER_PAGE};
use clap::Args;
use tokio_util::sync::CancellationToken;

pub struct Context {
    pub pool: Pool,
    pub cancel: CancellationToken,
}

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self, context: &Context) -> anyhow::Result<serde_json::Value>;
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "Page number, starting from 1")]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PER_PAGE, help = "Number of items per page, at most 1000")]
    per_page: u32,
    #[arg(short, long, default_value = "", help = "Only items with name containing this text")]
    search: String,
    #[arg(long, default_value = "", help = "Sort by name, id or createdAt, default is name")]
    sort: String,
    #[arg(long, default_value_t = SearchOrder::Asc, help = "Sort direction asc or desc")]
    dir: SearchOrder,
}

impl From<ListArgs> for ListInput {
    fn from(args: ListArgs) -> Self {
        ListInput {
            page: args.page,
            per_page: args.per_page,
            search: args.search,
            sort: args.sort,
            dir: args.dir,
        }
    }
}
