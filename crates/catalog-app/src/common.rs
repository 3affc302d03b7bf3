use catalog_dal::{SearchInput, SearchOrder, SearchOutput, DEFAULT_PER_PAGE};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const MAX_PER_PAGE: u32 = 1000;

/// Listing request, shared by categories and genres.
#[derive(Debug, Clone, PartialEq, Validate, Deserialize)]
#[serde(default)]
pub struct ListInput {
    #[garde(range(min = 1))]
    pub page: u32,
    #[garde(range(min = 1, max = MAX_PER_PAGE))]
    pub per_page: u32,
    #[garde(length(max = 255))]
    pub search: String,
    #[garde(length(max = 255))]
    pub sort: String,
    #[garde(skip)]
    pub dir: SearchOrder,
}

impl Default for ListInput {
    fn default() -> Self {
        ListInput {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
            sort: String::new(),
            dir: SearchOrder::Asc,
        }
    }
}

impl ListInput {
    pub fn into_search_input(self) -> Result<SearchInput> {
        self.validate()?;
        Ok(SearchInput::new(
            self.page,
            self.per_page,
            self.search,
            self.sort,
            self.dir,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedListOutput<T> {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> From<SearchOutput<T>> for PaginatedListOutput<T> {
    fn from(output: SearchOutput<T>) -> Self {
        PaginatedListOutput {
            page: output.current_page,
            per_page: output.per_page,
            total: output.total,
            items: output.items,
        }
    }
}
