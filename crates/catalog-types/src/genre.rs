use garde::Validate;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::validation;
use crate::ValidationError;

fn genre_name(value: &str, _ctx: &()) -> garde::Result {
    validation::not_null_or_empty(value, "Name")
}

/// Genre aggregate. It only references categories by id.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Genre {
    #[garde(skip)]
    id: Uuid,
    #[garde(custom(genre_name))]
    name: String,
    #[garde(skip)]
    is_active: bool,
    #[garde(skip)]
    created_at: OffsetDateTime,
    // insertion ordered, never contains duplicates
    #[garde(skip)]
    categories: Vec<Uuid>,
}

impl Genre {
    pub fn new(name: impl Into<String>, is_active: bool) -> Result<Self, ValidationError> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: name.into(),
            is_active,
            created_at: OffsetDateTime::now_utc(),
            categories: Vec::new(),
        };
        genre.validate()?;
        Ok(genre)
    }

    /// Rebuilds a genre loaded from storage, categories are attached separately.
    pub fn restore(id: Uuid, name: String, is_active: bool, created_at: OffsetDateTime) -> Self {
        Genre {
            id,
            name,
            is_active,
            created_at,
            categories: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn categories(&self) -> &[Uuid] {
        &self.categories
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn update(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        genre_name(&name, &()).map_err(|e| ValidationError::new(e.message()))?;
        self.name = name;
        Ok(())
    }

    pub fn add_category(&mut self, category_id: Uuid) {
        if !self.categories.contains(&category_id) {
            self.categories.push(category_id);
        }
    }

    /// Removing an id which is not present is a no-op.
    pub fn remove_category(&mut self, category_id: Uuid) {
        self.categories.retain(|id| *id != category_id);
    }

    pub fn remove_all_categories(&mut self) {
        self.categories.clear();
    }
}
