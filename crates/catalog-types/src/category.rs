use garde::Validate;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::validation::{self, DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH, NAME_MIN_LENGTH};
use crate::ValidationError;

fn category_name(value: &str, _ctx: &()) -> garde::Result {
    validation::not_null_or_empty(value, "Name")?;
    validation::min_length(value, NAME_MIN_LENGTH, "Name")?;
    validation::max_length(value, NAME_MAX_LENGTH, "Name")
}

fn category_description(value: &str, _ctx: &()) -> garde::Result {
    validation::max_length(value, DESCRIPTION_MAX_LENGTH, "Description")
}

/// Category aggregate. Every constructor and mutator leaves it valid.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Category {
    #[garde(skip)]
    id: Uuid,
    #[garde(custom(category_name))]
    name: String,
    #[garde(custom(category_description))]
    description: String,
    #[garde(skip)]
    is_active: bool,
    #[garde(skip)]
    created_at: OffsetDateTime,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_active: bool,
    ) -> Result<Self, ValidationError> {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            is_active,
            created_at: OffsetDateTime::now_utc(),
        };
        category.validate()?;
        Ok(category)
    }

    /// Rebuilds a category loaded from storage.
    pub fn restore(
        id: Uuid,
        name: String,
        description: String,
        is_active: bool,
        created_at: OffsetDateTime,
    ) -> Self {
        Category {
            id,
            name,
            description,
            is_active,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Description is kept when `None`. Nothing changes if the new values are invalid.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<(), ValidationError> {
        let mut candidate = self.clone();
        candidate.name = name.into();
        if let Some(description) = description {
            candidate.description = description;
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }
}
