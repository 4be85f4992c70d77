// Zone, category and brand forms plus the asset form choices

use serde::{Deserialize, Serialize};

use super::{check_max_len, check_required, clean_text, FieldErrors};
use crate::entity::sea_orm_active_enums::{AssetStatus, Position};
use crate::entity::{brands, categories, zones};

/// Name and description form shared by zones and categories
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamedForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated name and description
#[derive(Debug, Clone, PartialEq)]
pub struct NamedFields {
    pub name: String,
    pub description: Option<String>,
}

impl NamedForm {
    pub fn clean(self) -> Result<NamedFields, FieldErrors> {
        let name = clean_text(self.name);
        let description = clean_text(self.description);

        let mut errors = FieldErrors::new();
        check_required(&mut errors, "name", &name);
        check_max_len(&mut errors, "name", &name, 100);
        errors.into_result()?;

        Ok(NamedFields {
            name: name.unwrap_or_default(),
            description,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrandForm {
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

/// Validated brand values
#[derive(Debug, Clone, PartialEq)]
pub struct BrandFields {
    pub name: String,
    pub category_id: Option<i32>,
}

impl BrandForm {
    /// `category_exists` is only consulted when a category id was submitted
    pub fn clean(self, category_exists: bool) -> Result<BrandFields, FieldErrors> {
        let name = clean_text(self.name);

        let mut errors = FieldErrors::new();
        check_required(&mut errors, "name", &name);
        check_max_len(&mut errors, "name", &name, 100);
        if self.category_id.is_some() && !category_exists {
            errors.add("category_id", "Select a valid category.");
        }
        errors.into_result()?;

        Ok(BrandFields {
            name: name.unwrap_or_default(),
            category_id: self.category_id,
        })
    }
}

/// Query parameters for brand lookups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandQuery {
    pub category_id: Option<i32>,
}

/// Choices offered by the asset form
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub zones: Vec<zones::Model>,
    pub categories: Vec<categories::Model>,
    /// Brands of the requested category, or every brand when none was requested
    pub brands: Vec<brands::Model>,
    pub create_statuses: Vec<AssetStatus>,
    pub update_statuses: Vec<AssetStatus>,
    pub positions: Vec<Position>,
}
