// Zones, categories and brands

use chrono::Utc;
use sea_orm::{ActiveValue::Set, IntoActiveModel, TransactionTrait};

use crate::auth::CurrentUser;
use crate::db::repositories::{AssetRepository, BrandRepository, CategoryRepository};
use crate::entity::{brands, categories, zones};
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;
use crate::models::asset::{FormMode, POSITION_CHOICES};
use crate::models::reference::{BrandForm, FormOptions, NamedFields, NamedForm};
use crate::models::FieldErrors;

const DUPLICATE_NAME: &str = "An entry with this name already exists.";

// Zones

pub async fn list_zones(state: &AppState) -> InventoryResult<Vec<zones::Model>> {
    Ok(state.repositories.zone.find_all().await?)
}

pub async fn get_zone(state: &AppState, id: i32) -> InventoryResult<zones::Model> {
    state
        .repositories
        .zone
        .find_by_id(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Zone {} not found", id)))
}

async fn clean_zone(
    state: &AppState,
    form: NamedForm,
    exclude_id: Option<i32>,
) -> InventoryResult<NamedFields> {
    let fields = form.clean()?;
    if state.repositories.zone.name_taken(&fields.name, exclude_id).await? {
        return Err(FieldErrors::single("name", DUPLICATE_NAME).into());
    }
    Ok(fields)
}

pub async fn create_zone(
    state: &AppState,
    actor: &CurrentUser,
    form: NamedForm,
) -> InventoryResult<zones::Model> {
    let fields = clean_zone(state, form, None).await?;
    let zone = state
        .repositories
        .zone
        .insert(zones::ActiveModel {
            name: Set(fields.name),
            description: Set(fields.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .await?;

    tracing::info!(user = actor.username(), zone = %zone.name, "Zone created");
    Ok(zone)
}

/// Renaming a zone does not rewrite the zone text already stored on assets
pub async fn update_zone(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: NamedForm,
) -> InventoryResult<zones::Model> {
    let existing = get_zone(state, id).await?;
    let fields = clean_zone(state, form, Some(id)).await?;

    let mut active = existing.into_active_model();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    let zone = state.repositories.zone.update(active).await?;

    tracing::info!(user = actor.username(), zone_id = id, "Zone updated");
    Ok(zone)
}

pub async fn delete_zone(state: &AppState, actor: &CurrentUser, id: i32) -> InventoryResult<()> {
    get_zone(state, id).await?;
    state.repositories.zone.delete(id).await?;
    tracing::info!(user = actor.username(), zone_id = id, "Zone deleted");
    Ok(())
}

// Categories

pub async fn list_categories(state: &AppState) -> InventoryResult<Vec<categories::Model>> {
    Ok(state.repositories.category.find_all().await?)
}

pub async fn get_category(state: &AppState, id: i32) -> InventoryResult<categories::Model> {
    state
        .repositories
        .category
        .find_by_id(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Category {} not found", id)))
}

async fn clean_category(
    state: &AppState,
    form: NamedForm,
    exclude_id: Option<i32>,
) -> InventoryResult<NamedFields> {
    let fields = form.clean()?;
    if state
        .repositories
        .category
        .name_taken(&fields.name, exclude_id)
        .await?
    {
        return Err(FieldErrors::single("name", DUPLICATE_NAME).into());
    }
    Ok(fields)
}

pub async fn create_category(
    state: &AppState,
    actor: &CurrentUser,
    form: NamedForm,
) -> InventoryResult<categories::Model> {
    let fields = clean_category(state, form, None).await?;
    let category = state
        .repositories
        .category
        .insert(categories::ActiveModel {
            name: Set(fields.name),
            description: Set(fields.description),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .await?;

    tracing::info!(user = actor.username(), category = %category.name, "Category created");
    Ok(category)
}

pub async fn update_category(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: NamedForm,
) -> InventoryResult<categories::Model> {
    let existing = get_category(state, id).await?;
    let fields = clean_category(state, form, Some(id)).await?;

    let mut active = existing.into_active_model();
    active.name = Set(fields.name);
    active.description = Set(fields.description);
    let category = state.repositories.category.update(active).await?;

    tracing::info!(user = actor.username(), category_id = id, "Category updated");
    Ok(category)
}

/// Detaches brands and assets from the category before removing it
pub async fn delete_category(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
) -> InventoryResult<()> {
    get_category(state, id).await?;

    let txn = state.repositories.category.get_connection().begin().await?;
    let brands = BrandRepository::clear_category(&txn, id).await?;
    let assets = AssetRepository::clear_category(&txn, id).await?;
    CategoryRepository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(
        user = actor.username(),
        category_id = id,
        detached_brands = brands,
        detached_assets = assets,
        "Category deleted"
    );
    Ok(())
}

// Brands

pub async fn list_brands(
    state: &AppState,
    category_id: Option<i32>,
) -> InventoryResult<Vec<brands::Model>> {
    Ok(state.repositories.brand.find_all(category_id).await?)
}

pub async fn get_brand(state: &AppState, id: i32) -> InventoryResult<brands::Model> {
    state
        .repositories
        .brand
        .find_by_id(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Brand {} not found", id)))
}

async fn clean_brand(
    state: &AppState,
    form: BrandForm,
    exclude_id: Option<i32>,
) -> InventoryResult<brands::ActiveModel> {
    let category_exists = match form.category_id {
        Some(id) => state.repositories.category.find_by_id(id).await?.is_some(),
        None => false,
    };
    let fields = form.clean(category_exists)?;
    if state
        .repositories
        .brand
        .name_taken(fields.category_id, &fields.name, exclude_id)
        .await?
    {
        return Err(FieldErrors::single("name", DUPLICATE_NAME).into());
    }

    Ok(brands::ActiveModel {
        name: Set(fields.name),
        category_id: Set(fields.category_id),
        ..Default::default()
    })
}

pub async fn create_brand(
    state: &AppState,
    actor: &CurrentUser,
    form: BrandForm,
) -> InventoryResult<brands::Model> {
    let mut active = clean_brand(state, form, None).await?;
    active.created_at = Set(Utc::now());
    let brand = state.repositories.brand.insert(active).await?;

    tracing::info!(user = actor.username(), brand = %brand.name, "Brand created");
    Ok(brand)
}

pub async fn update_brand(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: BrandForm,
) -> InventoryResult<brands::Model> {
    let existing = get_brand(state, id).await?;
    let cleaned = clean_brand(state, form, Some(id)).await?;

    let mut active = existing.into_active_model();
    active.name = cleaned.name;
    active.category_id = cleaned.category_id;
    let brand = state.repositories.brand.update(active).await?;

    tracing::info!(user = actor.username(), brand_id = id, "Brand updated");
    Ok(brand)
}

/// Assets of the brand keep existing without a brand
pub async fn delete_brand(state: &AppState, actor: &CurrentUser, id: i32) -> InventoryResult<()> {
    get_brand(state, id).await?;

    let txn = state.repositories.brand.get_connection().begin().await?;
    let assets = AssetRepository::clear_brand(&txn, id).await?;
    BrandRepository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(
        user = actor.username(),
        brand_id = id,
        detached_assets = assets,
        "Brand deleted"
    );
    Ok(())
}

/// Choices for the asset form; brands follow the selected category
pub async fn form_options(
    state: &AppState,
    category_id: Option<i32>,
) -> InventoryResult<FormOptions> {
    let repos = &state.repositories;

    Ok(FormOptions {
        zones: repos.zone.find_all().await?,
        categories: repos.category.find_all().await?,
        brands: repos.brand.find_all(category_id).await?,
        create_statuses: FormMode::Create.status_choices().to_vec(),
        update_statuses: FormMode::Update.status_choices().to_vec(),
        positions: POSITION_CHOICES.to_vec(),
    })
}
