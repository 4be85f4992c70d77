// Handlers for zones, categories and brands

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::auth::{require_role, CurrentUser, ADMIN_ONLY};
use crate::entity::{brands, categories, zones};
use crate::error::InventoryResult;
use crate::handlers::{body::JsonBody, AppState};
use crate::models::reference::{BrandForm, BrandQuery, NamedForm};
use crate::services::reference_service;

const ZONES_DENIED: &str = "You do not have permission to manage zones.";
const CATEGORIES_DENIED: &str = "You do not have permission to manage categories.";
const BRANDS_DENIED: &str = "You do not have permission to manage brands.";

/// Handler for GET /zones
pub async fn list_zones(
    State(state): State<AppState>,
    current: CurrentUser,
) -> InventoryResult<Json<Vec<zones::Model>>> {
    require_role(&state, &current, ADMIN_ONLY, ZONES_DENIED).await?;
    Ok(Json(reference_service::list_zones(&state).await?))
}

/// Handler for POST /zones
pub async fn create_zone(
    State(state): State<AppState>,
    current: CurrentUser,
    body: JsonBody,
) -> InventoryResult<(StatusCode, Json<zones::Model>)> {
    require_role(&state, &current, ADMIN_ONLY, ZONES_DENIED).await?;
    let form: NamedForm = body.parse()?;
    let zone = reference_service::create_zone(&state, &current, form).await?;
    Ok((StatusCode::CREATED, Json(zone)))
}

/// Handler for GET /zones/{id}
pub async fn get_zone(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<Json<zones::Model>> {
    require_role(&state, &current, ADMIN_ONLY, ZONES_DENIED).await?;
    Ok(Json(reference_service::get_zone(&state, id).await?))
}

/// Handler for PUT /zones/{id}
pub async fn update_zone(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<Json<zones::Model>> {
    require_role(&state, &current, ADMIN_ONLY, ZONES_DENIED).await?;
    let form: NamedForm = body.parse()?;
    Ok(Json(
        reference_service::update_zone(&state, &current, id, form).await?,
    ))
}

/// Handler for DELETE /zones/{id}
pub async fn delete_zone(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<StatusCode> {
    require_role(&state, &current, ADMIN_ONLY, ZONES_DENIED).await?;
    reference_service::delete_zone(&state, &current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    current: CurrentUser,
) -> InventoryResult<Json<Vec<categories::Model>>> {
    require_role(&state, &current, ADMIN_ONLY, CATEGORIES_DENIED).await?;
    Ok(Json(reference_service::list_categories(&state).await?))
}

/// Handler for POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    current: CurrentUser,
    body: JsonBody,
) -> InventoryResult<(StatusCode, Json<categories::Model>)> {
    require_role(&state, &current, ADMIN_ONLY, CATEGORIES_DENIED).await?;
    let form: NamedForm = body.parse()?;
    let category = reference_service::create_category(&state, &current, form).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<Json<categories::Model>> {
    require_role(&state, &current, ADMIN_ONLY, CATEGORIES_DENIED).await?;
    Ok(Json(reference_service::get_category(&state, id).await?))
}

/// Handler for PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<Json<categories::Model>> {
    require_role(&state, &current, ADMIN_ONLY, CATEGORIES_DENIED).await?;
    let form: NamedForm = body.parse()?;
    Ok(Json(
        reference_service::update_category(&state, &current, id, form).await?,
    ))
}

/// Handler for DELETE /categories/{id} - Brands and assets of the category lose the link
pub async fn delete_category(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<StatusCode> {
    require_role(&state, &current, ADMIN_ONLY, CATEGORIES_DENIED).await?;
    reference_service::delete_category(&state, &current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /brands - Any signed-in user, used to fill the asset form
pub async fn list_brands(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(query): Query<BrandQuery>,
) -> InventoryResult<Json<Vec<brands::Model>>> {
    Ok(Json(
        reference_service::list_brands(&state, query.category_id).await?,
    ))
}

/// Handler for POST /brands
pub async fn create_brand(
    State(state): State<AppState>,
    current: CurrentUser,
    body: JsonBody,
) -> InventoryResult<(StatusCode, Json<brands::Model>)> {
    require_role(&state, &current, ADMIN_ONLY, BRANDS_DENIED).await?;
    let form: BrandForm = body.parse()?;
    let brand = reference_service::create_brand(&state, &current, form).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// Handler for PUT /brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<Json<brands::Model>> {
    require_role(&state, &current, ADMIN_ONLY, BRANDS_DENIED).await?;
    let form: BrandForm = body.parse()?;
    Ok(Json(
        reference_service::update_brand(&state, &current, id, form).await?,
    ))
}

/// Handler for DELETE /brands/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<StatusCode> {
    require_role(&state, &current, ADMIN_ONLY, BRANDS_DENIED).await?;
    reference_service::delete_brand(&state, &current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
