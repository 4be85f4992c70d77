// Handlers for asset endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::auth::{require_role, CurrentUser, ADMIN_ONLY, ASSET_EDITORS, LOGISTICS};
use crate::entity::{asset_traceability, assets};
use crate::error::InventoryResult;
use crate::handlers::{body::JsonBody, AppState};
use crate::models::asset::{AssetFilter, AssetForm, AssetHistoryResponse, AssetListResponse};
use crate::models::movement::{MovementForm, TraceabilityQuery};
use crate::models::reference::{BrandQuery, FormOptions};
use crate::models::PaginationParams;
use crate::services::{asset_service, reference_service};

/// Handler for GET /assets - Returns a page of assets matching the filters
pub async fn list_assets(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(filter): Query<AssetFilter>,
    Query(pagination): Query<PaginationParams>,
) -> InventoryResult<Json<AssetListResponse>> {
    let response = asset_service::list_assets(&state, filter, pagination).await?;
    Ok(Json(response))
}

/// Handler for POST /assets
pub async fn create_asset(
    State(state): State<AppState>,
    current: CurrentUser,
    body: JsonBody,
) -> InventoryResult<(StatusCode, Json<assets::Model>)> {
    require_role(
        &state,
        &current,
        LOGISTICS,
        "You do not have permission to create assets.",
    )
    .await?;
    let form: AssetForm = body.parse()?;
    let asset = asset_service::create_asset(&state, &current, form).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Handler for GET /assets/form-options - Zones, categories, brands and choices for the asset form
pub async fn form_options(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(query): Query<BrandQuery>,
) -> InventoryResult<Json<FormOptions>> {
    let options = reference_service::form_options(&state, query.category_id).await?;
    Ok(Json(options))
}

/// Handler for GET /assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<Json<assets::Model>> {
    let asset = asset_service::get_asset(&state, id).await?;
    Ok(Json(asset))
}

/// Handler for PUT /assets/{id} - Full replacement of the editable fields
pub async fn update_asset(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<Json<assets::Model>> {
    require_role(
        &state,
        &current,
        ASSET_EDITORS,
        "You do not have permission to edit assets.",
    )
    .await?;
    let form: AssetForm = body.parse()?;
    let asset = asset_service::update_asset(&state, &current, id, form).await?;
    Ok(Json(asset))
}

/// Handler for DELETE /assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<StatusCode> {
    require_role(
        &state,
        &current,
        ADMIN_ONLY,
        "You do not have permission to delete assets.",
    )
    .await?;
    asset_service::delete_asset(&state, &current, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /assets/{id}/history - Field changes and lifecycle events of one asset
pub async fn asset_history(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> InventoryResult<Json<AssetHistoryResponse>> {
    let response = asset_service::asset_history(&state, id).await?;
    Ok(Json(response))
}

/// Handler for POST /assets/{id}/movements
pub async fn register_movement(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    body: JsonBody,
) -> InventoryResult<(StatusCode, Json<asset_traceability::Model>)> {
    require_role(
        &state,
        &current,
        LOGISTICS,
        "You do not have permission to register movements.",
    )
    .await?;
    let form: MovementForm = body.parse()?;
    let record = asset_service::register_movement(&state, &current, id, form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /traceability - Lifecycle events, newest first
pub async fn list_traceability(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<TraceabilityQuery>,
) -> InventoryResult<Json<Vec<asset_traceability::Model>>> {
    require_role(
        &state,
        &current,
        LOGISTICS,
        "You do not have permission to view movements.",
    )
    .await?;
    let events = state
        .repositories
        .traceability
        .find_recent(query.asset_id, query.kind, query.limit())
        .await?;
    Ok(Json(events))
}
