// Asset lifecycle: create, edit, movements, deletion and their audit rows

use chrono::Utc;
use sea_orm::{ActiveValue::Set, IntoActiveModel, TransactionTrait};

use crate::auth::CurrentUser;
use crate::db::repositories::{AssetRepository, HistoryRepository, TraceabilityRepository};
use crate::entity::sea_orm_active_enums::{Role, TraceabilityKind};
use crate::entity::{asset_traceability, assets};
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;
use crate::models::asset::{
    AssetFilter, AssetForm, AssetHistoryResponse, AssetListResponse, FormMode, ReferenceCheck,
    ASSIGNMENT_FIELDS,
};
use crate::models::movement::MovementForm;
use crate::models::{FieldErrors, PaginationInfo, PaginationParams};
use crate::services::audit;

pub async fn list_assets(
    state: &AppState,
    filter: AssetFilter,
    pagination: PaginationParams,
) -> InventoryResult<AssetListResponse> {
    let filter = filter.normalized();
    let pagination = pagination.normalized();
    let repo = &state.repositories.asset;

    let total = repo.count_filtered(&filter).await?;
    let assets = repo
        .find_filtered(&filter, pagination.limit, pagination.offset())
        .await?;

    Ok(AssetListResponse {
        assets,
        pagination: PaginationInfo::new(pagination, total),
    })
}

pub async fn get_asset(state: &AppState, id: i32) -> InventoryResult<assets::Model> {
    state
        .repositories
        .asset
        .find_by_id(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("Asset {} not found", id)))
}

/// Looks up the zone, category and brand the form points at
async fn reference_check(state: &AppState, form: &AssetForm) -> InventoryResult<ReferenceCheck> {
    let repos = &state.repositories;

    let zone_exists = repos.zone.exists_by_name(&form.effective_zone()).await?;
    let category_exists = match form.category_id {
        Some(id) => repos.category.find_by_id(id).await?.is_some(),
        None => false,
    };
    let brand = match form.brand_id {
        Some(id) => repos.brand.find_by_id(id).await?,
        None => None,
    };

    Ok(ReferenceCheck {
        zone_exists,
        category_exists,
        brand,
    })
}

fn event(
    asset: &assets::Model,
    kind: TraceabilityKind,
    actor: &CurrentUser,
) -> asset_traceability::ActiveModel {
    asset_traceability::ActiveModel {
        asset_id: Set(Some(asset.id)),
        asset_label: Set(asset.label()),
        kind: Set(kind),
        user_id: Set(Some(actor.id())),
        username: Set(actor.username().to_string()),
        zone_from: Set(None),
        zone_to: Set(None),
        status_before: Set(None),
        status_after: Set(None),
        description: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}

/// Creates an asset and records its ingress
pub async fn create_asset(
    state: &AppState,
    actor: &CurrentUser,
    form: AssetForm,
) -> InventoryResult<assets::Model> {
    let refs = reference_check(state, &form).await?;
    let mut fields = form.clean(FormMode::Create, &refs)?;
    fields.apply_assignment_rule(FormMode::Create);

    let txn = state.repositories.asset.get_connection().begin().await?;
    let asset = AssetRepository::insert(&txn, fields.into_new_active_model(Utc::now())).await?;

    let mut ingress = event(&asset, TraceabilityKind::Ingress, actor);
    ingress.zone_to = Set(Some(asset.zone.clone()));
    ingress.status_after = Set(Some(asset.status.as_str().to_string()));
    TraceabilityRepository::insert(&txn, ingress).await?;
    txn.commit().await?;

    tracing::info!(
        user = actor.username(),
        asset_id = asset.id,
        status = asset.status.as_str(),
        "Asset created"
    );
    Ok(asset)
}

/// Assigners may only touch the assignment fields; anything else is reported per field
fn check_assigner_scope(changes: &[audit::FieldChange]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for change in changes {
        if !ASSIGNMENT_FIELDS.contains(&change.field) {
            errors.add(
                change.field,
                "Your role may only change assignment fields.",
            );
        }
    }
    errors.into_result()
}

/// Saves an edited asset and writes one history row per changed field
pub async fn update_asset(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: AssetForm,
) -> InventoryResult<assets::Model> {
    let before = get_asset(state, id).await?;
    let refs = reference_check(state, &form).await?;
    let mut fields = form.clean(FormMode::Update, &refs)?;

    if actor.role() == Role::Assigner {
        check_assigner_scope(&audit::diff(&before, &fields.applied_to(&before)))?;
    }

    fields.apply_assignment_rule(FormMode::Update);
    let changes = audit::diff(&before, &fields.applied_to(&before));
    if changes.is_empty() {
        tracing::debug!(asset_id = id, "Asset update without changes");
        return Ok(before);
    }

    let now = Utc::now();
    let mut active = before.into_active_model();
    fields.write_into(&mut active);
    active.updated_at = Set(now);

    let rows = changes
        .iter()
        .cloned()
        .map(|change| change.into_history_row(id, actor, now))
        .collect();

    let txn = state.repositories.asset.get_connection().begin().await?;
    let asset = AssetRepository::update(&txn, active).await?;
    HistoryRepository::insert_many(&txn, rows).await?;
    txn.commit().await?;

    tracing::info!(
        user = actor.username(),
        asset_id = id,
        changed = changes.len(),
        "Asset updated"
    );
    Ok(asset)
}

/// Deletes an asset with its history; the deletion event outlives it
pub async fn delete_asset(state: &AppState, actor: &CurrentUser, id: i32) -> InventoryResult<()> {
    let asset = get_asset(state, id).await?;

    let mut deletion = event(&asset, TraceabilityKind::Deletion, actor);
    deletion.asset_id = Set(None);
    deletion.zone_from = Set(Some(asset.zone.clone()));
    deletion.status_before = Set(Some(asset.status.as_str().to_string()));

    let txn = state.repositories.asset.get_connection().begin().await?;
    TraceabilityRepository::insert(&txn, deletion).await?;
    HistoryRepository::delete_by_asset(&txn, id).await?;
    AssetRepository::delete(&txn, id).await?;
    txn.commit().await?;

    tracing::info!(user = actor.username(), asset_id = id, "Asset deleted");
    Ok(())
}

/// Records a movement and applies its destination zone and new status to the asset
pub async fn register_movement(
    state: &AppState,
    actor: &CurrentUser,
    id: i32,
    form: MovementForm,
) -> InventoryResult<asset_traceability::Model> {
    let asset = get_asset(state, id).await?;
    let zone_exists = match form.zone_to() {
        Some(zone) => state.repositories.zone.exists_by_name(&zone).await?,
        None => true,
    };
    let movement = form.clean(zone_exists)?;

    let mut record = event(&asset, movement.kind, actor);
    record.zone_from = Set(Some(asset.zone.clone()));
    record.zone_to = Set(movement.zone_to.clone());
    record.status_before = Set(Some(asset.status.as_str().to_string()));
    record.status_after = Set(movement.status_after.map(|s| s.as_str().to_string()));
    record.description = Set(movement.description.clone());

    let txn = state.repositories.asset.get_connection().begin().await?;
    if movement.zone_to.is_some() || movement.status_after.is_some() {
        let mut active = asset.clone().into_active_model();
        if let Some(zone) = movement.zone_to {
            active.zone = Set(zone);
        }
        if let Some(status) = movement.status_after {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now());
        AssetRepository::update(&txn, active).await?;
    }
    let record = TraceabilityRepository::insert(&txn, record).await?;
    txn.commit().await?;

    tracing::info!(
        user = actor.username(),
        asset_id = id,
        kind = record.kind.as_str(),
        "Movement registered"
    );
    Ok(record)
}

pub async fn asset_history(state: &AppState, id: i32) -> InventoryResult<AssetHistoryResponse> {
    let asset = get_asset(state, id).await?;
    let history = state.repositories.history.find_by_asset(id).await?;
    let movements = state.repositories.traceability.find_by_asset(id).await?;

    Ok(AssetHistoryResponse {
        asset,
        history,
        movements,
    })
}
