// Handlers for dashboards and reports

use axum::{
    extract::{Query, State},
    Json,
};

use crate::auth::{require_role, CurrentUser, ADMIN_ONLY, LOGISTICS};
use crate::error::InventoryResult;
use crate::handlers::AppState;
use crate::models::report::{
    AdminDashboard, LogisticsDashboard, ReadOnlyDashboard, ZoneReport, ZoneReportQuery,
};
use crate::services::dashboard_service;

/// Handler for GET /dashboard/admin - Asset totals per status
pub async fn admin_dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> InventoryResult<Json<AdminDashboard>> {
    require_role(
        &state,
        &current,
        ADMIN_ONLY,
        "You do not have permission to view the admin dashboard.",
    )
    .await?;
    Ok(Json(dashboard_service::admin_dashboard(&state).await?))
}

/// Handler for GET /dashboard/logistics - Counts per status and the latest movements
pub async fn logistics_dashboard(
    State(state): State<AppState>,
    current: CurrentUser,
) -> InventoryResult<Json<LogisticsDashboard>> {
    require_role(
        &state,
        &current,
        LOGISTICS,
        "You do not have permission to view the logistics dashboard.",
    )
    .await?;
    Ok(Json(dashboard_service::logistics_dashboard(&state).await?))
}

/// Handler for GET /dashboard/read-only
pub async fn read_only_dashboard(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> InventoryResult<Json<ReadOnlyDashboard>> {
    Ok(Json(dashboard_service::read_only_dashboard(&state).await?))
}

/// Handler for GET /reports/by-zone
pub async fn zone_report(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ZoneReportQuery>,
) -> InventoryResult<Json<ZoneReport>> {
    require_role(&state, &current, LOGISTICS, "You do not have permission to view reports.").await?;
    Ok(Json(dashboard_service::zone_report(&state, query.zone).await?))
}
