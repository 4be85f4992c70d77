// Handlers for inventory downloads

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};

use crate::auth::CurrentUser;
use crate::error::InventoryResult;
use crate::handlers::AppState;
use crate::models::asset::AssetFilter;
use crate::services::export_service::{self, EXPORT_FILE_STEM};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(extension: &str) -> String {
    format!("attachment; filename={}.{}", EXPORT_FILE_STEM, extension)
}

/// Handler for GET /exports/assets.xlsx
pub async fn export_xlsx(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(filter): Query<AssetFilter>,
) -> InventoryResult<impl IntoResponse> {
    let table = export_service::export_table(&state, filter).await?;
    let bytes = table.to_xlsx()?;
    tracing::info!(user = current.username(), "XLSX export downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment("xlsx")),
        ],
        bytes,
    ))
}

/// Handler for GET /exports/assets.csv
pub async fn export_csv(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(filter): Query<AssetFilter>,
) -> InventoryResult<impl IntoResponse> {
    let table = export_service::export_table(&state, filter).await?;
    let bytes = table.to_csv()?;
    tracing::info!(user = current.username(), "CSV export downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, attachment("csv")),
        ],
        bytes,
    ))
}
