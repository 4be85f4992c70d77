// Spreadsheet and CSV export of the filtered inventory

use std::collections::HashMap;

use rust_xlsxwriter::Workbook;

use crate::entity::assets;
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;
use crate::models::asset::AssetFilter;

pub const SHEET_NAME: &str = "Asset Inventory";
pub const EXPORT_FILE_STEM: &str = "asset_inventory";

/// Header row of every export, in column order
pub const EXPORT_COLUMNS: &[&str] = &[
    "item",
    "imei1",
    "imei2",
    "serial_number",
    "mac_address",
    "iccid",
    "carrier",
    "document",
    "holder_name",
    "position",
    "responsible",
    "identification",
    "name",
    "category",
    "brand",
    "status",
    "zone",
    "observation",
    "point_of_sale",
    "cost_center_code",
    "cost_center_name",
    "warehouse_exit_date",
    "confirmed_on",
];

/// Rows ready to be written, header first
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// One row per asset in the given order; category and brand ids become names
    pub fn build(
        assets: &[assets::Model],
        categories: &HashMap<i32, String>,
        brands: &HashMap<i32, String>,
    ) -> Self {
        let name_of = |names: &HashMap<i32, String>, id: Option<i32>| {
            id.and_then(|id| names.get(&id).cloned()).unwrap_or_default()
        };
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        let rows = assets
            .iter()
            .map(|asset| {
                vec![
                    asset.id.to_string(),
                    text(&asset.imei1),
                    text(&asset.imei2),
                    text(&asset.serial_number),
                    text(&asset.mac_address),
                    text(&asset.iccid),
                    text(&asset.carrier),
                    text(&asset.document),
                    text(&asset.holder_name),
                    asset.position.as_str().to_string(),
                    text(&asset.responsible),
                    text(&asset.identification),
                    text(&asset.name),
                    name_of(categories, asset.category_id),
                    name_of(brands, asset.brand_id),
                    asset.status.as_str().to_string(),
                    asset.zone.clone(),
                    asset.observation.clone(),
                    text(&asset.point_of_sale),
                    text(&asset.cost_center_code),
                    text(&asset.cost_center_name),
                    asset
                        .warehouse_exit_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                    asset.confirmed_on.to_string(),
                ]
            })
            .collect();

        Self {
            header: EXPORT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    pub fn to_xlsx(&self) -> InventoryResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

        for (row_idx, row_data) in std::iter::once(&self.header)
            .chain(self.rows.iter())
            .enumerate()
        {
            for (col_idx, value) in row_data.iter().enumerate() {
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, value)
                    .map_err(xlsx_error)?;
            }
        }

        workbook.save_to_buffer().map_err(xlsx_error)
    }

    pub fn to_csv(&self) -> InventoryResult<Vec<u8>> {
        let mut csv_writer = csv::Writer::from_writer(Vec::new());
        csv_writer.write_record(&self.header).map_err(csv_error)?;
        for row in &self.rows {
            csv_writer.write_record(row).map_err(csv_error)?;
        }
        csv_writer
            .into_inner()
            .map_err(|e| InventoryError::InternalError(format!("Failed to finish CSV: {}", e)))
    }
}

fn xlsx_error(err: rust_xlsxwriter::XlsxError) -> InventoryError {
    InventoryError::InternalError(format!("Failed to generate XLSX: {}", err))
}

fn csv_error(err: csv::Error) -> InventoryError {
    InventoryError::InternalError(format!("Failed to generate CSV: {}", err))
}

/// Export table for every asset matching the filter, in list order
pub async fn export_table(state: &AppState, filter: AssetFilter) -> InventoryResult<ExportTable> {
    let repos = &state.repositories;
    let filter = filter.normalized();

    let assets = repos.asset.find_all_filtered(&filter).await?;
    let categories = repos
        .category
        .find_all()
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let brands = repos
        .brand
        .find_all(None)
        .await?
        .into_iter()
        .map(|b| (b.id, b.name))
        .collect();

    let table = ExportTable::build(&assets, &categories, &brands);
    tracing::info!("Exporting {} assets", table.rows.len());
    Ok(table)
}
