// Dashboard and report payloads

use serde::{Deserialize, Serialize};

use crate::entity::sea_orm_active_enums::AssetStatus;
use crate::entity::{asset_traceability, assets, zones};

#[derive(Debug, Serialize, PartialEq)]
pub struct AdminDashboard {
    pub total: u64,
    pub confirmed: u64,
    pub assigned: u64,
    pub decommissioned: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: AssetStatus,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct LogisticsDashboard {
    pub by_status: Vec<StatusCount>,
    pub recent_movements: Vec<asset_traceability::Model>,
}

#[derive(Debug, Serialize)]
pub struct ReadOnlyDashboard {
    pub total: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ZoneCount {
    pub zone: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ZoneReportQuery {
    pub zone: Option<String>,
}

/// Assets of the selected zone (all assets when none is selected) and per-zone totals
#[derive(Debug, Serialize)]
pub struct ZoneReport {
    pub zone: Option<String>,
    pub zones: Vec<zones::Model>,
    pub by_zone: Vec<ZoneCount>,
    pub assets: Vec<assets::Model>,
}
