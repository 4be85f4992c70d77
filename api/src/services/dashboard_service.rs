// Role dashboards and the per-zone report

use crate::entity::sea_orm_active_enums::AssetStatus;
use crate::error::{InventoryError, InventoryResult};
use crate::handlers::AppState;
use crate::models::asset::AssetFilter;
use crate::models::clean_text;
use crate::models::report::{
    AdminDashboard, LogisticsDashboard, ReadOnlyDashboard, StatusCount, ZoneCount, ZoneReport,
};

const RECENT_MOVEMENTS: u64 = 10;

fn count_for(counts: &[StatusCount], status: AssetStatus) -> u64 {
    counts
        .iter()
        .find(|c| c.status == status)
        .map(|c| c.count)
        .unwrap_or(0)
}

async fn status_counts(state: &AppState) -> InventoryResult<Vec<StatusCount>> {
    let rows = state.repositories.asset.count_by_status().await?;
    Ok(rows
        .into_iter()
        .map(|(status, count)| StatusCount {
            status,
            count: count.max(0) as u64,
        })
        .collect())
}

pub async fn admin_dashboard(state: &AppState) -> InventoryResult<AdminDashboard> {
    let counts = status_counts(state).await?;
    Ok(AdminDashboard {
        total: counts.iter().map(|c| c.count).sum(),
        confirmed: count_for(&counts, AssetStatus::Confirmed),
        assigned: count_for(&counts, AssetStatus::Assigned),
        decommissioned: count_for(&counts, AssetStatus::Decommissioned),
    })
}

pub async fn logistics_dashboard(state: &AppState) -> InventoryResult<LogisticsDashboard> {
    Ok(LogisticsDashboard {
        by_status: status_counts(state).await?,
        recent_movements: state
            .repositories
            .traceability
            .find_recent(None, None, RECENT_MOVEMENTS)
            .await?,
    })
}

pub async fn read_only_dashboard(state: &AppState) -> InventoryResult<ReadOnlyDashboard> {
    let total = state
        .repositories
        .asset
        .count_filtered(&AssetFilter::default())
        .await?;
    Ok(ReadOnlyDashboard { total })
}

/// An unknown zone name is a 404, like selecting a zone that no longer exists
pub async fn zone_report(state: &AppState, zone: Option<String>) -> InventoryResult<ZoneReport> {
    let repos = &state.repositories;
    let zone = clean_text(zone);

    if let Some(name) = &zone {
        if !repos.zone.exists_by_name(name).await? {
            return Err(InventoryError::NotFound(format!("Zone {} not found", name)));
        }
    }

    let filter = AssetFilter {
        zone: zone.clone(),
        ..Default::default()
    };
    let assets = repos.asset.find_all_filtered(&filter).await?;
    let by_zone = repos
        .asset
        .count_by_zone()
        .await?
        .into_iter()
        .map(|(zone, count)| ZoneCount {
            zone,
            count: count.max(0) as u64,
        })
        .collect();

    Ok(ZoneReport {
        zone,
        zones: repos.zone.find_all().await?,
        by_zone,
        assets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_counts_as_zero() {
        let counts = vec![StatusCount {
            status: AssetStatus::Assigned,
            count: 4,
        }];
        assert_eq!(count_for(&counts, AssetStatus::Assigned), 4);
        assert_eq!(count_for(&counts, AssetStatus::Decommissioned), 0);
    }
}
