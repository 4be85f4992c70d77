// Field-level diff of asset rows for the change history

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;

use crate::auth::CurrentUser;
use crate::entity::{asset_history, assets};

/// One tracked field whose value differs between two versions of an asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FieldChange {
    pub fn into_history_row(
        self,
        asset_id: i32,
        actor: &CurrentUser,
        now: DateTime<Utc>,
    ) -> asset_history::ActiveModel {
        asset_history::ActiveModel {
            asset_id: Set(asset_id),
            user_id: Set(Some(actor.id())),
            username: Set(actor.username().to_string()),
            field: Set(self.field.to_string()),
            old_value: Set(self.old_value),
            new_value: Set(self.new_value),
            created_at: Set(now),
            ..Default::default()
        }
    }
}

/// Every user-editable column rendered as text, in form order
pub fn tracked_values(asset: &assets::Model) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("imei1", asset.imei1.clone()),
        ("imei2", asset.imei2.clone()),
        ("serial_number", asset.serial_number.clone()),
        ("mac_address", asset.mac_address.clone()),
        ("iccid", asset.iccid.clone()),
        ("carrier", asset.carrier.clone()),
        ("document", asset.document.clone()),
        ("holder_name", asset.holder_name.clone()),
        ("position", Some(asset.position.as_str().to_string())),
        ("responsible", asset.responsible.clone()),
        ("identification", asset.identification.clone()),
        ("name", asset.name.clone()),
        ("category_id", asset.category_id.map(|id| id.to_string())),
        ("brand_id", asset.brand_id.map(|id| id.to_string())),
        ("status", Some(asset.status.as_str().to_string())),
        ("zone", Some(asset.zone.clone())),
        ("observation", Some(asset.observation.clone())),
        ("point_of_sale", asset.point_of_sale.clone()),
        ("cost_center_code", asset.cost_center_code.clone()),
        ("cost_center_name", asset.cost_center_name.clone()),
        (
            "warehouse_exit_date",
            asset.warehouse_exit_date.map(|d| d.to_string()),
        ),
    ]
}

/// Tracked fields whose value changed, in form order
pub fn diff(before: &assets::Model, after: &assets::Model) -> Vec<FieldChange> {
    tracked_values(before)
        .into_iter()
        .zip(tracked_values(after))
        .filter(|((_, old), (_, new))| old != new)
        .map(|((field, old_value), (_, new_value))| FieldChange {
            field,
            old_value,
            new_value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::sea_orm_active_enums::{AssetStatus, Position};
    use chrono::NaiveDate;

    fn asset() -> assets::Model {
        let now = Utc::now();
        assets::Model {
            id: 1,
            imei1: Some("111".into()),
            imei2: Some("222".into()),
            serial_number: Some("SN".into()),
            mac_address: None,
            iccid: None,
            carrier: None,
            document: None,
            holder_name: None,
            position: Position::StreetVendor,
            responsible: Some("Warehouse".into()),
            identification: Some("1065".into()),
            name: Some("POS".into()),
            category_id: Some(1),
            brand_id: Some(2),
            status: AssetStatus::Confirmed,
            zone: "Valledupar".into(),
            observation: "VERIFICADO".into(),
            point_of_sale: None,
            cost_center_code: None,
            cost_center_name: None,
            warehouse_exit_date: None,
            confirmed_on: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn identical_rows_have_no_changes() {
        assert!(diff(&asset(), &asset()).is_empty());
    }

    #[test]
    fn reports_each_changed_field_once() {
        let before = asset();
        let after = assets::Model {
            holder_name: Some("Ana Perez".into()),
            status: AssetStatus::Assigned,
            zone: "Bosconia".into(),
            ..before.clone()
        };

        let changes = diff(&before, &after);
        let fields: Vec<_> = changes.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["holder_name", "status", "zone"]);
        assert_eq!(changes[1].old_value.as_deref(), Some("confirmed"));
        assert_eq!(changes[1].new_value.as_deref(), Some("assigned"));
        assert_eq!(changes[0].old_value, None);
    }

    #[test]
    fn timestamps_are_not_tracked() {
        let before = asset();
        let after = assets::Model {
            updated_at: before.updated_at + chrono::Duration::hours(1),
            ..before.clone()
        };
        assert!(diff(&before, &after).is_empty());
    }
}
