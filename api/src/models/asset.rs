// Asset form: submitted values, validation and the assignment status rule

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use super::{check_max_len, check_required, clean_text, FieldErrors, PaginationInfo};
use crate::entity::sea_orm_active_enums::{AssetStatus, Position};
use crate::entity::{asset_history, asset_traceability, assets, brands};

pub const DEFAULT_ZONE: &str = "Valledupar";
pub const DEFAULT_OBSERVATION: &str = "VERIFICADO";

/// Fields an assigner may change on an existing asset
pub const ASSIGNMENT_FIELDS: &[&str] = &[
    "document",
    "holder_name",
    "position",
    "responsible",
    "identification",
    "point_of_sale",
    "cost_center_code",
    "cost_center_name",
    "observation",
];

pub const POSITION_CHOICES: &[Position] = &[
    Position::StreetVendor,
    Position::Vendor,
    Position::Administrative,
];

/// Whether the form creates a new asset or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

impl FormMode {
    /// Decommissioning is only offered when editing
    pub fn status_choices(self) -> &'static [AssetStatus] {
        match self {
            FormMode::Create => &[AssetStatus::Confirmed, AssetStatus::Assigned],
            FormMode::Update => &[
                AssetStatus::Confirmed,
                AssetStatus::Assigned,
                AssetStatus::Decommissioned,
            ],
        }
    }
}

/// Asset fields as submitted by the client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetForm {
    pub imei1: Option<String>,
    pub imei2: Option<String>,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
    pub iccid: Option<String>,
    pub carrier: Option<String>,
    pub document: Option<String>,
    pub holder_name: Option<String>,
    pub position: Option<Position>,
    pub responsible: Option<String>,
    pub identification: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub status: Option<AssetStatus>,
    pub zone: Option<String>,
    pub observation: Option<String>,
    pub point_of_sale: Option<String>,
    pub cost_center_code: Option<String>,
    pub cost_center_name: Option<String>,
    pub warehouse_exit_date: Option<NaiveDate>,
}

/// Reference rows looked up for the submitted ids and zone name
#[derive(Debug, Clone, Default)]
pub struct ReferenceCheck {
    pub zone_exists: bool,
    pub category_exists: bool,
    pub brand: Option<brands::Model>,
}

/// Validated asset values with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFields {
    pub imei1: Option<String>,
    pub imei2: Option<String>,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
    pub iccid: Option<String>,
    pub carrier: Option<String>,
    pub document: Option<String>,
    pub holder_name: Option<String>,
    pub position: Position,
    pub responsible: Option<String>,
    pub identification: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub status: AssetStatus,
    pub zone: String,
    pub observation: String,
    pub point_of_sale: Option<String>,
    pub cost_center_code: Option<String>,
    pub cost_center_name: Option<String>,
    pub warehouse_exit_date: Option<NaiveDate>,
}

impl AssetForm {
    /// Zone name after applying the default
    pub fn effective_zone(&self) -> String {
        clean_text(self.zone.clone()).unwrap_or_else(|| DEFAULT_ZONE.to_string())
    }

    /// Validates the submission against the mode's choices and the looked-up references
    pub fn clean(self, mode: FormMode, refs: &ReferenceCheck) -> Result<AssetFields, FieldErrors> {
        let zone = self.effective_zone();
        let fields = AssetFields {
            imei1: clean_text(self.imei1),
            imei2: clean_text(self.imei2),
            serial_number: clean_text(self.serial_number),
            mac_address: clean_text(self.mac_address),
            iccid: clean_text(self.iccid),
            carrier: clean_text(self.carrier),
            document: clean_text(self.document),
            holder_name: clean_text(self.holder_name),
            position: self.position.unwrap_or_default(),
            responsible: clean_text(self.responsible),
            identification: clean_text(self.identification),
            name: clean_text(self.name),
            category_id: self.category_id,
            brand_id: self.brand_id,
            status: self.status.unwrap_or_default(),
            zone,
            observation: clean_text(self.observation)
                .unwrap_or_else(|| DEFAULT_OBSERVATION.to_string()),
            point_of_sale: clean_text(self.point_of_sale),
            cost_center_code: clean_text(self.cost_center_code),
            cost_center_name: clean_text(self.cost_center_name),
            warehouse_exit_date: self.warehouse_exit_date,
        };

        let mut errors = FieldErrors::new();

        for (field, value) in [
            ("name", &fields.name),
            ("serial_number", &fields.serial_number),
            ("imei1", &fields.imei1),
            ("imei2", &fields.imei2),
            ("responsible", &fields.responsible),
            ("identification", &fields.identification),
        ] {
            check_required(&mut errors, field, value);
        }

        for (field, value) in [
            ("imei1", &fields.imei1),
            ("imei2", &fields.imei2),
            ("serial_number", &fields.serial_number),
            ("mac_address", &fields.mac_address),
            ("iccid", &fields.iccid),
            ("carrier", &fields.carrier),
            ("document", &fields.document),
            ("responsible", &fields.responsible),
            ("identification", &fields.identification),
            ("name", &fields.name),
            ("point_of_sale", &fields.point_of_sale),
            ("cost_center_code", &fields.cost_center_code),
            ("cost_center_name", &fields.cost_center_name),
        ] {
            check_max_len(&mut errors, field, value, 100);
        }
        check_max_len(&mut errors, "holder_name", &fields.holder_name, 200);

        if fields.zone.chars().count() > 100 {
            errors.add("zone", "Ensure this value has at most 100 characters.");
        } else if !refs.zone_exists {
            errors.add("zone", "Select a valid zone.");
        }

        match fields.category_id {
            None => errors.add("category_id", "This field is required."),
            Some(_) if !refs.category_exists => {
                errors.add("category_id", "Select a valid category.")
            }
            Some(_) => {}
        }

        match (fields.brand_id, &refs.brand) {
            (None, _) => errors.add("brand_id", "This field is required."),
            (Some(_), None) => errors.add("brand_id", "Select a valid brand."),
            (Some(_), Some(brand)) => {
                if fields.category_id.is_some() && brand.category_id != fields.category_id {
                    errors.add(
                        "brand_id",
                        "Select a brand that belongs to the selected category.",
                    );
                }
            }
        }

        if !mode.status_choices().contains(&fields.status) {
            errors.add("status", "Select a valid choice.");
        }

        errors.into_result()?;
        Ok(fields)
    }
}

impl AssetFields {
    /// Both a holder document and a holder name are present
    pub fn has_holder(&self) -> bool {
        self.document.is_some() && self.holder_name.is_some()
    }

    /// A new asset with a holder is always assigned; an edited confirmed asset
    /// becomes assigned once it has a holder
    pub fn apply_assignment_rule(&mut self, mode: FormMode) {
        if !self.has_holder() {
            return;
        }
        match mode {
            FormMode::Create => self.status = AssetStatus::Assigned,
            FormMode::Update => {
                if self.status == AssetStatus::Confirmed {
                    self.status = AssetStatus::Assigned;
                }
            }
        }
    }

    /// Existing row with the submitted values applied
    pub fn applied_to(&self, before: &assets::Model) -> assets::Model {
        assets::Model {
            imei1: self.imei1.clone(),
            imei2: self.imei2.clone(),
            serial_number: self.serial_number.clone(),
            mac_address: self.mac_address.clone(),
            iccid: self.iccid.clone(),
            carrier: self.carrier.clone(),
            document: self.document.clone(),
            holder_name: self.holder_name.clone(),
            position: self.position,
            responsible: self.responsible.clone(),
            identification: self.identification.clone(),
            name: self.name.clone(),
            category_id: self.category_id,
            brand_id: self.brand_id,
            status: self.status,
            zone: self.zone.clone(),
            observation: self.observation.clone(),
            point_of_sale: self.point_of_sale.clone(),
            cost_center_code: self.cost_center_code.clone(),
            cost_center_name: self.cost_center_name.clone(),
            warehouse_exit_date: self.warehouse_exit_date,
            ..before.clone()
        }
    }

    /// Marks every editable column as set
    pub fn write_into(self, active: &mut assets::ActiveModel) {
        active.imei1 = Set(self.imei1);
        active.imei2 = Set(self.imei2);
        active.serial_number = Set(self.serial_number);
        active.mac_address = Set(self.mac_address);
        active.iccid = Set(self.iccid);
        active.carrier = Set(self.carrier);
        active.document = Set(self.document);
        active.holder_name = Set(self.holder_name);
        active.position = Set(self.position);
        active.responsible = Set(self.responsible);
        active.identification = Set(self.identification);
        active.name = Set(self.name);
        active.category_id = Set(self.category_id);
        active.brand_id = Set(self.brand_id);
        active.status = Set(self.status);
        active.zone = Set(self.zone);
        active.observation = Set(self.observation);
        active.point_of_sale = Set(self.point_of_sale);
        active.cost_center_code = Set(self.cost_center_code);
        active.cost_center_name = Set(self.cost_center_name);
        active.warehouse_exit_date = Set(self.warehouse_exit_date);
    }

    /// Insert model for a new asset; the confirmation date is always today
    pub fn into_new_active_model(self, now: DateTime<Utc>) -> assets::ActiveModel {
        let mut active = assets::ActiveModel {
            confirmed_on: Set(now.date_naive()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        self.write_into(&mut active);
        active
    }
}

/// Filters shared by the asset list, reports and exports
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFilter {
    pub status: Option<AssetStatus>,
    pub zone: Option<String>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    /// Matches name, IMEIs, serial number, document and holder name
    #[serde(alias = "q")]
    pub search: Option<String>,
}

impl AssetFilter {
    pub fn normalized(self) -> Self {
        Self {
            zone: clean_text(self.zone),
            search: clean_text(self.search),
            ..self
        }
    }
}

/// One page of assets
#[derive(Debug, Serialize)]
pub struct AssetListResponse {
    pub assets: Vec<assets::Model>,
    pub pagination: PaginationInfo,
}

/// Home page: pending notices followed by the asset list
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub messages: Vec<String>,
    #[serde(flatten)]
    pub list: AssetListResponse,
}

/// Change history and lifecycle events of one asset, newest first
#[derive(Debug, Serialize)]
pub struct AssetHistoryResponse {
    pub asset: assets::Model,
    pub history: Vec<asset_history::Model>,
    pub movements: Vec<asset_traceability::Model>,
}
