//! String-backed enums stored in entity columns

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Permission level attached to every user account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "logistics")]
    Logistics,
    #[default]
    #[sea_orm(string_value = "read_only")]
    ReadOnly,
    #[sea_orm(string_value = "assigner")]
    Assigner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Logistics => "logistics",
            Role::ReadOnly => "read_only",
            Role::Assigner => "assigner",
        }
    }

    /// Allow-list check used by every gated operation
    pub fn is_one_of(&self, allowed: &[Role]) -> bool {
        allowed.contains(self)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Logistics => "Logistics",
            Role::ReadOnly => "Read-only",
            Role::Assigner => "Assigner",
        }
    }
}

/// Lifecycle state of an asset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(100))")]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "assigned")]
    Assigned,
    #[sea_orm(string_value = "decommissioned")]
    Decommissioned,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Confirmed => "confirmed",
            AssetStatus::Assigned => "assigned",
            AssetStatus::Decommissioned => "decommissioned",
        }
    }
}

/// Job position (cargo) of the asset holder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(100))")]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    #[sea_orm(string_value = "street_vendor")]
    StreetVendor,
    #[sea_orm(string_value = "vendor")]
    Vendor,
    #[sea_orm(string_value = "administrative")]
    Administrative,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::StreetVendor => "street_vendor",
            Position::Vendor => "vendor",
            Position::Administrative => "administrative",
        }
    }
}

/// Kind of lifecycle event recorded in the traceability log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "snake_case")]
pub enum TraceabilityKind {
    #[sea_orm(string_value = "ingress")]
    Ingress,
    #[sea_orm(string_value = "exit")]
    Exit,
    #[sea_orm(string_value = "transfer")]
    Transfer,
    #[sea_orm(string_value = "status_change")]
    StatusChange,
    #[sea_orm(string_value = "assignment")]
    Assignment,
    #[sea_orm(string_value = "deletion")]
    Deletion,
}

impl TraceabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceabilityKind::Ingress => "ingress",
            TraceabilityKind::Exit => "exit",
            TraceabilityKind::Transfer => "transfer",
            TraceabilityKind::StatusChange => "status_change",
            TraceabilityKind::Assignment => "assignment",
            TraceabilityKind::Deletion => "deletion",
        }
    }
}
