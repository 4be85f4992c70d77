// Movement registration form for the traceability log

use serde::Deserialize;

use super::{check_max_len, clean_text, FieldErrors};
use crate::entity::sea_orm_active_enums::{AssetStatus, TraceabilityKind};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovementForm {
    pub kind: Option<TraceabilityKind>,
    pub zone_to: Option<String>,
    pub status_after: Option<AssetStatus>,
    pub description: Option<String>,
}

/// Query parameters for the traceability log
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceabilityQuery {
    pub asset_id: Option<i32>,
    pub kind: Option<TraceabilityKind>,
    pub limit: Option<u64>,
}

impl TraceabilityQuery {
    pub const DEFAULT_LIMIT: u64 = 100;
    pub const MAX_LIMIT: u64 = 1000;

    pub fn limit(&self) -> u64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

/// Validated movement values
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub kind: TraceabilityKind,
    pub zone_to: Option<String>,
    pub status_after: Option<AssetStatus>,
    pub description: Option<String>,
}

impl MovementForm {
    pub fn zone_to(&self) -> Option<String> {
        clean_text(self.zone_to.clone())
    }

    /// `zone_exists` tells whether the destination zone (when given) is a known zone
    pub fn clean(self, zone_exists: bool) -> Result<Movement, FieldErrors> {
        let kind = self
            .kind
            .ok_or_else(|| FieldErrors::single("kind", "This field is required."))?;
        let movement = Movement {
            kind,
            zone_to: clean_text(self.zone_to),
            status_after: self.status_after,
            description: clean_text(self.description),
        };

        let mut errors = FieldErrors::new();

        if movement.kind == TraceabilityKind::Deletion {
            errors.add("kind", "Deletions are recorded by deleting the asset.");
        }
        if movement.kind == TraceabilityKind::Transfer && movement.zone_to.is_none() {
            errors.add("zone_to", "A transfer needs a destination zone.");
        }
        if movement.kind == TraceabilityKind::StatusChange && movement.status_after.is_none() {
            errors.add("status_after", "A status change needs the new status.");
        }
        check_max_len(&mut errors, "zone_to", &movement.zone_to, 100);
        if movement.zone_to.is_some() && !zone_exists {
            errors.add("zone_to", "Select a valid zone.");
        }

        errors.into_result()?;
        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(kind: TraceabilityKind) -> MovementForm {
        MovementForm {
            kind: Some(kind),
            zone_to: None,
            status_after: None,
            description: Some("  moved by courier ".into()),
        }
    }

    #[test]
    fn traceability_limit_is_bounded() {
        let query = TraceabilityQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(query.limit(), 1);
        assert_eq!(TraceabilityQuery::default().limit(), TraceabilityQuery::DEFAULT_LIMIT);
    }

    #[test]
    fn transfer_requires_destination() {
        let errors = form(TraceabilityKind::Transfer).clean(true).unwrap_err();
        assert!(errors.contains("zone_to"));
    }

    #[test]
    fn status_change_requires_new_status() {
        let errors = form(TraceabilityKind::StatusChange).clean(true).unwrap_err();
        assert!(errors.contains("status_after"));
    }

    #[test]
    fn deletion_cannot_be_registered_as_movement() {
        let errors = form(TraceabilityKind::Deletion).clean(true).unwrap_err();
        assert!(errors.contains("kind"));
    }

    #[test]
    fn unknown_destination_zone_is_rejected() {
        let mut transfer = form(TraceabilityKind::Transfer);
        transfer.zone_to = Some("Atlantis".into());
        assert!(transfer.clean(false).unwrap_err().contains("zone_to"));
    }

    #[test]
    fn kind_is_required() {
        let errors = MovementForm::default().clean(true).unwrap_err();
        assert!(errors.contains("kind"));
    }

    #[test]
    fn valid_exit_keeps_trimmed_description() {
        let movement = form(TraceabilityKind::Exit).clean(true).unwrap();
        assert_eq!(movement.description.as_deref(), Some("moved by courier"));
    }
}
