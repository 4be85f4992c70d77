// API request/response models and form validation

pub mod asset;
pub mod movement;
pub mod reference;
pub mod report;
pub mod user;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field-level validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Ok when no message was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Trims a submitted value and maps blank input to `None`
pub fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn check_required(errors: &mut FieldErrors, field: &str, value: &Option<String>) {
    if value.is_none() {
        errors.add(field, "This field is required.");
    }
}

pub(crate) fn check_max_len(
    errors: &mut FieldErrors,
    field: &str,
    value: &Option<String>,
    max: usize,
) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.add(
                field,
                format!("Ensure this value has at most {} characters.", max),
            );
        }
    }
}

/// Common pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    pub const MAX_LIMIT: u64 = 500;
    pub const MAX_PAGE: u64 = 1_000_000;

    /// Page and limit clamped to sane bounds
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.clamp(1, Self::MAX_PAGE),
            limit: self.limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Pagination block returned next to list data
#[derive(Debug, Serialize, PartialEq)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(params: PaginationParams, total: u64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            total_pages: total.div_ceil(params.limit.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_trims_and_drops_blank_values() {
        assert_eq!(clean_text(Some("  IMEI  ".into())), Some("IMEI".into()));
        assert_eq!(clean_text(Some("   ".into())), None);
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn field_errors_collect_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("zone", "first");
        errors.add("zone", "second");
        assert_eq!(errors.get("zone").unwrap().len(), 2);
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn pagination_is_clamped_and_counts_pages() {
        let params = PaginationParams { page: 0, limit: 10_000 }.normalized();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, PaginationParams::MAX_LIMIT);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams { page: 3, limit: 20 };
        assert_eq!(params.offset(), 40);
        assert_eq!(PaginationInfo::new(params, 41).total_pages, 3);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let params = PaginationParams { page: u64::MAX, limit: u64::MAX }.normalized();
        assert_eq!(params.page, PaginationParams::MAX_PAGE);
        assert_eq!(
            params.offset(),
            (PaginationParams::MAX_PAGE - 1) * PaginationParams::MAX_LIMIT
        );

        let raw = PaginationParams { page: u64::MAX, limit: u64::MAX };
        assert_eq!(raw.offset(), u64::MAX);
    }
}
