// Raw JSON request bodies, decoded only after the role check has passed

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{InventoryError, InventoryResult};
use crate::models::{FieldErrors, NON_FIELD_ERRORS};

/// Buffered request body. Decoding errors become field-level validation errors.
#[derive(Debug, Clone, Default)]
pub struct JsonBody(Bytes);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = InventoryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Bytes::from_request(req, state)
            .await
            .map(JsonBody)
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    InventoryError::PayloadTooLarge(rejection.body_text())
                } else {
                    InventoryError::InvalidRequest(rejection.body_text())
                }
            })
    }
}

impl JsonBody {
    pub fn from_json(value: &Value) -> Self {
        JsonBody(Bytes::from(value.to_string()))
    }

    /// Decodes the body into a form. An empty body reads as `{}`.
    pub fn parse<T: DeserializeOwned>(&self) -> InventoryResult<T> {
        let value = if self.0.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&self.0).map_err(|e| {
                FieldErrors::single(NON_FIELD_ERRORS, format!("Malformed JSON body: {}", e))
            })?
        };

        serde_json::from_value(value.clone())
            .map_err(|err| decode_errors::<T>(&value, &err).into())
    }
}

/// Attributes a decoding failure to the fields that cannot be decoded on their own
fn decode_errors<T: DeserializeOwned>(value: &Value, err: &serde_json::Error) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match value {
        Value::Object(fields) => {
            for (name, field) in fields {
                let alone = Value::Object(Map::from_iter([(name.clone(), field.clone())]));
                if let Err(field_err) = serde_json::from_value::<T>(alone) {
                    errors.add(name, field_message(&field_err));
                }
            }
        }
        _ => errors.add(NON_FIELD_ERRORS, "Expected a JSON object."),
    }

    if errors.is_empty() {
        errors.add(NON_FIELD_ERRORS, field_message(err));
    }
    errors
}

fn field_message(err: &serde_json::Error) -> String {
    let text = err.to_string();
    if text.starts_with("unknown variant") {
        format!("Select a valid choice. {}", text)
    } else {
        format!("Enter a valid value. {}", text)
    }
}
