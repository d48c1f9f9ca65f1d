//! Request body validation: required fields present, then typed decoding.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Require a JSON object carrying every field in `required` (null counts as missing),
    /// then decode it into `T`. Both failures are 400s.
    pub fn parse<T: DeserializeOwned>(body: Value, required: &[&str]) -> Result<T, AppError> {
        let map = body_to_map(body)?;
        Self::require(&map, required)?;
        serde_json::from_value(Value::Object(map)).map_err(|e| AppError::BadRequest(e.to_string()))
    }

    pub fn require(body: &Map<String, Value>, required: &[&str]) -> Result<(), AppError> {
        for field in required {
            match body.get(*field) {
                None | Some(Value::Null) => {
                    return Err(AppError::BadRequest(format!("{} is required", field)));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
