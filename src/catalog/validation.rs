use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::{CatalogError, CatalogResult};

/// Runs the derive validators and folds every field error into a single
/// `Validation` message, fields in name order, joined with `"; "`.
pub fn validate<T: Validate>(value: &T) -> CatalogResult<()> {
    value
        .validate()
        .map_err(|errors| CatalogError::Validation(describe(&errors)))
}

pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, Vec<ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs.clone()))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |err| message_for(field, err)))
        .collect::<Vec<_>>()
        .join("; ")
}

fn message_for(field: &str, err: &ValidationError) -> String {
    let min = err.params.get("min").and_then(Value::as_f64);
    match err.code.as_ref() {
        "required" => format!("{} is required", field),
        "length" | "range" if min == Some(1.0) => format!("{} is required", field),
        "length" => match min {
            Some(min) => format!("{} must be at least {} characters long", field, min),
            None => format!("{} is not valid", field),
        },
        "range" => match min {
            Some(min) => format!("{} must be at least {}", field, min),
            None => format!("{} is not valid", field),
        },
        "email" => format!("{} must be a valid email", field),
        "must_match" => {
            let other = err.params.get("other").and_then(Value::as_str).unwrap_or("confirmation");
            format!("{} must match {}", field, other)
        }
        _ => format!("{} is not valid", field),
    }
}
