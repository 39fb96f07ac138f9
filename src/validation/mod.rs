//! JSON Schema validation for parsed network rows.
//!
//! Rows are validated after parsing and before typed extraction, using
//! JSON Schema Draft 7. The schema checks the table shape only:
//!
//! - `regulator` and `target` are non-empty strings
//! - `beta.sign.sum` is a decimal string, or empty
//!
//! An empty score passes the schema on purpose: it marks an incomplete
//! prediction, which extraction skips and the combine drops, instead of a
//! malformed file.
//!
//! The schema is embedded at compile time from `schemas/network-record.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use grnmerge::{validate_network_record, is_valid_network_record};
//!
//! let row = json!({
//!     "regulator": "RFXANK",
//!     "target": "HLA-DRA",
//!     "beta.sign.sum": "-12.0"
//! });
//! assert!(validate_network_record(&row).is_ok());
//! ```

use serde_json::Value;

/// Validate a JSON object against a JSON schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Simpler variant: just true/false.
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a parsed row against the network-record schema.
pub fn validate_network_record(data: &Value) -> Result<(), Vec<String>> {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/network-record.json"))
        .expect("Invalid embedded schema");
    validate(&schema, data)
}

/// Quick check against the network-record schema.
pub fn is_valid_network_record(data: &Value) -> bool {
    let schema: Value = serde_json::from_str(include_str!("../../schemas/network-record.json"))
        .expect("Invalid embedded schema");
    is_valid(&schema, data)
}
