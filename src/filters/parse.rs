use bson::{Bson, Document};

use crate::errors::FilterError;

/// Parses a JSON request body into a filter tree document.
///
/// # Errors
/// Returns an error if the string is not valid JSON, cannot be represented
/// as BSON, or is not a JSON object at the top level.
pub fn parse_filters_json(json: &str) -> Result<Document, FilterError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let bson = Bson::try_from(value).map_err(|e| FilterError::Bson(e.to_string()))?;
    match bson {
        Bson::Document(doc) => Ok(doc),
        _ => Err(FilterError::Bson("filter must be a JSON object".to_string())),
    }
}
