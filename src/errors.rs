use thiserror::Error;

/// Validation failures raised while compiling a filter tree.
///
/// Every variant is a client/programmer input error: compilation either
/// fully succeeds or fails atomically before any query is issued.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("\"{operator}\" is not a valid operator on field \"{field}\"")]
    InvalidOperator { operator: String, field: String },

    #[error("field \"{field}\" must have an array value")]
    OperatorRequiresArray { field: String },

    #[error("invalid filter supplied to {operator}")]
    InvalidBooleanOperand { operator: String },

    #[error("filter \"{field}\" is a pipeline filter, which disables AND and OR")]
    PipelineExcludesBooleanComposition { field: String },

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BSON: {0}")]
    Bson(String),
}
