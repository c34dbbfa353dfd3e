pub mod errors;
pub mod filters;
pub mod logger;

pub use crate::errors::FilterError;
pub use crate::filters::{
    CompiledResult, FieldMapping, MappingTable, Operator, Order, PipelineSource, SortSpec,
    build_sort_document, compile, fields_one_to_one, object_id_fields, order_pipeline,
    parse_filters_json, split_operator,
};
#[cfg(feature = "regex")]
pub use crate::filters::search_fields;

/// Initializes the crate's logging.
///
/// Optional: the compiler itself only logs through the `log` facade, so
/// applications with their own logger setup can ignore this.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
