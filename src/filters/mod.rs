// Submodules for separation of concerns
mod compile;
mod mapping;
mod operator;
mod parse;
mod pipeline;
mod sort;
mod types;

// Public API re-exports
pub use compile::compile;
#[cfg(feature = "regex")]
pub use mapping::search_fields;
pub use mapping::{MappingTable, fields_one_to_one, object_id_fields};
pub use operator::{Operator, split_operator};
pub use parse::parse_filters_json;
pub use pipeline::order_pipeline;
pub use sort::{Order, SortSpec, build_sort_document};
pub use types::{
    CompiledResult, ConditionFn, FieldMapping, FormatFn, PipelineFn, PipelineSource,
};
