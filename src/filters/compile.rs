use bson::{Bson, Document};

use crate::errors::FilterError;

use super::mapping::{MappingKind, MappingTable, kind_of};
use super::operator::split_operator;
use super::types::{CompiledResult, FieldMapping, PipelineSource};

const AND_KEY: &str = "AND";
const OR_KEY: &str = "OR";

/// Compiles a filter tree into a flat condition document plus the pipeline
/// stages injected by pipeline-mapped fields.
///
/// `ctx` is opaque to the compiler and only handed through to mapping
/// callbacks. A `None` filter tree compiles to the empty result. The
/// compilation is pure and touches no shared state, so it is safe to call
/// concurrently from many request tasks.
///
/// # Errors
/// Returns an error for an unknown operator suffix, a non-array operand to
/// a set operator, a non-array `AND`/`OR` operand, or a pipeline-mapped
/// field combined with `AND`/`OR` at the top level.
pub fn compile<C>(
    ctx: &C,
    filters: Option<&Document>,
    mapping: &MappingTable<C>,
) -> Result<CompiledResult, FilterError> {
    let Some(filters) = filters else {
        return Ok(CompiledResult::default());
    };

    let has_boolean = filters.contains_key(AND_KEY) || filters.contains_key(OR_KEY);

    // Partition top-level keys by mapping kind. This check is deliberately
    // non-recursive: AND/OR children are handled during boolean compilation.
    let mut match_keys = Document::new();
    let mut pipeline_fields: Vec<(String, Bson)> = Vec::new();
    for (key, value) in filters.clone() {
        if key == AND_KEY || key == OR_KEY {
            match_keys.insert(key, value);
            continue;
        }
        let (field, _) = split_operator(&key)?;
        match kind_of(mapping, field) {
            MappingKind::Pipeline => {
                // Pipeline stages run after the match phase, outside the
                // condition document, so boolean composition cannot apply.
                if has_boolean {
                    return Err(FilterError::PipelineExcludesBooleanComposition {
                        field: field.to_string(),
                    });
                }
                pipeline_fields.push((field.to_string(), value));
            }
            _ => {
                match_keys.insert(key, value);
            }
        }
    }

    let conditions = build_conditions(ctx, &match_keys, mapping, filters)?;

    // Stages are emitted in the order their fields appeared in the input;
    // insertion order is significant.
    let mut pipeline: Vec<Document> = Vec::new();
    for (field, value) in &pipeline_fields {
        let Some(FieldMapping::Pipeline(source)) = mapping.get(field) else {
            continue;
        };
        match source {
            PipelineSource::Stages(stages) => pipeline.extend(stages.iter().cloned()),
            PipelineSource::Builder(build) => pipeline.extend(build(value, filters, ctx)),
        }
    }

    log::debug!(
        "compiled filter: {} condition keys, {} pipeline stages",
        conditions.len(),
        pipeline.len()
    );

    Ok(CompiledResult { conditions, pipeline })
}

/// Recursively compiles one filter node into a condition document, carrying
/// the accumulator through instead of mutating shared state.
fn build_conditions<C>(
    ctx: &C,
    node: &Document,
    mapping: &MappingTable<C>,
    filters: &Document,
) -> Result<Document, FilterError> {
    let mut acc = Document::new();
    for (key, value) in node.clone() {
        if key == AND_KEY || key == OR_KEY {
            let query_key = if key == AND_KEY { "$and" } else { "$or" };
            let Bson::Array(branches) = value else {
                return Err(FilterError::InvalidBooleanOperand {
                    operator: query_key.to_string(),
                });
            };
            let mut compiled = Vec::with_capacity(branches.len());
            for branch in branches {
                let Bson::Document(child) = branch else {
                    return Err(FilterError::InvalidBooleanOperand {
                        operator: query_key.to_string(),
                    });
                };
                compiled.push(Bson::Document(build_conditions(ctx, &child, mapping, filters)?));
            }
            acc.insert(query_key, Bson::Array(compiled));
            continue;
        }

        let (field, operator) = split_operator(&key)?;
        match mapping.get(field) {
            Some(FieldMapping::Disabled) => {}
            Some(FieldMapping::Pipeline(_)) => {
                // Pipeline fields are only recognized at the top level; inside
                // a boolean tree they cannot inject stages.
                log::warn!("pipeline-mapped field \"{field}\" inside a boolean tree is ignored");
            }
            Some(FieldMapping::CustomCondition(format)) => {
                // Spread at the top level, not nested under the field key.
                for (extra_key, extra_value) in format(&value, filters, ctx) {
                    acc.insert(extra_key, extra_value);
                }
            }
            entry @ (Some(FieldMapping::Match { .. }) | None) => {
                let (target, format) = match entry {
                    Some(FieldMapping::Match { key, format }) => {
                        (key.as_deref().unwrap_or(field), format.as_ref())
                    }
                    _ => (field, None),
                };
                let mut condition = match format {
                    Some(format) => match format(&value, filters, ctx) {
                        Some(formatted) => formatted,
                        // No constraint after formatting; drop the field.
                        None => continue,
                    },
                    None => value,
                };
                if let Some(op) = operator {
                    if op.requires_array() && !matches!(condition, Bson::Array(_)) {
                        return Err(FilterError::OperatorRequiresArray {
                            field: field.to_string(),
                        });
                    }
                    let mut wrapped = Document::new();
                    wrapped.insert(op.query_key(), condition);
                    condition = Bson::Document(wrapped);
                }
                if let Some(previous) = acc.get(target) {
                    condition = merge_previous(condition, previous.clone());
                }
                acc.insert(target, condition);
            }
        }
    }
    Ok(acc)
}

/// Range queries arrive as independent keys (`a_gte`, `a_lte`) resolving to
/// the same target key; their partial condition documents are shallow-merged
/// with the previously stored keys winning on conflict. Non-document
/// collisions are replaced by the newer condition.
fn merge_previous(condition: Bson, previous: Bson) -> Bson {
    match (condition, previous) {
        (Bson::Document(mut merged), Bson::Document(previous)) => {
            for (key, value) in previous {
                merged.insert(key, value);
            }
            Bson::Document(merged)
        }
        (condition, _) => condition,
    }
}
