use std::collections::HashMap;

use bson::Bson;
use bson::oid::ObjectId;

use super::types::FieldMapping;

/// Per-query-type configuration: how each filterable field compiles.
/// Caller-owned and static; the compiler only reads it.
pub type MappingTable<C> = HashMap<String, FieldMapping<C>>;

/// Coarse mapping classification used when partitioning top-level keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MappingKind {
    Match,
    CustomCondition,
    Pipeline,
    Disabled,
}

/// Resolves a field's mapping kind. Unmapped fields default to a direct
/// match under their own name.
pub(crate) fn kind_of<C>(mapping: &MappingTable<C>, field: &str) -> MappingKind {
    match mapping.get(field) {
        None | Some(FieldMapping::Match { .. }) => MappingKind::Match,
        Some(FieldMapping::CustomCondition(_)) => MappingKind::CustomCondition,
        Some(FieldMapping::Pipeline(_)) => MappingKind::Pipeline,
        Some(FieldMapping::Disabled) => MappingKind::Disabled,
    }
}

/// Builds direct match mappings for a list of field names.
pub fn fields_one_to_one<C>(fields: &[&str]) -> MappingTable<C> {
    fields
        .iter()
        .map(|field| ((*field).to_string(), FieldMapping::renamed(*field)))
        .collect()
}

/// Builds match mappings whose string operands are parsed into ObjectIds.
/// Unparseable values compile to no constraint rather than an error.
pub fn object_id_fields<C>(fields: &[&str]) -> MappingTable<C> {
    fields
        .iter()
        .map(|field| {
            let mapping = FieldMapping::Match {
                key: Some((*field).to_string()),
                format: Some(Box::new(|value: &Bson, _filters: &bson::Document, _ctx: &C| match value {
                    Bson::String(raw) => ObjectId::parse_str(raw).ok().map(Bson::ObjectId),
                    Bson::ObjectId(id) => Some(Bson::ObjectId(*id)),
                    _ => None,
                })),
            };
            ((*field).to_string(), mapping)
        })
        .collect()
}

/// Custom-condition mapping for free-text search: compiles a string operand
/// into a case-insensitive `$or` of `$regex` clauses over `fields`. The
/// search term is regex-escaped first. Empty or non-string operands compile
/// to no constraint.
#[cfg(feature = "regex")]
pub fn search_fields<C>(fields: &[&str]) -> FieldMapping<C> {
    let fields: Vec<String> = fields.iter().map(|field| (*field).to_string()).collect();
    FieldMapping::custom(move |value: &Bson, _filters: &bson::Document, _ctx: &C| {
        let Bson::String(term) = value else {
            return bson::Document::new();
        };
        if term.is_empty() {
            return bson::Document::new();
        }
        let pattern = regex::escape(term);
        let clauses: Vec<Bson> = fields
            .iter()
            .map(|field| {
                let mut clause = bson::Document::new();
                clause.insert(
                    field.clone(),
                    bson::doc! { "$regex": pattern.clone(), "$options": "i" },
                );
                Bson::Document(clause)
            })
            .collect();
        bson::doc! { "$or": clauses }
    })
}
