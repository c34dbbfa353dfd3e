use bson::{Bson, Document};

const GEO_NEAR: &str = "$geoNear";
const MATCH: &str = "$match";

/// Reorders an aggregation pipeline to satisfy the engine's stage-ordering
/// constraints: a `$geoNear` stage must come first and must carry its own
/// filter predicate instead of relying on a preceding `$match`.
///
/// When a `$geoNear` stage is present, the first `$match` stage encountered
/// is removed and its predicate folded into the geo stage's `query`
/// sub-document (folded keys win over pre-existing `query` keys). All other
/// stages keep their relative input order. Pipelines without a geo stage are
/// returned unchanged, so the function is idempotent on them.
pub fn order_pipeline(pipeline: Vec<Document>) -> Vec<Document> {
    if pipeline.is_empty() {
        return pipeline;
    }

    let Some(first_geo) = pipeline.iter().position(|stage| stage.contains_key(GEO_NEAR)) else {
        return pipeline;
    };

    let mut ordered: Vec<Document> = Vec::with_capacity(pipeline.len());
    let mut folded = Document::new();
    // Index within `ordered` of the geo stage that receives the fold: the
    // first one by input order. Later geo stages are prepended ahead of it.
    let mut target = 0usize;
    for (index, stage) in pipeline.into_iter().enumerate() {
        if stage.contains_key(GEO_NEAR) {
            ordered.insert(0, stage);
            if index == first_geo {
                target = 0;
            } else {
                target += 1;
            }
            continue;
        }

        // Capture the first $match and discard it from the output; its
        // predicate moves into the geo stage below.
        if folded.is_empty()
            && let Ok(predicate) = stage.get_document(MATCH)
        {
            folded = predicate.clone();
            continue;
        }

        ordered.push(stage);
    }

    if !folded.is_empty()
        && let Some(Bson::Document(geo)) = ordered[target].get_mut(GEO_NEAR)
    {
        let mut query = match geo.get_document("query") {
            Ok(existing) => existing.clone(),
            Err(_) => Document::new(),
        };
        for (key, value) in folded {
            query.insert(key, value);
        }
        geo.insert("query", query);
    }

    ordered
}
