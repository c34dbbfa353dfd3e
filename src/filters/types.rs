use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// Value formatter for match mappings. Receives the raw operand, the full
/// filter tree, and the caller's execution context. Returning `None` drops
/// the field from the compiled conditions entirely ("no constraint").
pub type FormatFn<C> = Box<dyn Fn(&Bson, &Document, &C) -> Option<Bson> + Send + Sync>;

/// Builder for custom-condition mappings. The returned document is merged
/// at the top level of the condition accumulator, not nested under the
/// field's key.
pub type ConditionFn<C> = Box<dyn Fn(&Bson, &Document, &C) -> Document + Send + Sync>;

/// Builder for pipeline mappings, producing the stages to inject.
pub type PipelineFn<C> = Box<dyn Fn(&Bson, &Document, &C) -> Vec<Document> + Send + Sync>;

/// How one filterable field compiles.
///
/// `C` is the caller's execution context type; the compiler never inspects
/// it and only passes it through to the callbacks above. Unmapped fields
/// behave as `Match { key: None, format: None }`.
pub enum FieldMapping<C> {
    /// Field is silently dropped from compilation.
    Disabled,
    /// Compiles to a condition stored under `key` (the field name when
    /// `None`), optionally transforming the operand first.
    Match { key: Option<String>, format: Option<FormatFn<C>> },
    /// Produces an entire condition sub-document spread at the top level.
    CustomCondition(ConditionFn<C>),
    /// Injects aggregation pipeline stages instead of match conditions.
    Pipeline(PipelineSource<C>),
}

/// Stage source for a pipeline mapping: a fixed stage list or a builder
/// invoked with the field's operand.
pub enum PipelineSource<C> {
    Stages(Vec<Document>),
    Builder(PipelineFn<C>),
}

impl<C> FieldMapping<C> {
    /// Match mapping that stores the condition under a different key.
    pub fn renamed(key: impl Into<String>) -> Self {
        Self::Match { key: Some(key.into()), format: None }
    }

    /// Match mapping with a value formatter, keeping the field's own key.
    pub fn formatted<F>(format: F) -> Self
    where
        F: Fn(&Bson, &Document, &C) -> Option<Bson> + Send + Sync + 'static,
    {
        Self::Match { key: None, format: Some(Box::new(format)) }
    }

    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&Bson, &Document, &C) -> Document + Send + Sync + 'static,
    {
        Self::CustomCondition(Box::new(format))
    }

    /// Pipeline mapping with a fixed stage list.
    pub fn stages(stages: Vec<Document>) -> Self {
        Self::Pipeline(PipelineSource::Stages(stages))
    }

    /// Pipeline mapping whose stages depend on the operand.
    pub fn pipeline<F>(build: F) -> Self
    where
        F: Fn(&Bson, &Document, &C) -> Vec<Document> + Send + Sync + 'static,
    {
        Self::Pipeline(PipelineSource::Builder(Box::new(build)))
    }
}

impl<C> std::fmt::Debug for FieldMapping<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Match { key, format } => f
                .debug_struct("Match")
                .field("key", key)
                .field("format", &format.is_some())
                .finish(),
            Self::CustomCondition(_) => f.write_str("CustomCondition"),
            Self::Pipeline(PipelineSource::Stages(stages)) => {
                f.debug_tuple("Pipeline").field(stages).finish()
            }
            Self::Pipeline(PipelineSource::Builder(_)) => f.write_str("Pipeline(Builder)"),
        }
    }
}

/// The output of [`compile`](super::compile): a flat condition document the
/// caller embeds as its first `$match`, plus the ordered aggregation stages
/// to run after it. Built fresh per call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledResult {
    pub conditions: Document,
    pub pipeline: Vec<Document>,
}

impl CompiledResult {
    /// True when neither conditions nor pipeline stages were produced.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.pipeline.is_empty()
    }
}
