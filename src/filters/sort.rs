use bson::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    /// The numeric direction the sort document stores.
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// One entry of an order-by argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Builds a `$sort` document from order-by entries. The last entry wins for
/// a duplicated field.
pub fn build_sort_document(specs: &[SortSpec]) -> Document {
    let mut sort = Document::new();
    for spec in specs {
        sort.insert(spec.field.clone(), spec.order.as_i32());
    }
    sort
}
