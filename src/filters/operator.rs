use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// Whitelisted comparison operators usable as `field_operator` suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Ne,
    All,
}

impl Operator {
    pub const ALL_OPERATORS: [Self; 8] =
        [Self::Gt, Self::Gte, Self::Lt, Self::Lte, Self::In, Self::Nin, Self::Ne, Self::All];

    pub fn parse(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "in" => Self::In,
            "nin" => Self::Nin,
            "ne" => Self::Ne,
            "all" => Self::All,
            _ => return None,
        })
    }

    /// The suffix form used in compound filter keys.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::Nin => "nin",
            Self::Ne => "ne",
            Self::All => "all",
        }
    }

    /// The `$`-prefixed key the condition document uses.
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::In => "$in",
            Self::Nin => "$nin",
            Self::Ne => "$ne",
            Self::All => "$all",
        }
    }

    /// Set-membership operators only accept array operands.
    pub const fn requires_array(self) -> bool {
        matches!(self, Self::In | Self::Nin | Self::All)
    }
}

/// Splits a compound `field_operator` key into field name and operator.
///
/// The operator is the segment after the last underscore; the remaining
/// prefix (which may itself contain underscores) is the field name. A key
/// without an underscore, or with nothing after the last one, carries no
/// operator.
///
/// # Errors
/// Returns `InvalidOperator` when the suffix is present but not whitelisted.
pub fn split_operator(key: &str) -> Result<(&str, Option<Operator>), FilterError> {
    match key.rsplit_once('_') {
        Some((field, "")) => Ok((field, None)),
        Some((field, suffix)) => match Operator::parse(suffix) {
            Some(op) => Ok((field, Some(op))),
            None => Err(FilterError::InvalidOperator {
                operator: suffix.to_string(),
                field: field.to_string(),
            }),
        },
        None => Ok((key, None)),
    }
}
