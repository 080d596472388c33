//! Comparison operators for field specifications.

use std::cmp::Ordering;

/// Operator applied by a [`FieldSpec`](crate::FieldSpec).
///
/// - **Any type**: `Eq`, `Ne`
/// - **Number**: `Gt`, `Gte`, `Lt`, `Lte`
/// - **String**: `StartsWith`, `EndsWith`, `Contains`, `Regex`
/// - **Enum**: `In`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    EndsWith,
    Contains,
    Regex,
    /// Enum discriminant is one of a set.
    In,
}

impl Op {
    /// Returns `true` if this operator is defined for values of `value_type`.
    ///
    /// `value_type` is one of the names returned by
    /// [`Value::type_name`](crate::Value::type_name).
    pub fn supports(self, value_type: &str) -> bool {
        match self {
            Op::Eq | Op::Ne => matches!(value_type, "string" | "number" | "enum" | "bool"),
            Op::Gt | Op::Gte | Op::Lt | Op::Lte => value_type == "number",
            Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex => value_type == "string",
            Op::In => value_type == "enum",
        }
    }

    /// Maps an ordering between field and comparison value to a verdict.
    ///
    /// Operators that are not ordering-based always yield `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering.is_eq(),
            Op::Ne => ordering.is_ne(),
            Op::Gt => ordering.is_gt(),
            Op::Gte => ordering.is_ge(),
            Op::Lt => ordering.is_lt(),
            Op::Lte => ordering.is_le(),
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::StartsWith => "starts_with",
            Op::EndsWith => "ends_with",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::In => "in",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
