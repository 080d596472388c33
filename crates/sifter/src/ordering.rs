//! Sort keys for [`Query`](crate::Query) results.

use std::cmp::Ordering;

use crate::record::Record;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    #[default]
    Asc,
    Desc,
}

impl Dir {
    /// Applies this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort key: a record field and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub dir: Dir,
}

impl OrderBy {
    /// Sort key on `field` in direction `dir`.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Ascending sort key.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Descending sort key.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Compares two field values in this key's direction.
    ///
    /// Missing values stay last in both directions.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match (a, b) {
            (Value::None, _) | (_, Value::None) => compare_values(a, b),
            _ => self.dir.apply(compare_values(a, b)),
        }
    }
}

/// Position of a value's type in the ascending order.
fn type_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Enum(_) => 3,
        Value::None => 4,
    }
}

/// Ascending comparison of two values.
///
/// This is a total order. Values of one type compare naturally, NaN after
/// every other number. Values of different types are ordered by type:
/// bool, number, string, enum, and [`Value::None`] last.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(*b),
        (Value::Enum(a), Value::Enum(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Compares two records key by key.
///
/// Later keys only break ties left by earlier ones.
pub fn compare_records<T: Record + ?Sized>(a: &T, b: &T, keys: &[OrderBy]) -> Ordering {
    keys.iter()
        .map(|key| key.compare(&a.field_value(&key.field), &b.field_value(&key.field)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
