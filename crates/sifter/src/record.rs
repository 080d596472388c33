//! Field access for records used with [`FieldSpec`](crate::FieldSpec) and
//! [`Query`](crate::Query) ordering.
//!
//! Closure-based specifications never need this trait; it only exists so that
//! field-based leaves and sort keys can address a record's attributes by name.

use crate::value::Value;

/// A record whose fields can be read by name.
///
/// Usually derived with `#[derive(Record)]` from `sifter-macros`, but simple
/// enough to write by hand:
///
/// ```
/// use sifter::{Record, Value};
///
/// struct Product {
///     name: String,
///     in_stock: bool,
/// }
///
/// impl Record for Product {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "in_stock" => Value::Bool(self.in_stock),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of `field`, or [`Value::None`] if the record has no
    /// such field.
    fn field_value(&self, field: &str) -> Value<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

/// Maps a caller enum to a stable discriminant so it can be stored in a
/// [`Value::Enum`] and compared.
///
/// Use explicit discriminants rather than declaration order, so reordering
/// variants does not change which records a specification selects.
///
/// ```
/// use sifter::Attribute;
///
/// #[derive(Clone, Copy)]
/// enum Size {
///     Small,
///     Medium,
///     Large,
/// }
///
/// impl Attribute for Size {
///     fn discriminant(&self) -> u32 {
///         match self {
///             Size::Small => 0,
///             Size::Medium => 1,
///             Size::Large => 2,
///         }
///     }
/// }
/// ```
pub trait Attribute {
    fn discriminant(&self) -> u32;
}
