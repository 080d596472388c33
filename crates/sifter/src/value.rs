//! Field values as seen by field-based specifications.
//!
//! A [`Value`] is what a [`Record`](crate::Record) hands back when asked for
//! one of its fields. It borrows from the record, so reading a field never
//! copies string data.

use std::cmp::Ordering;

/// Borrowed view of a single record field.
///
/// # Example
///
/// ```
/// use sifter::{Number, Value};
///
/// struct Product {
///     name: String,
///     stock: u32,
/// }
///
/// fn field<'a>(p: &'a Product, name: &str) -> Value<'a> {
///     match name {
///         "name" => Value::String(&p.name),
///         "stock" => Value::Number(Number::from(p.stock)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Discriminant of a caller enum, see [`Attribute`](crate::Attribute).
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Field missing or not exposed.
    None,
}

impl<'a> Value<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Short type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Enum(_) => "enum",
            Value::Bool(_) => "bool",
            Value::None => "none",
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<u32> {
        match self {
            Value::Enum(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Numeric field value.
///
/// Integers keep their signedness so that large `u64`/`i64` values compare
/// exactly, also against floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers. Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            None
        } else {
            Some(self.total_cmp(other))
        }
    }

    /// Total order over all numbers: exact across integer and float variants,
    /// NaN after every other number and equal to itself.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => a.cmp(&b),
            (Number::U64(a), Number::U64(b)) => a.cmp(&b),
            (Number::I64(a), Number::U64(b)) => i128::from(a).cmp(&i128::from(b)),
            (Number::U64(a), Number::I64(b)) => i128::from(a).cmp(&i128::from(b)),
            (Number::F64(a), Number::F64(b)) => compare_floats(a, b),
            (Number::I64(a), Number::F64(b)) => compare_int_float(i128::from(a), b),
            (Number::U64(a), Number::F64(b)) => compare_int_float(i128::from(a), b),
            (Number::F64(a), Number::I64(b)) => compare_int_float(i128::from(b), a).reverse(),
            (Number::F64(a), Number::U64(b)) => compare_int_float(i128::from(b), a).reverse(),
        }
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

// Rounding to f64 is monotone, so a strict result is exact; a tie means `f`
// is integral and fits in i128.
fn compare_int_float(i: i128, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Less;
    }
    match (i as f64).partial_cmp(&f) {
        Some(Ordering::Equal) | None => i.cmp(&(f as i128)),
        Some(ordering) => ordering,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);
