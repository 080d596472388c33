//! Field-based leaf specifications.
//!
//! A [`FieldSpec`] reads one named field from a [`Record`] and compares it
//! against an owned [`Operand`] with an [`Op`]. The [`field`] function is the
//! usual entry point:
//!
//! ```
//! use sifter::{field, filter, Number, Record, Specification, Value};
//!
//! struct Product {
//!     name: &'static str,
//!     price: u32,
//! }
//!
//! impl Record for Product {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(self.name),
//!             "price" => Value::Number(Number::from(self.price)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let products = [
//!     Product { name: "Apple", price: 3 },
//!     Product { name: "Tree", price: 120 },
//!     Product { name: "House", price: 250_000 },
//! ];
//!
//! let affordable = field("price").lt(1_000u32).and(field("name").ne("Apple"));
//! let names: Vec<_> = filter(&products, &affordable).iter().map(|p| p.name).collect();
//! assert_eq!(names, ["Tree"]);
//! ```

use regex::Regex;

use crate::error::{Result, SifterError};
use crate::op::Op;
use crate::record::{Attribute, Record};
use crate::spec::Specification;
use crate::value::{Number, Value};

/// Owned comparison value held by a [`FieldSpec`].
#[derive(Debug, Clone)]
pub enum Operand {
    String(String),
    Number(Number),
    Enum(u32),
    /// Discriminant set for [`Op::In`].
    EnumSet(Vec<u32>),
    Bool(bool),
    /// Compiled pattern for [`Op::Regex`].
    Regex(Regex),
}

impl Operand {
    /// Wraps an enum attribute.
    pub fn attribute(value: impl Attribute) -> Self {
        Operand::Enum(value.discriminant())
    }

    /// Name of the operand's type, as used in errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::String(_) => "string",
            Operand::Number(_) => "number",
            Operand::Enum(_) => "enum",
            Operand::EnumSet(_) => "enum set",
            Operand::Bool(_) => "bool",
            Operand::Regex(_) => "regex",
        }
    }

    fn accepts(&self, op: Op) -> bool {
        match self {
            Operand::Regex(_) => op == Op::Regex,
            Operand::EnumSet(_) => op == Op::In,
            other => !matches!(op, Op::Regex | Op::In) && op.supports(other.type_name()),
        }
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::String(s)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::String(s.to_owned())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Regex> for Operand {
    fn from(r: Regex) -> Self {
        Operand::Regex(r)
    }
}

impl From<Vec<u32>> for Operand {
    fn from(set: Vec<u32>) -> Self {
        Operand::EnumSet(set)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

macro_rules! operand_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Operand {
                fn from(n: $ty) -> Self {
                    Operand::Number(Number::from(n))
                }
            }
        )+
    };
}

operand_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Leaf specification comparing one field of a [`Record`].
///
/// A record whose field is missing ([`Value::None`]) or holds a value of a
/// different type never matches, whatever the operator. In particular
/// `ne("x")` does not select records that lack the field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    field: String,
    op: Op,
    operand: Operand,
}

impl FieldSpec {
    /// Creates a field specification without checking that `op` applies to
    /// `operand`. Incompatible pairs simply never match; use
    /// [`FieldSpec::try_new`] to reject them up front.
    pub fn new(field: impl Into<String>, op: Op, operand: impl Into<Operand>) -> Self {
        FieldSpec {
            field: field.into(),
            op,
            operand: operand.into(),
        }
    }

    /// Creates a field specification, failing with
    /// [`SifterError::InvalidOperator`] if `op` cannot be applied to
    /// `operand`.
    pub fn try_new(field: impl Into<String>, op: Op, operand: impl Into<Operand>) -> Result<Self> {
        let operand = operand.into();
        if !operand.accepts(op) {
            return Err(SifterError::InvalidOperator {
                op: op.as_str(),
                value_type: operand.type_name(),
            });
        }
        Ok(FieldSpec {
            field: field.into(),
            op,
            operand,
        })
    }

    /// Name of the field this specification reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Operator applied to the field.
    pub fn op(&self) -> Op {
        self.op
    }

    /// Value the field is compared against.
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Evaluates this specification against an already extracted value.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match (&self.operand, value) {
            (Operand::String(expected), Value::String(actual)) => {
                self.match_string(actual, expected)
            }
            (Operand::Regex(regex), Value::String(actual)) => {
                self.op == Op::Regex && regex.is_match(actual)
            }
            (Operand::Number(expected), Value::Number(actual)) => actual
                .compare(*expected)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
            (Operand::Enum(expected), Value::Enum(actual)) => self.match_eq(actual == expected),
            (Operand::EnumSet(set), Value::Enum(actual)) => {
                self.op == Op::In && set.contains(actual)
            }
            (Operand::Bool(expected), Value::Bool(actual)) => self.match_eq(actual == expected),
            _ => false,
        }
    }

    fn match_string(&self, actual: &str, expected: &str) -> bool {
        match self.op {
            Op::Eq => actual == expected,
            Op::Ne => actual != expected,
            Op::StartsWith => actual.starts_with(expected),
            Op::EndsWith => actual.ends_with(expected),
            Op::Contains => actual.contains(expected),
            _ => false,
        }
    }

    fn match_eq(&self, equal: bool) -> bool {
        match self.op {
            Op::Eq => equal,
            Op::Ne => !equal,
            _ => false,
        }
    }
}

impl<T: Record + ?Sized> Specification<T> for FieldSpec {
    fn is_satisfied(&self, item: &T) -> bool {
        self.matches(&item.field_value(&self.field))
    }
}

/// Starts a [`FieldSpec`] for the named field.
pub fn field(name: impl Into<String>) -> Field {
    Field { name: name.into() }
}

/// Named field awaiting an operator. Created by [`field`].
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
}

impl Field {
    fn with(self, op: Op, operand: impl Into<Operand>) -> FieldSpec {
        FieldSpec::new(self.name, op, operand)
    }

    /// Field equals `value`.
    pub fn eq(self, value: impl Into<Operand>) -> FieldSpec {
        self.with(Op::Eq, value)
    }

    /// Field differs from `value`. Missing fields still never match.
    pub fn ne(self, value: impl Into<Operand>) -> FieldSpec {
        self.with(Op::Ne, value)
    }

    /// Numeric field is greater than `value`.
    pub fn gt(self, value: impl Into<Number>) -> FieldSpec {
        let n: Number = value.into();
        self.with(Op::Gt, n)
    }

    /// Numeric field is greater than or equal to `value`.
    pub fn gte(self, value: impl Into<Number>) -> FieldSpec {
        let n: Number = value.into();
        self.with(Op::Gte, n)
    }

    /// Numeric field is less than `value`.
    pub fn lt(self, value: impl Into<Number>) -> FieldSpec {
        let n: Number = value.into();
        self.with(Op::Lt, n)
    }

    /// Numeric field is less than or equal to `value`.
    pub fn lte(self, value: impl Into<Number>) -> FieldSpec {
        let n: Number = value.into();
        self.with(Op::Lte, n)
    }

    /// String field contains `needle` (case-sensitive).
    pub fn contains(self, needle: &str) -> FieldSpec {
        self.with(Op::Contains, needle)
    }

    /// String field starts with `prefix`.
    pub fn starts_with(self, prefix: &str) -> FieldSpec {
        self.with(Op::StartsWith, prefix)
    }

    /// String field ends with `suffix`.
    pub fn ends_with(self, suffix: &str) -> FieldSpec {
        self.with(Op::EndsWith, suffix)
    }

    /// Matches string fields against a regular expression.
    ///
    /// Fails with [`SifterError::InvalidRegex`] if `pattern` does not compile.
    pub fn matches(self, pattern: &str) -> Result<FieldSpec> {
        let regex = Regex::new(pattern)?;
        Ok(self.with(Op::Regex, regex))
    }

    /// Enum field equals `value`.
    pub fn is(self, value: impl Attribute) -> FieldSpec {
        self.with(Op::Eq, Operand::attribute(value))
    }

    /// Enum field differs from `value`.
    pub fn is_not(self, value: impl Attribute) -> FieldSpec {
        self.with(Op::Ne, Operand::attribute(value))
    }

    /// Enum field is any of `values`.
    pub fn one_of<A, I>(self, values: I) -> FieldSpec
    where
        A: Attribute,
        I: IntoIterator<Item = A>,
    {
        let set: Vec<u32> = values.into_iter().map(|a| a.discriminant()).collect();
        self.with(Op::In, set)
    }
}
