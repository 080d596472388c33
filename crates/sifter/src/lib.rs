//! Sifter - composable specifications for filtering record collections.
//!
//! A [`Specification`] is a pure boolean predicate over one record. Leaf
//! specifications check something about the record; composites combine other
//! specifications with `and`, `or` and `not`. A filter applies a
//! specification to a slice and hands back the matching records, borrowed,
//! in their original order.
//!
//! New kinds of criteria are added by implementing [`Specification`]. Neither
//! the combinators nor the filter functions need to change.
//!
//! # Quick Start
//!
//! ```rust
//! use sifter::{field, filter, Attribute, Record, Specification, Value};
//!
//! #[derive(Clone, Copy)]
//! enum Color {
//!     Red,
//!     Green,
//!     Blue,
//! }
//!
//! impl Attribute for Color {
//!     fn discriminant(&self) -> u32 {
//!         match self {
//!             Color::Red => 0,
//!             Color::Green => 1,
//!             Color::Blue => 2,
//!         }
//!     }
//! }
//!
//! struct Product {
//!     name: String,
//!     color: Color,
//! }
//!
//! impl Record for Product {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(&self.name),
//!             "color" => Value::Enum(self.color.discriminant()),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let products = vec![
//!     Product { name: "Apple".into(), color: Color::Green },
//!     Product { name: "Tree".into(), color: Color::Green },
//!     Product { name: "House".into(), color: Color::Blue },
//! ];
//!
//! let green = field("color").is(Color::Green);
//! let not_tree = field("name").ne("Tree");
//!
//! let results = filter(&products, &green.and(not_tree));
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].name, "Apple");
//! ```
//!
//! # Building Blocks
//!
//! | Kind | Types |
//! |------|-------|
//! | Composites | [`And`], [`Or`], [`Not`], [`AllOf`], [`AnyOf`] |
//! | Leaves | [`FieldSpec`] (via [`field`]), [`Predicate`] (via [`predicate`]), [`Always`], [`Never`] |
//! | Filtering | [`filter`], [`filter_iter`], [`try_filter`], [`count`], [`find`], [`partition`], ... |
//! | Queries | [`Query`] with ordering, offset and limit |
//!
//! # Ownership
//!
//! Composites own their operands. Share an operand between trees with
//! [`Specification::boxed`] (an [`Arc`](std::sync::Arc)), or borrow it by
//! composing `&spec`; the composite then cannot outlive the borrow.
//!
//! # Missing Specifications
//!
//! The typed filter functions cannot be called without a specification.
//! Where one is optional at the type level ([`try_filter`],
//! [`QueryBuilder::build`]), its absence is reported as
//! [`SifterError::InvalidArgument`] rather than treated as "match all" or
//! "match nothing".
//!
//! # Threads
//!
//! Filtering only reads. A specification that is `Sync` can be shared by
//! several threads filtering the same immutable slice; [`BoxedSpec`] is always
//! `Send + Sync`.

mod error;
mod field;
mod filter;
mod op;
mod ordering;
mod query;
mod record;
mod spec;
mod value;

pub use error::{Result, SifterError};
pub use field::{field, Field, FieldSpec, Operand};
pub use filter::{
    all, any, count, filter, filter_cloned, filter_iter, find, partition, position, retain,
    try_filter, Filter, Matches, SpecFilter,
};
pub use op::Op;
pub use ordering::{compare_records, compare_values, Dir, OrderBy};
pub use query::{Query, QueryBuilder};
pub use record::{Attribute, Record};
pub use spec::{
    all_of, any_of, predicate, AllOf, Always, And, AnyOf, BoxedSpec, Never, Not, Or, Predicate,
    Specification,
};
pub use value::{Number, Value};
