//! Proc macros for Sifter.
//!
//! - [`Record`](derive@Record) - expose struct fields to field-based
//!   specifications

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `sifter::Record` for a struct with named fields.
///
/// Only fields carrying a `#[record(...)]` attribute are exposed.
///
/// # Field Attributes
///
/// | Attribute | Exposed as |
/// |-----------|------------|
/// | `String` | `Value::String`, field must deref to `str` |
/// | `Number` | `Value::Number`, field must be `Copy` and convert into `Number` |
/// | `Enum` | `Value::Enum`, field type must implement `sifter::Attribute` |
/// | `Bool` | `Value::Bool` |
/// | `skip` | not exposed (same as no attribute) |
/// | `rename = "..."` | exposed under a different name |
/// | `kind = "..."` | lowercase spelling of the kind (`"enum"`, `"bool"`, ...) |
///
/// # Generated Code
///
/// 1. One `pub const` per exposed field holding its name (`Product::COLOR`)
/// 2. `FIELDS`, the list of exposed names
/// 3. `impl sifter::Record`
///
/// # Example
///
/// ```ignore
/// use sifter::{field, filter, Attribute};
/// use sifter_macros::Record;
///
/// #[derive(Clone, Copy)]
/// enum Size { Small, Large }
///
/// impl Attribute for Size {
///     fn discriminant(&self) -> u32 {
///         *self as u32
///     }
/// }
///
/// #[derive(Record)]
/// struct Product {
///     #[record(String)]
///     name: String,
///     #[record(Enum)]
///     size: Size,
///     #[record(Number, rename = "price")]
///     price_cents: u32,
/// }
///
/// let products = vec![
///     Product { name: "Apple".into(), size: Size::Small, price_cents: 50 },
///     Product { name: "Tree".into(), size: Size::Large, price_cents: 9_900 },
/// ];
///
/// let spec = field(Product::SIZE).is(Size::Large);
/// assert_eq!(filter(&products, &spec)[0].name, "Tree");
/// assert_eq!(Product::FIELDS, &["name", "size", "price"]);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
