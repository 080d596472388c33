//! A tiny product catalog filtered with sifter specifications.
//!
//! The binary in `main.rs` turns command-line flags into [`Criteria`]; this
//! module owns the data model and the translation from criteria to a
//! specification.

use std::fmt;

use clap::ValueEnum;
use sifter::{
    all_of, any_of, field, filter, Attribute, BoxedSpec, Query, Specification,
};
use sifter_macros::Record;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Attribute for Color {
    fn discriminant(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Attribute for Size {
    fn discriminant(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Record)]
pub struct Product {
    #[record(String)]
    pub name: String,
    #[record(Enum)]
    pub color: Color,
    #[record(Enum)]
    pub size: Size,
}

impl Product {
    pub fn new(name: impl Into<String>, color: Color, size: Size) -> Self {
        Product {
            name: name.into(),
            color,
            size,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.color, self.size)
    }
}

/// The demo catalog, in display order.
pub fn catalog() -> Vec<Product> {
    vec![
        Product::new("Apple", Color::Green, Size::Small),
        Product::new("Tree", Color::Green, Size::Large),
        Product::new("House", Color::Blue, Size::Large),
    ]
}

/// How the individual criteria are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combine {
    #[default]
    All,
    Any,
}

/// User-supplied selection criteria. Unset criteria are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub color: Option<Color>,
    pub size: Option<Size>,
    pub exclude_color: Option<Color>,
    pub name_contains: Option<String>,
    pub combine: Combine,
}

impl Criteria {
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.size.is_none()
            && self.exclude_color.is_none()
            && self.name_contains.is_none()
    }

    /// Builds the specification, or `None` when no criterion is set.
    pub fn spec(&self) -> Option<BoxedSpec<Product>> {
        let mut clauses: Vec<BoxedSpec<Product>> = Vec::new();

        if let Some(color) = self.color {
            clauses.push(field(Product::COLOR).is(color).boxed());
        }
        if let Some(size) = self.size {
            clauses.push(field(Product::SIZE).is(size).boxed());
        }
        if let Some(color) = self.exclude_color {
            clauses.push(field(Product::COLOR).is(color).not().boxed());
        }
        if let Some(text) = &self.name_contains {
            clauses.push(field(Product::NAME).contains(text).boxed());
        }

        if clauses.is_empty() {
            return None;
        }
        debug!(clauses = clauses.len(), combine = ?self.combine, "built catalog spec");

        Some(match self.combine {
            Combine::All => all_of(clauses).boxed(),
            Combine::Any => any_of(clauses).boxed(),
        })
    }

    /// Runs the criteria against `products`.
    ///
    /// Fails with [`sifter::SifterError::InvalidArgument`] when no criterion
    /// is set.
    pub fn select<'a>(&self, products: &'a [Product]) -> sifter::Result<Vec<&'a Product>> {
        let mut builder = Query::builder();
        if let Some(spec) = self.spec() {
            builder = builder.shared_spec(spec);
        }
        Ok(builder.build()?.run(products))
    }
}

/// One step of the canonical walkthrough.
pub struct Demonstration {
    /// Completes "<name> is ...".
    pub label: &'static str,
    pub spec: BoxedSpec<Product>,
}

impl Demonstration {
    /// Formats one line per matching product.
    pub fn lines(&self, products: &[Product]) -> Vec<String> {
        filter(products, &self.spec)
            .into_iter()
            .map(|p| format!("{} is {}", p.name, self.label))
            .collect()
    }
}

/// Green things, green and large things, things that are not blue.
pub fn demonstrations() -> Vec<Demonstration> {
    let green = field(Product::COLOR).is(Color::Green);
    let large = field(Product::SIZE).is(Size::Large);
    let blue = field(Product::COLOR).is(Color::Blue);

    vec![
        Demonstration {
            label: "green",
            spec: green.clone().boxed(),
        },
        Demonstration {
            label: "green and large",
            spec: green.and(large).boxed(),
        },
        Demonstration {
            label: "not blue",
            spec: blue.not().boxed(),
        },
    ]
}
