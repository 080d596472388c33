//! End-to-end filtering of a product catalog with derived records.

use sifter::{
    field, filter, filter_iter, try_filter, Always, Attribute, BoxedSpec, Filter, Query,
    Record, SifterError, SpecFilter, Specification,
};
use sifter_macros::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
    Blue,
}

impl Attribute for Color {
    fn discriminant(&self) -> u32 {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Size {
    Small,
    Medium,
    Large,
}

impl Attribute for Size {
    fn discriminant(&self) -> u32 {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }
}

#[derive(Debug, Clone, Record)]
struct Product {
    #[record(String)]
    name: String,
    #[record(Enum)]
    color: Color,
    #[record(Enum)]
    size: Size,
    #[record(Number, rename = "price")]
    price_cents: u32,
    #[record(Bool)]
    in_stock: bool,
    #[record(skip)]
    sku: u64,
}

fn product(name: &str, color: Color, size: Size, price_cents: u32) -> Product {
    Product {
        name: name.to_string(),
        color,
        size,
        price_cents,
        in_stock: true,
        sku: 0,
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("Apple", Color::Green, Size::Small, 50),
        product("Tree", Color::Green, Size::Large, 9_900),
        Product {
            in_stock: false,
            ..product("House", Color::Blue, Size::Large, 25_000_000)
        },
    ]
}

fn names(results: &[&Product]) -> Vec<String> {
    results.iter().map(|p| p.name.clone()).collect()
}

// ============================================================================
// The canonical scenario
// ============================================================================

#[test]
fn green_things() {
    let products = catalog();
    let green = field(Product::COLOR).is(Color::Green);

    assert_eq!(names(&filter(&products, &green)), ["Apple", "Tree"]);
}

#[test]
fn green_and_large_things() {
    let products = catalog();
    let spec = field(Product::COLOR)
        .is(Color::Green)
        .and(field(Product::SIZE).is(Size::Large));

    assert_eq!(names(&filter(&products, &spec)), ["Tree"]);
}

#[test]
fn things_that_are_not_blue() {
    let products = catalog();
    let spec = field(Product::COLOR).is(Color::Blue).not();

    assert_eq!(names(&filter(&products, &spec)), ["Apple", "Tree"]);
}

// ============================================================================
// Derived record
// ============================================================================

#[test]
fn derived_field_values() {
    let apple = product("Apple", Color::Green, Size::Small, 50);

    assert_eq!(Product::FIELDS, &["name", "color", "size", "price", "in_stock"]);
    assert_eq!(Product::IN_STOCK, "in_stock");
    assert_eq!(Product::PRICE, "price");
    assert_eq!(apple.field_value("name"), sifter::Value::String("Apple"));
    assert_eq!(apple.field_value("color"), sifter::Value::Enum(1));
    assert_eq!(
        apple.field_value("price"),
        sifter::Value::Number(sifter::Number::U64(50))
    );
    assert_eq!(apple.field_value("in_stock"), sifter::Value::Bool(true));
    assert!(apple.field_value("price_cents").is_none());
    assert!(apple.field_value("sku").is_none());
}

#[test]
fn mixed_field_criteria() {
    let products = catalog();
    let spec = field(Product::PRICE)
        .lt(10_000u32)
        .and(field(Product::SIZE).one_of([Size::Medium, Size::Large]))
        .or(field(Product::NAME).starts_with("Hou"));

    assert_eq!(names(&filter(&products, &spec)), ["Tree", "House"]);
}

#[test]
fn bool_field_criteria() {
    let products = catalog();
    let available = field(Product::IN_STOCK).eq(true);

    assert_eq!(names(&filter(&products, &available)), ["Apple", "Tree"]);
    assert_eq!(
        names(&filter(&products, &field(Product::IN_STOCK).ne(true))),
        ["House"]
    );
    assert_eq!(
        names(&filter(&products, &available.and(field(Product::SIZE).is(Size::Large)))),
        ["Tree"]
    );
}

#[test]
fn regex_on_names() {
    let products = catalog();
    let spec = field(Product::NAME).matches("^[A-T][a-z]{3}$").unwrap();

    assert_eq!(names(&filter(&products, &spec)), ["Tree"]);
}

// ============================================================================
// Open for extension
// ============================================================================

/// A leaf written outside the crate; nothing else had to change.
struct Cheaper(u32);

impl Specification<Product> for Cheaper {
    fn is_satisfied(&self, item: &Product) -> bool {
        item.price_cents < self.0
    }
}

#[test]
fn custom_leaf_composes_with_builtin_specs() {
    let products = catalog();
    let spec = Cheaper(10_000).and(field(Product::COLOR).is_not(Color::Red));

    assert_eq!(names(&filter(&products, &spec)), ["Apple", "Tree"]);
    assert_eq!(names(&SpecFilter.filter(&products, &spec.not())), ["House"]);
}

#[test]
fn lazy_filter_stops_early() {
    let products = catalog();
    let large = field(Product::SIZE).is(Size::Large);

    let first = filter_iter(&products, &large).next().unwrap();
    assert_eq!(first.name, "Tree");
}

// ============================================================================
// Unset specifications
// ============================================================================

#[test]
fn unset_spec_fails_fast() {
    let products = catalog();
    let spec: Option<&Cheaper> = None;

    let err = try_filter(&products, spec).unwrap_err();
    assert!(matches!(err, SifterError::InvalidArgument(_)));

    let err = Query::<Product>::builder().order_asc("name").build().unwrap_err();
    assert!(matches!(err, SifterError::InvalidArgument(_)));
}

#[test]
fn query_orders_by_derived_fields() {
    let products = catalog();
    let query = Query::builder()
        .spec(Always)
        .order_desc(Product::SIZE)
        .order_asc(Product::PRICE)
        .build()
        .unwrap();

    assert_eq!(names(&query.run(&products)), ["Tree", "House", "Apple"]);
}

// ============================================================================
// Threads
// ============================================================================

#[test]
fn shared_spec_across_threads() {
    let products = catalog();
    let spec: BoxedSpec<Product> = field(Product::COLOR).is(Color::Green).boxed();

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| filter(&products, &spec).len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![2; 4]);
}
