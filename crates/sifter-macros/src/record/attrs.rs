//! Parsing of `#[record(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed as a `sifter::Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[record(String)]`: anything that derefs to `str`.
    String,
    /// `#[record(Number)]`: a `Copy` type convertible into `sifter::Number`.
    Number,
    /// `#[record(Enum)]`: a type implementing `sifter::Attribute`.
    Enum,
    /// `#[record(Bool)]`
    Bool,
}

impl FieldKind {
    fn parse_name(name: &str) -> Option<Self> {
        match name {
            "String" | "string" | "str" => Some(FieldKind::String),
            "Number" | "number" => Some(FieldKind::Number),
            "Enum" | "enum" | "enumeration" | "attribute" => Some(FieldKind::Enum),
            "Bool" | "bool" | "boolean" => Some(FieldKind::Bool),
            _ => None,
        }
    }

    fn from_ident(ident: &Ident) -> Result<Self> {
        Self::parse_name(&ident.to_string()).ok_or_else(|| {
            Error::new(
                ident.span(),
                format!(
                    "unknown record field kind '{}'. Expected one of: String, Number, Enum, Bool",
                    ident
                ),
            )
        })
    }
}

/// Parsed contents of one `#[record(...)]` attribute.
#[derive(Debug, Clone, Default)]
pub struct RecordAttr {
    pub kind: Option<FieldKind>,
    pub skip: bool,
    /// Name used in specifications instead of the Rust field name.
    pub rename: Option<String>,
}

fn string_value(expr: &Expr, what: &str) -> Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", what),
        )),
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();
        let items: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in items {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => attr.skip = true,
                Meta::Path(path) => {
                    let ident = path.get_ident().ok_or_else(|| {
                        Error::new(path.span(), "expected String, Number, Enum, Bool or skip")
                    })?;
                    attr.kind = Some(FieldKind::from_ident(ident)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_value(&nv.value, "rename")?);
                }
                // `kind = "enum"` for spellings that are keywords as bare idents
                Meta::NameValue(nv) if nv.path.is_ident("kind") => {
                    let name = string_value(&nv.value, "kind")?;
                    let kind = FieldKind::parse_name(&name).ok_or_else(|| {
                        Error::new(
                            nv.value.span(),
                            format!("unknown record field kind '{}'", name),
                        )
                    })?;
                    attr.kind = Some(kind);
                }
                other => {
                    return Err(Error::new(
                        other.span(),
                        "unknown record attribute. Expected: String, Number, Enum, Bool, skip, rename = \"...\", or kind = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Reads the `#[record(...)]` attribute of a field, if any.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    match attrs.iter().find(|a| a.path().is_ident("record")) {
        Some(attr) => attr.parse_args::<RecordAttr>(),
        None => Ok(RecordAttr::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn kinds() {
        assert_eq!(parse("String").unwrap().kind, Some(FieldKind::String));
        assert_eq!(parse("Number").unwrap().kind, Some(FieldKind::Number));
        assert_eq!(parse("Enum").unwrap().kind, Some(FieldKind::Enum));
        assert_eq!(parse("Bool").unwrap().kind, Some(FieldKind::Bool));
        assert_eq!(parse("boolean").unwrap().kind, Some(FieldKind::Bool));
    }

    #[test]
    fn keyword_kinds_through_name_value() {
        assert_eq!(parse(r#"kind = "enum""#).unwrap().kind, Some(FieldKind::Enum));
        assert_eq!(parse(r#"kind = "bool""#).unwrap().kind, Some(FieldKind::Bool));
    }

    #[test]
    fn skip() {
        let attr = parse("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn rename() {
        let attr = parse(r#"Enum, rename = "colour""#).unwrap();
        assert_eq!(attr.kind, Some(FieldKind::Enum));
        assert_eq!(attr.rename.as_deref(), Some("colour"));
    }

    #[test]
    fn errors() {
        let err = parse("Float").unwrap_err();
        assert!(err.to_string().contains("unknown record field kind 'Float'"));

        assert!(parse("rename = 3").is_err());
        assert!(parse(r#"kind = "decimal""#).is_err());
        assert!(parse(r#"alias = "x""#).is_err());
    }
}
