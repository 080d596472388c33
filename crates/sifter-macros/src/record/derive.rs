//! Code generation for `#[derive(Record)]`.
//!
//! For every annotated field the derive emits a `pub const` holding the field's
//! query name, a `FIELDS` list with all of them, and one arm of
//! `sifter::Record::field_value`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_record_attrs, FieldKind};

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut consts = Vec::new();
    let mut names = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let attr = parse_record_attrs(&field.attrs)?;

        let kind = match attr.kind {
            Some(kind) if !attr.skip => kind,
            _ => continue,
        };

        let query_name = attr.rename.unwrap_or_else(|| ident.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));

        consts.push(quote! {
            /// Field name for use in specifications.
            pub const #const_name: &'static str = #query_name;
        });
        names.push(query_name.clone());

        let value = match kind {
            FieldKind::String => quote! {
                ::sifter::Value::String(&self.#ident)
            },
            FieldKind::Number => quote! {
                ::sifter::Value::Number(::sifter::Number::from(self.#ident))
            },
            FieldKind::Enum => quote! {
                ::sifter::Value::Enum(::sifter::Attribute::discriminant(&self.#ident))
            },
            FieldKind::Bool => quote! {
                ::sifter::Value::Bool(self.#ident)
            },
        };
        arms.push(quote! { #query_name => #value, });
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#consts)*

            /// Names of all fields exposed to specifications.
            pub const FIELDS: &'static [&'static str] = &[#(#names),*];
        }

        impl #impl_generics ::sifter::Record for #name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::sifter::Value<'_> {
                match field {
                    #(#arms)*
                    _ => ::sifter::Value::None,
                }
            }
        }
    })
}

fn to_screaming_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            out.push('_');
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c);
            prev_lower = false;
        } else {
            out.push(c.to_ascii_uppercase());
            prev_lower = c.is_alphanumeric();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("color"), "COLOR");
        assert_eq!(to_screaming_snake_case("unit_price"), "UNIT_PRICE");
        assert_eq!(to_screaming_snake_case("unitPrice"), "UNIT_PRICE");
        assert_eq!(to_screaming_snake_case("in-stock"), "IN_STOCK");
    }

    #[test]
    fn generates_accessor_arms() {
        let input: DeriveInput = syn::parse_quote! {
            struct Product {
                #[record(String)]
                name: String,
                #[record(Enum, rename = "colour")]
                color: Color,
                #[record(skip)]
                sku: u64,
                notes: String,
            }
        };

        let code = record_derive_impl(input).unwrap().to_string();
        assert!(code.contains("pub const NAME"));
        assert!(code.contains("pub const COLOUR"));
        assert!(code.contains("\"colour\" =>"));
        assert!(!code.contains("SKU"));
        assert!(!code.contains("NOTES"));
    }

    #[test]
    fn rejects_tuple_structs_and_enums() {
        let tuple: DeriveInput = syn::parse_quote! { struct Pair(u8, u8); };
        assert!(record_derive_impl(tuple).is_err());

        let en: DeriveInput = syn::parse_quote! { enum Size { Small } };
        let err = record_derive_impl(en).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }
}
