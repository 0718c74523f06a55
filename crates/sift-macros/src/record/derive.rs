//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates an implementation of the `Record` trait and field name
//! constants for building criteria without string typos.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_record_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
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

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut seen_constants: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let record_attrs = parse_record_attrs(&field.attrs)?;
        if record_attrs.skip {
            continue;
        }

        let criteria_name = record_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string());

        if !seen_names.insert(criteria_name.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{}'", criteria_name),
            ));
        }

        let const_str = to_screaming_snake_case(&criteria_name);
        if const_str.chars().all(|c| c == '_') {
            return Err(Error::new(
                field.span(),
                format!("record field name '{}' has no letters or digits", criteria_name),
            ));
        }
        if !seen_constants.insert(const_str.clone()) {
            return Err(Error::new(
                field.span(),
                format!(
                    "record field '{}' collides with another field's constant {}",
                    criteria_name, const_str
                ),
            ));
        }
        let const_name = format_ident!("{}", const_str);

        field_constants.push(quote! {
            /// Field name constant for building criteria.
            pub const #const_name: &'static str = #criteria_name;
        });

        field_matches.push(quote! {
            #criteria_name => ::sift::AsValue::as_value(&self.#field_name),
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sift::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::sift::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::sift::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_ascii_lowercase();
        } else {
            result.push('_');
            prev_was_lower = false;
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("first_name"), "FIRST_NAME");
        assert_eq!(to_screaming_snake_case("favoriteNumber"), "FAVORITE_NUMBER");
        assert_eq!(to_screaming_snake_case("last-name"), "LAST_NAME");
        assert_eq!(to_screaming_snake_case("display name"), "DISPLAY_NAME");
        assert_eq!(to_screaming_snake_case("2nd"), "_2ND");
    }

    #[test]
    fn test_generates_match_arms_and_constants() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                first_name: String,
                #[record(rename = "letter")]
                favorite_letter: char,
                #[record(skip)]
                notes: Vec<String>,
            }
        };
        let output = record_derive_impl(input).unwrap().to_string();

        assert!(output.contains("FIRST_NAME"));
        assert!(output.contains("\"first_name\""));
        assert!(output.contains("LETTER"));
        assert!(output.contains("\"letter\""));
        assert!(!output.contains("\"favorite_letter\""));
        assert!(!output.contains("notes"));
    }

    #[test]
    fn test_rejects_enums_and_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            enum Shape { Circle, Square }
        };
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));

        let input: DeriveInput = parse_quote! {
            struct Pair(i32, i32);
        };
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                name: String,
                #[record(rename = "name")]
                nickname: String,
            }
        };
        let err = record_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("duplicate record field name 'name'"));
    }

    #[test]
    fn test_keeps_generics() {
        let input: DeriveInput = parse_quote! {
            struct Tagged<T: AsRef<str>> {
                label: String,
                #[record(skip)]
                tag: T,
            }
        };
        let output: String = record_derive_impl(input)
            .unwrap()
            .to_string()
            .split_whitespace()
            .collect();
        assert!(output.contains("::sift::RecordforTagged<T>"));
    }
}
