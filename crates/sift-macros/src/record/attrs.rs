//! Parsing of `#[record(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordAttr {
    /// Leave this field out of `field_value`.
    pub skip: bool,
    /// Name used in criteria (default: field name).
    pub rename: Option<String>,
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => {
                    attr.skip = true;
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    };
                    let name = s.value();
                    if name.is_empty() {
                        return Err(Error::new(s.span(), "rename must not be empty"));
                    }
                    attr.rename = Some(name);
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Collects every `#[record(...)]` attribute on a field into one.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    let mut merged = RecordAttr::default();
    for attr in attrs {
        if attr.path().is_ident("record") {
            let parsed = attr.parse_args::<RecordAttr>()?;
            merged.skip |= parsed.skip;
            if parsed.rename.is_some() {
                merged.rename = parsed.rename;
            }
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(tokens: &str) -> Result<RecordAttr> {
        syn::parse_str::<RecordAttr>(tokens)
    }

    #[test]
    fn test_record_skip() {
        let attr = parse_record("skip").unwrap();
        assert!(attr.skip);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_record_rename() {
        let attr = parse_record(r#"rename = "letter""#).unwrap();
        assert!(!attr.skip);
        assert_eq!(attr.rename, Some("letter".to_string()));
    }

    #[test]
    fn test_record_empty() {
        assert_eq!(parse_record("").unwrap(), RecordAttr::default());
    }

    #[test]
    fn test_record_rename_requires_string() {
        let err = parse_record("rename = 5").unwrap_err();
        assert!(err.to_string().contains("string literal"));
    }

    #[test]
    fn test_record_rename_rejects_empty() {
        assert!(parse_record(r#"rename = """#).is_err());
    }

    #[test]
    fn test_record_unknown() {
        let err = parse_record("flatten").unwrap_err();
        assert!(err.to_string().contains("unknown record attribute"));

        assert!(parse_record(r#"alias = "x""#).is_err());
    }

    #[test]
    fn test_attrs_merge() {
        let field: syn::Field = syn::parse_quote! {
            #[record(rename = "letter")]
            #[doc = "favorite"]
            #[record(skip)]
            favorite_letter: char
        };
        let attr = parse_record_attrs(&field.attrs).unwrap();
        assert!(attr.skip);
        assert_eq!(attr.rename, Some("letter".to_string()));
    }
}
