//! Parsing of `#[reflect(...)]` attributes.

use syn::{Attribute, Ident, LitStr, Token, Type, parenthesized};

/// A `getter(name: Type)` or `setter(name: Type)` declaration.
pub struct MethodAttr {
    pub name: Ident,
    pub ty: Type,
}

/// Attributes on the struct itself.
#[derive(Default)]
pub struct ContainerAttrs {
    pub transparent: bool,
    pub scanner: bool,
    pub valuer: bool,
    pub copy_valuer: bool,
    pub getters: Vec<MethodAttr>,
    pub setters: Vec<MethodAttr>,
}

/// Attributes on a single field.
#[derive(Default)]
pub struct FieldAttrs {
    pub flatten: bool,
    pub skip: bool,
    pub rename: Option<LitStr>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = ContainerAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("transparent") {
                    out.transparent = true;
                } else if meta.path.is_ident("scanner") {
                    out.scanner = true;
                } else if meta.path.is_ident("valuer") {
                    out.valuer = true;
                } else if meta.path.is_ident("copy_valuer") {
                    out.copy_valuer = true;
                } else if meta.path.is_ident("getter") {
                    out.getters.push(parse_method(&meta)?);
                } else if meta.path.is_ident("setter") {
                    out.setters.push(parse_method(&meta)?);
                } else {
                    return Err(meta.error(
                        "unknown reflect attribute, expected one of: transparent, scanner, \
                         valuer, copy_valuer, getter(..), setter(..)",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("reflect")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("flatten") {
                    out.flatten = true;
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unknown reflect field attribute, expected one of: flatten, skip, rename",
                    ));
                }
                Ok(())
            })?;
        }
        if out.skip && (out.flatten || out.rename.is_some()) {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "a skipped field cannot also be flattened or renamed",
            ));
        }
        Ok(out)
    }
}

// getter(name: Type)
fn parse_method(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<MethodAttr> {
    let content;
    parenthesized!(content in meta.input);
    let name: Ident = content.parse()?;
    content.parse::<Token![:]>()?;
    let ty: Type = content.parse()?;
    Ok(MethodAttr { name, ty })
}
