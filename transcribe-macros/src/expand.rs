//! Code generation for `#[derive(Reflect)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, Index, Visibility, parse_quote};

use crate::attrs::{ContainerAttrs, FieldAttrs, MethodAttr};

struct ReflectedField {
    /// `self.<member>`
    member: TokenStream,
    name: String,
    ty: syn::Type,
    attrs: FieldAttrs,
    exported: bool,
}

pub fn derive_reflect(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(e) => {
            return Err(syn::Error::new_spanned(
                e.enum_token,
                "#[derive(Reflect)] only supports structs",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new_spanned(
                u.union_token,
                "#[derive(Reflect)] only supports structs",
            ));
        }
    };

    if let Some(lt) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lt,
            "#[derive(Reflect)] does not support lifetime parameters",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;

    let (kind, fields) = match &data.fields {
        Fields::Named(named) => (
            quote! { ::transcribe::StructKind::Struct },
            named
                .named
                .iter()
                .map(|f| {
                    let ident = f.ident.clone().ok_or_else(|| {
                        syn::Error::new_spanned(f, "named field without an identifier")
                    })?;
                    Ok(ReflectedField {
                        member: quote! { #ident },
                        name: ident.unraw().to_string(),
                        ty: f.ty.clone(),
                        attrs: FieldAttrs::parse(&f.attrs)?,
                        exported: matches!(f.vis, Visibility::Public(_)),
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
        ),
        Fields::Unnamed(unnamed) => (
            quote! { ::transcribe::StructKind::TupleStruct },
            unnamed
                .unnamed
                .iter()
                .enumerate()
                .map(|(i, f)| {
                    let index = Index::from(i);
                    Ok(ReflectedField {
                        member: quote! { #index },
                        name: i.to_string(),
                        ty: f.ty.clone(),
                        attrs: FieldAttrs::parse(&f.attrs)?,
                        exported: matches!(f.vis, Visibility::Public(_)),
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
        ),
        Fields::Unit => (quote! { ::transcribe::StructKind::Unit }, Vec::new()),
    };

    let zero = zero_value(&data.fields, &fields);

    // every type parameter must itself be reflected
    for param in input.generics.params.iter_mut() {
        if let GenericParam::Type(tp) = param {
            tp.bounds.push(parse_quote!(::transcribe::Typed));
        }
    }

    let name = &input.ident;
    let identifier = name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let capabilities = capabilities(&container);
    let hook_accessors = hook_accessors(&container);

    if container.transparent {
        let mut visible = fields.iter().filter(|f| !f.attrs.skip);
        let (Some(inner), None) = (visible.next(), visible.next()) else {
            return Err(syn::Error::new_spanned(
                name,
                "#[reflect(transparent)] needs exactly one field that is not skipped",
            ));
        };
        let member = &inner.member;
        let inner_ty = &inner.ty;

        return Ok(quote! {
            #[automatically_derived]
            impl #impl_generics ::transcribe::Reflect for #name #ty_generics #where_clause {
                fn reflect_ref(&self) -> ::transcribe::ReflectRef<'_> {
                    ::transcribe::ReflectRef::Transparent(&self.#member)
                }

                fn reflect_mut(&mut self) -> ::transcribe::ReflectMut<'_> {
                    ::transcribe::ReflectMut::Transparent(&mut self.#member)
                }

                #hook_accessors
            }

            #[automatically_derived]
            impl #impl_generics ::transcribe::Typed for #name #ty_generics #where_clause {
                const SHAPE: &'static ::transcribe::Shape = &const {
                    ::transcribe::Shape::of::<Self>(
                        #identifier,
                        ::transcribe::Def::Transparent(::transcribe::TransparentDef {
                            inner: ::transcribe::shape_of::<#inner_ty>,
                        }),
                    )
                    .with_capabilities(#capabilities)
                };

                fn zero() -> Self {
                    #zero
                }
            }
        });
    }

    let visible: Vec<&ReflectedField> = fields.iter().filter(|f| !f.attrs.skip).collect();
    let field_count = visible.len();
    let field_defs = static_slice(visible.iter().map(|f| field_def(f)).collect());
    let indices: Vec<usize> = (0..field_count).collect();
    let members: Vec<&TokenStream> = visible.iter().map(|f| &f.member).collect();

    let getter_defs = static_slice(container.getters.iter().map(method_def).collect());
    let setter_defs = static_slice(container.setters.iter().map(method_def).collect());
    let call_getter = call_getter(&container.getters);
    let call_setter = call_setter(&container.setters);

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::transcribe::Struct for #name #ty_generics #where_clause {
            fn field_count(&self) -> usize {
                #field_count
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::transcribe::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#members),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::transcribe::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#members),)*
                    _ => ::core::option::Option::None,
                }
            }

            #call_getter

            #call_setter
        }

        #[automatically_derived]
        impl #impl_generics ::transcribe::Reflect for #name #ty_generics #where_clause {
            fn reflect_ref(&self) -> ::transcribe::ReflectRef<'_> {
                ::transcribe::ReflectRef::Struct(self)
            }

            fn reflect_mut(&mut self) -> ::transcribe::ReflectMut<'_> {
                ::transcribe::ReflectMut::Struct(self)
            }

            #hook_accessors
        }

        #[automatically_derived]
        impl #impl_generics ::transcribe::Typed for #name #ty_generics #where_clause {
            const SHAPE: &'static ::transcribe::Shape = &const {
                ::transcribe::Shape::of::<Self>(
                    #identifier,
                    ::transcribe::Def::Struct(::transcribe::StructType {
                        kind: #kind,
                        fields: #field_defs,
                        getters: #getter_defs,
                        setters: #setter_defs,
                    }),
                )
                .with_capabilities(#capabilities)
            };

            fn zero() -> Self {
                #zero
            }
        }
    })
}

/// A `&'static [T]` expression for `items`.
fn static_slice(items: Vec<TokenStream>) -> TokenStream {
    if items.is_empty() {
        quote! { &[] }
    } else {
        quote! { &const { [#(#items),*] } }
    }
}

fn field_def(field: &ReflectedField) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let rename = match &field.attrs.rename {
        Some(lit) => quote! { ::core::option::Option::Some(#lit) },
        None => quote! { ::core::option::Option::None },
    };
    let mut flags = quote! { ::transcribe::FieldFlags::empty() };
    if field.exported {
        flags = quote! { #flags.union(::transcribe::FieldFlags::EXPORTED) };
    }
    if field.attrs.flatten {
        flags = quote! { #flags.union(::transcribe::FieldFlags::FLATTEN) };
    }
    quote! {
        ::transcribe::Field {
            name: #name,
            rename: #rename,
            shape: ::transcribe::shape_of::<#ty>,
            flags: #flags,
        }
    }
}

fn method_def(method: &MethodAttr) -> TokenStream {
    let name = method.name.unraw().to_string();
    let ty = &method.ty;
    quote! {
        ::transcribe::Method {
            name: #name,
            shape: ::transcribe::shape_of::<#ty>,
        }
    }
}

fn call_getter(getters: &[MethodAttr]) -> TokenStream {
    if getters.is_empty() {
        return TokenStream::new();
    }
    let arms = getters.iter().map(|getter| {
        let ident = &getter.name;
        let name = ident.unraw().to_string();
        let ty = &getter.ty;
        quote! {
            #name => {
                let value: #ty = self.#ident();
                ::core::option::Option::Some(::std::boxed::Box::new(value))
            }
        }
    });
    quote! {
        fn call_getter(
            &self,
            name: &str,
        ) -> ::core::option::Option<::std::boxed::Box<dyn ::transcribe::Reflect>> {
            match name {
                #(#arms)*
                _ => ::core::option::Option::None,
            }
        }
    }
}

fn call_setter(setters: &[MethodAttr]) -> TokenStream {
    if setters.is_empty() {
        return TokenStream::new();
    }
    let arms = setters.iter().map(|setter| {
        let ident = &setter.name;
        let name = ident.unraw().to_string();
        let ty = &setter.ty;
        quote! {
            #name => ::core::option::Option::Some(match value.downcast_ref::<#ty>() {
                ::core::option::Option::Some(value) => {
                    self.#ident(::core::clone::Clone::clone(value));
                    true
                }
                ::core::option::Option::None => false,
            }),
        }
    });
    quote! {
        fn call_setter(
            &mut self,
            name: &str,
            value: &dyn ::transcribe::Reflect,
        ) -> ::core::option::Option<bool> {
            match name {
                #(#arms)*
                _ => ::core::option::Option::None,
            }
        }
    }
}

fn capabilities(container: &ContainerAttrs) -> TokenStream {
    let mut caps = quote! { ::transcribe::Capabilities::empty() };
    for (enabled, flag) in [
        (container.scanner, "SCANNER"),
        (container.valuer, "VALUER"),
        (container.copy_valuer, "COPY_VALUER"),
    ] {
        if enabled {
            let flag = format_ident!("{flag}");
            caps = quote! { #caps.union(::transcribe::Capabilities::#flag) };
        }
    }
    caps
}

fn hook_accessors(container: &ContainerAttrs) -> TokenStream {
    let mut out = TokenStream::new();
    if container.scanner {
        out.extend(quote! {
            fn as_scanner(&mut self) -> ::core::option::Option<&mut dyn ::transcribe::Scanner> {
                ::core::option::Option::Some(self)
            }
        });
    }
    if container.valuer {
        out.extend(quote! {
            fn as_valuer(&self) -> ::core::option::Option<&dyn ::transcribe::Valuer> {
                ::core::option::Option::Some(self)
            }
        });
    }
    if container.copy_valuer {
        out.extend(quote! {
            fn as_copy_valuer(&self) -> ::core::option::Option<&dyn ::transcribe::CopyValuer> {
                ::core::option::Option::Some(self)
            }
        });
    }
    out
}

/// `Self { a: Typed::zero(), skipped: Default::default() }`, or the tuple or
/// unit equivalent.
fn zero_value(shape: &Fields, fields: &[ReflectedField]) -> TokenStream {
    let values = fields.iter().map(|f| {
        let ty = &f.ty;
        if f.attrs.skip {
            quote! { <#ty as ::core::default::Default>::default() }
        } else {
            quote! { <#ty as ::transcribe::Typed>::zero() }
        }
    });
    match shape {
        Fields::Named(_) => {
            let members = fields.iter().map(|f| &f.member);
            quote! { Self { #(#members: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    }
}
