//! The `#[transcribe_testhelpers::test]` attribute.

use unsynn::*;

keyword! {
    KFn = "fn";
}

// Attributes, visibility and qualifiers come before `fn`; generics, arguments
// and the return type sit between the name and the body.
unsynn! {
    struct Preamble {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        preamble: Preamble,
        _fn: KFn,
        name: Ident,
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

/// Marks a test and sets up tracing before its body runs.
///
/// ```ignore
/// use transcribe_testhelpers::test;
///
/// #[test]
/// fn copies_nested_structs() {
///     // logs from the copier are printed if the test fails
/// }
/// ```
///
/// A different test attribute can be passed, as in
/// `#[transcribe_testhelpers::test(tokio::test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let test_fn = match tokens.parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(_) => {
            return quote::quote! {
                ::core::compile_error!("#[transcribe_testhelpers::test] expects a function");
            }
            .into();
        }
    };

    let TestFn {
        preamble,
        _fn,
        name,
        signature,
        body,
    } = test_fn;
    let body = body.0.stream();

    let test_attr = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };

    quote::quote! {
        #test_attr
        #preamble fn #name #signature {
            ::transcribe_testhelpers::setup();

            #body
        }
    }
    .into()
}
