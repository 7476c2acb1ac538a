//! Procedural macros for the mockstore test harness.
//!
//! - `#[derive(Event)]`: implements `mockstore::Event` for your type, preserving
//!   generics and bounds. `kind()` returns the variant name (or the type name for
//!   structs) in `SCREAMING_SNAKE_CASE`, so `LoginRequest` becomes `LOGIN_REQUEST`.
//!   Use `#[event(kind = "...")]` on a variant or on the type to pick the kind
//!   explicitly.
//!
//! Usage:
//! ```rust,ignore
//! use mockstore::Event;
//!
//! #[derive(Clone, Debug, PartialEq, Event)]
//! enum AuthEvent {
//!     LoginRequest,                                 // "LOGIN_REQUEST"
//!     #[event(kind = "@@router/NAVIGATE")]
//!     Navigate { to: String },                      // "@@router/NAVIGATE"
//! }
//! ```
use heck::ToShoutySnakeCase;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_event(input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand_event(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = input.ident.clone();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let kind_impl = match &input.data {
        Data::Enum(data_enum) => {
            let mut match_arms = Vec::with_capacity(data_enum.variants.len());
            for variant in &data_enum.variants {
                let variant_ident = &variant.ident;
                let kind = kind_override(&variant.attrs)?
                    .unwrap_or_else(|| variant_ident.to_string().to_shouty_snake_case());

                let pattern = match &variant.fields {
                    Fields::Unit => quote! { Self::#variant_ident },
                    Fields::Unnamed(_) => quote! { Self::#variant_ident(..) },
                    Fields::Named(_) => quote! { Self::#variant_ident { .. } },
                };

                match_arms.push(quote! {
                    #pattern => ::std::borrow::Cow::Borrowed(#kind)
                });
            }

            if match_arms.is_empty() {
                quote! {
                    fn kind(&self) -> ::std::borrow::Cow<'static, str> {
                        match *self {}
                    }
                }
            } else {
                quote! {
                    fn kind(&self) -> ::std::borrow::Cow<'static, str> {
                        match self {
                            #(#match_arms),*
                        }
                    }
                }
            }
        }
        _ => {
            let kind = kind_override(&input.attrs)?
                .unwrap_or_else(|| ident.to_string().to_shouty_snake_case());
            quote! {
                fn kind(&self) -> ::std::borrow::Cow<'static, str> {
                    ::std::borrow::Cow::Borrowed(#kind)
                }
            }
        }
    };

    Ok(quote! {
        impl #impl_generics mockstore::Event for #ident #ty_generics #where_clause {
            #kind_impl
        }
    })
}

/// Reads `#[event(kind = "...")]`, if present.
fn kind_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut kind = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("kind") {
                let lit: LitStr = meta.value()?.parse()?;
                kind = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported event attribute, expected `kind = \"...\"`"))
            }
        })?;
    }
    Ok(kind)
}
