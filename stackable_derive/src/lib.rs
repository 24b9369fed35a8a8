#![allow(missing_docs)]
//! Derive macro for the `Stackable` trait of `minimum_nn`.
//!
//! Deriving `Stackable` on a struct lets a list of single-instance samples be
//! merged into one batch: every field is stacked with its own `Stackable`
//! implementation and the results are put back into the same struct.
//!
//! # Example
//!
//! ```ignore
//! use minimum_nn::dataset::Stackable;
//!
//! #[derive(Stackable)]
//! struct Sample {
//!     xs: Vec<Vec<f64>>,
//!     ys: Vec<Vec<f64>>,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Index};

/// Derives `Stackable` with `Output = Self` for structs with named or
/// unnamed fields. Every field type must itself be `Stackable<Output = Self>`.
#[proc_macro_derive(Stackable)]
pub fn derive_stackable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Stackable can only be derived for structs",
            ))
        }
    };

    let types: Vec<_> = data.fields.iter().map(|f| &f.ty).collect();
    let buffers: Vec<_> = (0..types.len())
        .map(|i| format_ident!("__stack_buffer_{}", i))
        .collect();

    let (collect, build) = match &data.fields {
        Fields::Named(fields) => {
            let names: Vec<_> = fields.named.iter().filter_map(|f| f.ident.as_ref()).collect();
            (
                quote! { #( #buffers.push(item.#names); )* },
                quote! {
                    #name { #( #names: <#types as Stackable>::stack(#buffers) ),* }
                },
            )
        }
        Fields::Unnamed(fields) => {
            let indices: Vec<_> = (0..fields.unnamed.len()).map(Index::from).collect();
            (
                quote! { #( #buffers.push(item.#indices); )* },
                quote! {
                    #name ( #( <#types as Stackable>::stack(#buffers) ),* )
                },
            )
        }
        Fields::Unit => {
            return Err(syn::Error::new_spanned(
                name,
                "Stackable needs at least one field to stack",
            ))
        }
    };

    let mut generics = input.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;
    for ty in &types {
        predicates.push(parse_quote!(#ty: Stackable<Output = #ty>));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics Stackable for #name #ty_generics #where_clause {
            type Output = Self;

            fn stack(batch: Vec<Self>) -> Self::Output {
                let __stack_len = batch.len();
                #( let mut #buffers = Vec::with_capacity(__stack_len); )*

                for item in batch {
                    #collect
                }

                #build
            }
        }
    })
}
