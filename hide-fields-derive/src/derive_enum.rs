//! Enum-specific `Hideable` derivation.
//!
//! Each variant becomes a struct node named `Enum::Variant` holding that
//! variant's fields, so only the active variant is walked.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DataEnum, Result};

use crate::{
    derive_struct::{collect_field_entries, struct_node},
    transform::DeriveContext,
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) node_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
    pub(crate) key_bounds: Vec<syn::WherePredicate>,
}

pub(crate) fn derive_enum(
    name: &Ident,
    data: DataEnum,
    generics: &syn::Generics,
) -> Result<EnumDeriveOutput> {
    let mut arms = Vec::new();
    let mut used_generics = Vec::new();
    let mut key_bounds = Vec::new();

    for variant in data.variants {
        let variant_ident = &variant.ident;
        let mut ctx = DeriveContext {
            generics,
            used_generics: &mut used_generics,
            key_bounds: &mut key_bounds,
        };
        let entries = collect_field_entries(&mut ctx, variant.fields)?;
        let patterns = entries.iter().map(|entry| &entry.pattern);
        let node = struct_node(&format!("{name}::{variant_ident}"), &entries);
        arms.push(quote! {
            Self::#variant_ident { #(#patterns,)* .. } => #node
        });
    }

    // An empty enum has no values to walk.
    let node_body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms),*
            }
        }
    };

    Ok(EnumDeriveOutput {
        node_body,
        used_generics,
        key_bounds,
    })
}
