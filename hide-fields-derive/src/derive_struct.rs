//! Struct-specific `Hideable` derivation.
//!
//! This module generates the field list for a struct node and collects
//! generic parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataStruct, Fields, Member, Result};

use crate::{
    crate_path,
    strategy::parse_field_strategy,
    transform::{generate_field_entry, DeriveContext, FieldEntry},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) node_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
    pub(crate) key_bounds: Vec<syn::WherePredicate>,
}

/// Collects the walked fields of one struct or enum variant.
pub(crate) fn collect_field_entries(
    ctx: &mut DeriveContext<'_>,
    fields: Fields,
) -> Result<Vec<FieldEntry>> {
    let mut entries = Vec::new();
    for (index, field) in fields.into_iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let (member, binding) = match field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident),
            None => (Member::from(index), format_ident!("field_{index}")),
        };
        if let Some(entry) =
            generate_field_entry(ctx, &member, &field.ty, &binding, span, &strategy)
        {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Builds the `Node::Struct(..)` expression from bound field entries.
pub(crate) fn struct_node(node_name: &str, entries: &[FieldEntry]) -> TokenStream {
    let node_path = crate_path("Node");
    let struct_node_path = crate_path("StructNode");
    let fields = entries.iter().map(|entry| &entry.entry);
    quote! {
        #node_path::Struct(#struct_node_path::new(
            #node_name,
            ::std::vec![#(#fields),*],
        ))
    }
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let mut used_generics = Vec::new();
    let mut key_bounds = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        used_generics: &mut used_generics,
        key_bounds: &mut key_bounds,
    };

    let entries = collect_field_entries(&mut ctx, data.fields)?;
    let patterns = entries.iter().map(|entry| &entry.pattern);
    let node = struct_node(&name.to_string(), &entries);

    Ok(StructDeriveOutput {
        node_body: quote! {
            let Self { #(#patterns,)* .. } = self;
            #node
        },
        used_generics,
        key_bounds,
    })
}
