//! Generic type parameter handling and trait bound management.
//!
//! This module adds bounds only for generics that are used by walked fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` fields are explicitly skipped when collecting generics:
//!
//! ```ignore
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T should NOT require Hideable
//! }
//! ```
//!
//! `PhantomData` is opaque to the walker whatever `T` is, so `TypedId<Instant>`
//! still derives.
//!
//! ## Map Keys
//!
//! Keys of `HashMap` and `BTreeMap` are never walked, so they get no
//! `Hideable` bound. A key type that mentions a generic parameter gets the
//! bound its map's `Hideable` impl needs instead (`Eq + Hash` or `Ord`).

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "PhantomData" {
                    return;
                }

                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    // Only the value of a map is walked, not its key or hasher.
                    let (skip, take) = match map_key_bound(segment) {
                        Some(_) => (1, 1),
                        None => (0, usize::MAX),
                    };
                    let types = args.args.iter().filter_map(|arg| match arg {
                        syn::GenericArgument::Type(inner_ty) => Some(inner_ty),
                        _ => None,
                    });
                    for inner_ty in types.skip(skip).take(take) {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }

                for param in generics.type_params() {
                    if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                        result.push(param.ident.clone());
                    }
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        _ => {}
    }
}

/// Adds `Hideable` bounds to generic parameters used in walked fields.
pub(crate) fn add_hideable_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    let hideable_path = crate_path("Hideable");
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#hideable_path));
        }
    }
    generics
}

/// The bound a map's key type needs, if `segment` names a map.
fn map_key_bound(segment: &syn::PathSegment) -> Option<TokenStream> {
    if segment.ident == "HashMap" {
        Some(quote!(::core::cmp::Eq + ::core::hash::Hash))
    } else if segment.ident == "BTreeMap" {
        Some(quote!(::core::cmp::Ord))
    } else {
        None
    }
}

/// Collects key predicates for maps anywhere inside `ty`.
pub(crate) fn collect_key_bounds(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<syn::WherePredicate>,
) {
    match ty {
        syn::Type::Path(path) => {
            for segment in &path.path.segments {
                if segment.ident == "PhantomData" {
                    return;
                }
                let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
                    continue;
                };
                let mut types = args.args.iter().filter_map(|arg| match arg {
                    syn::GenericArgument::Type(inner_ty) => Some(inner_ty),
                    _ => None,
                });
                if let Some(bound) = map_key_bound(segment) {
                    if let Some(key) = types.next() {
                        push_predicate(key, bound, generics, result);
                    }
                    if let Some(value) = types.next() {
                        collect_key_bounds(value, generics, result);
                    }
                    if let Some(hasher) = types.next() {
                        push_predicate(hasher, quote!(::core::hash::BuildHasher), generics, result);
                    }
                    continue;
                }
                for inner_ty in types {
                    collect_key_bounds(inner_ty, generics, result);
                }
            }
        }
        syn::Type::Reference(reference) => collect_key_bounds(&reference.elem, generics, result),
        syn::Type::Array(array) => collect_key_bounds(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_key_bounds(&slice.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_key_bounds(elem, generics, result);
            }
        }
        syn::Type::Paren(paren) => collect_key_bounds(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_key_bounds(&group.elem, generics, result),
        _ => {}
    }
}

/// Pushes `ty: bound` once, and only when `ty` mentions a type parameter.
fn push_predicate(
    ty: &syn::Type,
    bound: TokenStream,
    generics: &syn::Generics,
    result: &mut Vec<syn::WherePredicate>,
) {
    let mut mentioned = Vec::new();
    collect_generics_from_type(ty, generics, &mut mentioned);
    let predicate: syn::WherePredicate = parse_quote!(#ty: #bound);
    if !mentioned.is_empty() && !result.contains(&predicate) {
        result.push(predicate);
    }
}

/// Adds the collected key predicates to the where clause.
pub(crate) fn add_key_bounds(
    mut generics: syn::Generics,
    key_bounds: &[syn::WherePredicate],
) -> syn::Generics {
    if !key_bounds.is_empty() {
        generics
            .make_where_clause()
            .predicates
            .extend(key_bounds.iter().cloned());
    }
    generics
}
