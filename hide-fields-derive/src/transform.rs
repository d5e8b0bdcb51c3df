//! Shared field entry generation for struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::Member;

use crate::{
    crate_path,
    generics::{collect_generics_from_type, collect_key_bounds},
    strategy::Strategy,
};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    /// Generic parameters that must implement `Hideable`.
    pub(crate) used_generics: &'a mut Vec<Ident>,
    /// `Eq + Hash` or `Ord` predicates for generic map key types.
    pub(crate) key_bounds: &'a mut Vec<syn::WherePredicate>,
}

/// A walked field: the pattern that binds it and the `Field` entry built from
/// the binding.
pub(crate) struct FieldEntry {
    pub(crate) pattern: TokenStream,
    pub(crate) entry: TokenStream,
}

/// Generates the binding pattern and `Field::new(..)` entry for one field.
///
/// Returns `None` for `#[hide(skip)]` fields, which are neither bound nor
/// walked.
///
/// ## Field Entry Rules
///
/// | Annotation | Entry |
/// |------------|-------|
/// | None | `Field::new(name, None, binding)` |
/// | `#[hide = "x"]` | `Field::new(name, Some("x"), binding)` |
/// | `#[hide(skip)]` | omitted |
pub(crate) fn generate_field_entry(
    ctx: &mut DeriveContext<'_>,
    member: &Member,
    ty: &syn::Type,
    binding: &Ident,
    span: Span,
    strategy: &Strategy,
) -> Option<FieldEntry> {
    let hide = match strategy {
        Strategy::Skip => return None,
        Strategy::Inherit => quote! { ::core::option::Option::None },
        Strategy::Hide(text) => quote! { ::core::option::Option::Some(#text) },
    };

    collect_generics_from_type(ty, ctx.generics, ctx.used_generics);
    collect_key_bounds(ty, ctx.generics, ctx.key_bounds);

    let name = match member {
        Member::Named(ident) => syn::ext::IdentExt::unraw(ident).to_string(),
        Member::Unnamed(index) => index.index.to_string(),
    };
    let field_path = crate_path("Field");
    Some(FieldEntry {
        pattern: quote! { #member: #binding },
        entry: quote_spanned! { span =>
            #field_path::new(#name, #hide, #binding)
        },
    })
}
