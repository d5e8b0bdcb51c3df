//! Derive macro for `hide-fields`.
//!
//! This crate generates the node code behind `#[derive(Hide)]`. It:
//! - reads `#[hide ...]` field attributes
//! - emits a `Hideable` implementation describing the value's fields
//!
//! It does **not** walk or overwrite anything. The walker lives in the main
//! `hide-fields` crate and runs at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
#[cfg(feature = "slog")]
use syn::parse_quote;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_hideable_bounds, add_key_bounds};

/// Derives `hide_fields::Hideable` (and related impls) for structs and enums.
///
/// # Field Attributes
///
/// - **No annotation**: The field is walked and inherits the hiding state of
///   its parent. Its type must implement `Hideable`.
///
/// - `#[hide]`: Hides every leaf reachable from the field with an empty
///   replacement, which parses to each leaf's zero value.
///
/// - `#[hide = "text"]`: Hides every leaf reachable from the field with
///   `text`, parsed into the leaf's type. Numeric, bool and char literals are
///   accepted too (`#[hide = 42]`, `#[hide = -1.5]`, `#[hide = true]`).
///
/// - `#[hide(skip)]`: The field is not walked. Its type does not need to
///   implement `Hideable`.
///
/// Enums expose only the active variant. Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `slog::Value` (behind `cfg(feature = "slog")`): implemented by cloning the value and routing
///   it through `hide_fields::slog::IntoHiddenJson`. **Note:** this impl requires the type to
///   implement `Clone` and `serde::Serialize`. The derive first looks for a top-level `slog`
///   crate; if not found, it checks the `HIDE_FIELDS_SLOG_CRATE` env var for an alternate path
///   (e.g., `my_log::slog`). If neither is available, compilation fails with a clear error.
#[proc_macro_derive(Hide, attributes(hide))]
pub fn derive_hide(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the hide-fields crate root.
///
/// Handles crate renaming (e.g., `redact = { package = "hide-fields", ... }`).
/// Inside hide-fields itself the crate is reachable as `::hide_fields`
/// through `extern crate self`, which also covers its tests and doctests.
fn crate_root() -> TokenStream {
    match crate_name("hide-fields") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::hide_fields },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// Handles crate renaming (e.g., `my_slog = { package = "slog", ... }`).
/// If the top-level `slog` crate is not available, falls back to the
/// `HIDE_FIELDS_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("HIDE_FIELDS_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the HIDE_FIELDS_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("HIDE_FIELDS_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

/// Path to a top-level item of the hide-fields crate.
fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item = format_ident!("{}", item);
    quote! { #root::#item }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let crate_root = crate_root();

    let (node_body, used_generics, key_bounds) = match data {
        Data::Struct(data) => {
            let output = derive_struct(&ident, data, &generics)?;
            (output.node_body, output.used_generics, output.key_bounds)
        }
        Data::Enum(data) => {
            let output = derive_enum(&ident, data, &generics)?;
            (output.node_body, output.used_generics, output.key_bounds)
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Hide` cannot be derived for unions",
            ));
        }
    };

    let node_generics = add_hideable_bounds(generics.clone(), &used_generics);
    let node_generics = add_key_bounds(node_generics, &key_bounds);
    let (impl_generics, ty_generics, where_clause) = node_generics.split_for_impl();

    // Only generate slog impl when the slog feature is enabled on hide-fields-derive.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        let mut slog_generics = generics;
        let slog_where_clause = slog_generics.make_where_clause();
        let self_ty: syn::Type = parse_quote!(#ident #ty_generics);
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::core::clone::Clone));
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::serde::Serialize));
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: #crate_root::slog::IntoHiddenJson));
        let (slog_impl_generics, slog_ty_generics, slog_where_clause) =
            slog_generics.split_for_impl();
        quote! {
            impl #slog_impl_generics #slog_crate::Value for #ident #slog_ty_generics #slog_where_clause {
                fn serialize(
                    &self,
                    _record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    let hidden = #crate_root::slog::IntoHiddenJson::into_hidden_json(self.clone());
                    #slog_crate::Value::serialize(&hidden, _record, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    Ok(quote! {
        impl #impl_generics #crate_root::Hideable for #ident #ty_generics #where_clause {
            fn node(&mut self) -> #crate_root::Node<'_> {
                #node_body
            }
        }

        #slog_impl

        // `slog` already provides `impl<V: Value> Value for &V`, so a reference
        // impl here would conflict with the blanket impl.
    })
}
