//! Parsing of `#[hide ...]` field attributes.
//!
//! This module maps attribute syntax to walk decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Expr, ExprLit, ExprUnary, Lit, Meta, Result, UnOp};

/// Field walk strategy based on `#[hide ...]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Inherit` | Walked with the parent's hiding state |
/// | `#[hide]` | `Hide("")` | Hides the subtree with zero values |
/// | `#[hide = "text"]` | `Hide("text")` | Hides the subtree with `text` |
/// | `#[hide(skip)]` | `Skip` | Not walked at all |
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// No annotation: the field is walked and inherits the parent's state.
    Inherit,
    /// The field starts hiding with the given replacement text.
    Hide(String),
    /// The field is left out of the node; its type need not be `Hideable`.
    Skip,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[hide] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

/// Renders a literal as replacement text.
///
/// Numeric literals keep their digits and drop any type suffix, so
/// `#[hide = 8u8]` and `#[hide = "8"]` are equivalent.
fn replacement_text(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(text) => Some(text.value()),
            Lit::Int(int) => Some(int.base10_digits().to_string()),
            Lit::Float(float) => Some(float.base10_digits().to_string()),
            Lit::Bool(flag) => Some(flag.value.to_string()),
            Lit::Char(ch) => Some(ch.value().to_string()),
            _ => None,
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => match expr.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(_) | Lit::Float(_),
                ..
            }) => replacement_text(expr).map(|digits| format!("-{digits}")),
            _ => None,
        },
        Expr::Group(group) => replacement_text(&group.expr),
        _ => None,
    }
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("hide") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[hide] - hide with an empty replacement
                set_strategy(&mut strategy, Strategy::Hide(String::new()), attr.span())?;
            }
            Meta::NameValue(name_value) => {
                let Some(text) = replacement_text(&name_value.value) else {
                    return Err(syn::Error::new(
                        name_value.value.span(),
                        "expected a string, numeric, bool or char literal (e.g., #[hide = \"***\"])",
                    ));
                };
                set_strategy(&mut strategy, Strategy::Hide(text), attr.span())?;
            }
            Meta::List(list) => match syn::parse2::<syn::Ident>(list.tokens.clone()) {
                Ok(option) if option == "skip" => {
                    set_strategy(&mut strategy, Strategy::Skip, attr.span())?;
                }
                _ => {
                    return Err(syn::Error::new(
                        attr.span(),
                        "unsupported #[hide(...)] option: the only option is #[hide(skip)]",
                    ));
                }
            },
        }
    }

    Ok(strategy.unwrap_or(Strategy::Inherit))
}
