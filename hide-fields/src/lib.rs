//! Annotation-driven hiding of sensitive fields, in place.
//!
//! Mark fields with `#[hide]` and the walker overwrites them (and everything
//! nested beneath them) before the value is logged or serialized:
//!
//! ```rust
//! use hide_fields::{hide_fields, Hide};
//!
//! #[derive(Clone, Hide)]
//! # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
//! struct Login {
//!     user: String,
//!     #[hide = "********"]
//!     password: String,
//!     #[hide]
//!     attempts: u32,
//! }
//!
//! let mut login = Login {
//!     user: "ada".into(),
//!     password: "hunter2".into(),
//!     attempts: 3,
//! };
//! hide_fields(&mut login).unwrap();
//! assert_eq!(login.password, "********");
//! assert_eq!(login.attempts, 0);
//! assert_eq!(login.user, "ada");
//! ```
//!
//! Key rules:
//! - `#[hide = "text"]` hides the field's subtree with `text` as the replacement,
//!   parsed into each leaf's type (`"42"` for integers, `"true"` for booleans, ...).
//! - `#[hide]` hides with an empty replacement, which yields each leaf's zero value.
//! - Unannotated fields inherit the hiding state of their parent.
//! - `#[hide(skip)]` leaves a field out of the walk entirely.
//! - Leaves already holding their type's zero value are never rewritten.
//! - Text that does not parse for a leaf's type degrades to the zero value.
//!
//! What this crate does:
//! - defines the [`Hideable`] value model and std implementations
//! - walks values and overwrites leaves through [`hide_fields`] or [`Redactor`]
//! - provides integrations behind feature flags (`json`, `slog`)
//!
//! What it does not do:
//! - perform I/O or logging of values
//! - write through shared pointers (under a hidden field they are reported,
//!   elsewhere passed over)

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
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use hide_fields_derive::Hide;

// Lets derived code refer to `::hide_fields` from inside this crate.
#[allow(unused_extern_crates)]
extern crate self as hide_fields;

// Module declarations
mod complex;
mod error;
mod hiding;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use complex::{Complex, ParseComplexError};
pub use error::{FieldPath, HideError, PathSegment};
pub use hiding::{
    hide_fields, EntryVisitor, Field, FromReplacement, HideReport, Hideable, IsZero, MapNode,
    Node, Redactor, Scalar, SharedPolicy, StructNode, Target,
};
