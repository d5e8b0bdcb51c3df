//! Value model, traversal, and entrypoints.
//!
//! This module ties the pieces together:
//!
//! - **`node`**: Domain layer - what can be walked (`Hideable`, `Node`, `MapNode`, `Scalar`)
//! - **`synthesize`**: Value layer - how replacement text becomes a typed value
//! - **`walk`**: Application layer - the walker and its entrypoints (`hide_fields`, `Redactor`)
//! - **`impls`** / **`json`**: `Hideable` for std and `serde_json` types

mod impls;
#[cfg(feature = "json")]
mod json;
mod node;
mod synthesize;
mod walk;

pub use node::{EntryVisitor, Field, Hideable, MapNode, Node, Scalar, StructNode, Target};
pub use synthesize::{FromReplacement, IsZero};
pub use walk::{hide_fields, HideReport, Redactor, SharedPolicy};
