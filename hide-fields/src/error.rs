//! Errors raised while hiding fields, and the paths they point at.

use std::fmt;

use thiserror::Error;

/// One step from a value to one of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A struct or enum field, by name.
    Field(&'static str),
    /// An element of a sequence, by position.
    Index(usize),
    /// A map entry, by position in the key snapshot.
    Entry(usize),
}

/// Location of a node relative to the root, rendered as `$.a.b[2]{0}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The root path, `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Segments from the root outward.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Entry(index) => write!(f, "{{{index}}}")?,
            }
        }
        Ok(())
    }
}

/// Failure of a hide operation.
///
/// Traversal is not transactional: when an error is returned, leaves visited
/// before the failing node have already been overwritten.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HideError {
    /// The root value was not passed by reference, so changes would be lost.
    #[error("not a pointer: `{type_name}` must be passed by mutable reference")]
    NotAPointer {
        /// Type of the rejected root.
        type_name: &'static str,
    },
    /// The walk reached a value it cannot interpret.
    #[error("unknown type `{type_name}` at `{path}`")]
    UnknownType {
        /// Type reported by the node.
        type_name: &'static str,
        /// Where the node was found.
        path: FieldPath,
    },
    /// The walk reached a value that cannot be mutated through its pointer.
    #[error("cannot hide `{path}`: `{type_name}` is shared and cannot be mutated")]
    ImmutableField {
        /// Type of the shared pointee.
        type_name: &'static str,
        /// Where the pointer was found.
        path: FieldPath,
    },
}
