//! Application layer: the walker and its entrypoints.
//!
//! The walker visits a [`Node`] tree depth first and carries a [`Hiding`]
//! state downward. A field annotated with `#[hide = "..."]` starts hiding
//! with its own replacement text; an unannotated field inherits whatever its
//! parent passed down. Leaves are overwritten only while hiding is active
//! and only if they do not already hold their type's zero value.
//!
//! Map entries are never mutated through a reference. The [`MapNode`]
//! implementation takes each value out of the map, hands it to the walker,
//! and reinserts it under the same key.
//!
//! Shared pointees only matter where a write could happen. Under an inactive
//! state they are passed over silently.

#[cfg(feature = "slog")]
use slog::Logger;

use super::node::{Hideable, MapNode, Node, Scalar, StructNode, Target};
use crate::error::{FieldPath, HideError, PathSegment};

/// What to do when hiding reaches a pointee that cannot be mutated.
///
/// Shared pointees are `&T` references and `Rc`/`Arc` values with more than
/// one owner. Their contents are never walked. The policy applies only while
/// hiding is active. Elsewhere they are left alone without error, along with
/// any annotated fields inside them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SharedPolicy {
    /// Fail with [`HideError::ImmutableField`].
    #[default]
    Fail,
    /// Record the path in [`HideReport::skipped`] and continue.
    Skip,
}

/// Summary of a successful hide operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HideReport {
    /// Number of leaves that were overwritten.
    pub hidden: usize,
    /// Shared pointees that were left unvisited under [`SharedPolicy::Skip`].
    pub skipped: Vec<FieldPath>,
}

/// Configurable entrypoint for hiding fields.
///
/// A `Redactor` holds no per-call state and can be shared freely.
///
/// ```rust
/// use hide_fields::{Hide, Redactor, SharedPolicy};
///
/// #[derive(Clone, Hide)]
/// # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
/// struct Session {
///     user: String,
///     #[hide = "****"]
///     token: String,
/// }
///
/// let mut session = Session {
///     user: "ada".into(),
///     token: "tok_123".into(),
/// };
/// let report = Redactor::new()
///     .with_shared_policy(SharedPolicy::Skip)
///     .hide(&mut session)
///     .unwrap();
/// assert_eq!(session.token, "****");
/// assert_eq!(report.hidden, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Redactor {
    shared: SharedPolicy,
    #[cfg(feature = "slog")]
    logger: Option<Logger>,
}

impl Redactor {
    /// Creates a redactor that fails on shared pointees and does not log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how shared pointees are handled.
    #[must_use]
    pub fn with_shared_policy(mut self, policy: SharedPolicy) -> Self {
        self.shared = policy;
        self
    }

    /// Emits `debug` records for skipped pointees and `trace` records for
    /// overwritten leaves. Values themselves are never logged.
    #[cfg(feature = "slog")]
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Hides the annotated fields reachable from `value`, in place.
    ///
    /// `value` must borrow what it points to (`&mut T` or `Option<&mut T>`).
    /// An absent pointer is a successful no-op. Anything else, including an
    /// owning pointer such as `Box<T>` passed by value, fails with
    /// [`HideError::NotAPointer`] before the walk starts.
    pub fn hide<T>(&self, mut value: T) -> Result<HideReport, HideError>
    where
        T: Hideable,
    {
        let not_a_pointer = || HideError::NotAPointer {
            type_name: std::any::type_name::<T>(),
        };
        if !T::is_borrowed_root() {
            return Err(not_a_pointer());
        }
        let Node::Pointer(target) = value.node() else {
            return Err(not_a_pointer());
        };

        let mut walker = Walker {
            redactor: self,
            path: FieldPath::root(),
            report: HideReport::default(),
        };
        walker.pointer(target, Hiding::INACTIVE)?;
        Ok(walker.report)
    }
}

/// Hides the annotated fields reachable from `value` with the default
/// [`Redactor`].
///
/// ```rust
/// use hide_fields::{hide_fields, Hide};
///
/// #[derive(Clone, Hide)]
/// # #[cfg_attr(feature = "slog", derive(serde::Serialize))]
/// struct Card {
///     holder: String,
///     #[hide = "0"]
///     number: u64,
///     #[hide]
///     cvv: String,
/// }
///
/// let mut card = Card {
///     holder: "Ada".into(),
///     number: 4111_1111_1111_1111,
///     cvv: "123".into(),
/// };
/// hide_fields(&mut card).unwrap();
/// assert_eq!(card.holder, "Ada");
/// assert_eq!(card.number, 0);
/// assert_eq!(card.cvv, "");
/// ```
pub fn hide_fields<T>(value: T) -> Result<(), HideError>
where
    T: Hideable,
{
    Redactor::new().hide(value).map(drop)
}

/// Hiding state carried down the walk.
#[derive(Clone, Copy, Debug)]
struct Hiding {
    active: bool,
    replacement: &'static str,
}

impl Hiding {
    const INACTIVE: Self = Self {
        active: false,
        replacement: "",
    };

    fn with(replacement: &'static str) -> Self {
        Self {
            active: true,
            replacement,
        }
    }
}

struct Walker<'r> {
    redactor: &'r Redactor,
    path: FieldPath,
    report: HideReport,
}

impl Walker<'_> {
    fn walk(&mut self, node: Node<'_>, state: Hiding) -> Result<(), HideError> {
        match node {
            Node::Pointer(target) => self.pointer(target, state),
            Node::Struct(node) => self.structure(node, state),
            Node::Map(map) => self.map(map, state),
            Node::Seq(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    self.walk(item.node(), state)?;
                    self.path.pop();
                }
                Ok(())
            }
            Node::Scalar(scalar) => {
                self.scalar(scalar, state);
                Ok(())
            }
            Node::Dynamic(inner) => self.walk(*inner, state),
            Node::Opaque => Ok(()),
            Node::Unknown(type_name) => Err(HideError::UnknownType {
                type_name,
                path: self.path.clone(),
            }),
        }
    }

    fn pointer(&mut self, target: Target<'_>, state: Hiding) -> Result<(), HideError> {
        match target {
            Target::Null => Ok(()),
            Target::Mutable(inner) => self.walk(*inner, state),
            Target::Shared(_) if !state.active => Ok(()),
            Target::Shared(type_name) => match self.redactor.shared {
                SharedPolicy::Fail => Err(HideError::ImmutableField {
                    type_name,
                    path: self.path.clone(),
                }),
                SharedPolicy::Skip => {
                    #[cfg(feature = "slog")]
                    if let Some(logger) = &self.redactor.logger {
                        slog::debug!(logger, "skipping shared pointee";
                            "path" => %self.path, "type" => type_name);
                    }
                    self.report.skipped.push(self.path.clone());
                    Ok(())
                }
            },
        }
    }

    fn structure(&mut self, node: StructNode<'_>, state: Hiding) -> Result<(), HideError> {
        for field in node.fields {
            let state = field.hide.map_or(state, Hiding::with);
            self.path.push(PathSegment::Field(field.name));
            self.walk(field.value.node(), state)?;
            self.path.pop();
        }
        Ok(())
    }

    fn map(&mut self, map: &mut dyn MapNode, state: Hiding) -> Result<(), HideError> {
        map.for_each_entry(&mut |index: usize, value: &mut dyn Hideable| {
            self.path.push(PathSegment::Entry(index));
            self.walk(value.node(), state)?;
            self.path.pop();
            Ok(())
        })
    }

    fn scalar(&mut self, mut scalar: Scalar<'_>, state: Hiding) {
        if !state.active || scalar.is_zero() {
            return;
        }
        scalar.assign(state.replacement);
        #[cfg(feature = "slog")]
        if let Some(logger) = &self.redactor.logger {
            slog::trace!(logger, "hid field";
                "path" => %self.path, "type" => scalar.type_name());
        }
        self.report.hidden += 1;
    }
}
