//! Value model: types that can be walked and the node kinds they expose.
//!
//! Rust has no runtime reflection, so every walkable type describes itself
//! through [`Hideable::node`]. A [`Node`] is a one-level view of a value: it
//! borrows its children mutably and says what kind of location it is. The
//! walker in `super::walk` dispatches on that kind with a single `match`.
//!
//! ## Node Kinds
//!
//! | Kind | Produced by | Walker behavior |
//! |------|-------------|-----------------|
//! | `Pointer` | `&mut T`, `&T`, `Box`, `Option`, `Rc`, `Arc`, locks | Follow (or stop at null/shared) |
//! | `Struct` | `#[derive(Hide)]`, tuples, `Result` | Visit fields, refresh state on `#[hide]` |
//! | `Map` | `HashMap`, `BTreeMap` | Take each value out, walk it, reinsert it |
//! | `Seq` | `Vec`, `VecDeque`, slices, arrays | Visit elements in place |
//! | `Scalar` | numbers, `bool`, `char`, `String` | Overwrite when hiding |
//! | `Dynamic` | `serde_json::Value` | Walk the runtime kind |
//! | `Opaque` | `()`, `PhantomData`, sets, channels, raw pointers | Stop |
//! | `Unknown` | `dyn Any` | Fail with `UnknownType` |

use std::fmt;

use crate::{complex::Complex, error::HideError};

/// A type whose values can be walked by the redactor.
///
/// Implement this with `#[derive(Hide)]` for your own structs and enums. The
/// crate provides implementations for scalars and the common std pointers
/// and containers.
///
/// Manual implementations only need to describe one level of structure:
///
/// ```rust
/// use hide_fields::{Field, Hideable, Node, StructNode};
///
/// struct Login {
///     user: String,
///     password: String,
/// }
///
/// impl Hideable for Login {
///     fn node(&mut self) -> Node<'_> {
///         Node::Struct(StructNode::new(
///             "Login",
///             vec![
///                 Field::new("user", None, &mut self.user),
///                 Field::new("password", Some("***"), &mut self.password),
///             ],
///         ))
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Hideable`",
    label = "this type cannot be walked for hidden fields",
    note = "use `#[derive(Hide)]` on the type definition",
    note = "or mark the field with `#[hide(skip)]` to leave it out of the walk"
)]
pub trait Hideable {
    /// Returns a one-level view of this value.
    fn node(&mut self) -> Node<'_>;

    /// Whether a root of this type borrows the value it leads to.
    ///
    /// Only borrowed roots (`&mut T`, `Option<&mut T>`) are accepted by
    /// `hide_fields` and `Redactor::hide`. Mutations made through an owning
    /// root would be dropped with it.
    #[doc(hidden)]
    fn is_borrowed_root() -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// One location in the walked structure.
pub enum Node<'a> {
    /// A reference to another value.
    Pointer(Target<'a>),
    /// Named fields in declaration order.
    Struct(StructNode<'a>),
    /// Key/value pairs whose values are replaced as whole entries.
    Map(&'a mut dyn MapNode),
    /// Ordered, directly addressable elements.
    Seq(Vec<&'a mut dyn Hideable>),
    /// A leaf value.
    Scalar(Scalar<'a>),
    /// A value whose kind is decided at runtime.
    Dynamic(Box<Node<'a>>),
    /// Nothing to walk.
    Opaque,
    /// A value the walker cannot interpret.
    Unknown(&'static str),
}

impl Node<'_> {
    /// Short name of this node's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Pointer(_) => "pointer",
            Node::Struct(_) => "struct",
            Node::Map(_) => "map",
            Node::Seq(_) => "seq",
            Node::Scalar(_) => "scalar",
            Node::Dynamic(_) => "dynamic",
            Node::Opaque => "opaque",
            Node::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Struct(node) => f.debug_tuple("Struct").field(&node.name).finish(),
            Node::Scalar(scalar) => f.debug_tuple("Scalar").field(&scalar.type_name()).finish(),
            Node::Unknown(type_name) => f.debug_tuple("Unknown").field(type_name).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

/// Where a [`Node::Pointer`] leads.
pub enum Target<'a> {
    /// An absent reference (`None`).
    Null,
    /// A pointee reachable through a mutable borrow.
    Mutable(Box<Node<'a>>),
    /// A pointee that exists but cannot be mutated through this pointer.
    ///
    /// Holds the pointee's type name for error reporting.
    Shared(&'static str),
}

impl<'a> Target<'a> {
    /// Builds a mutable target from the pointee's node.
    pub fn to(node: Node<'a>) -> Self {
        Self::Mutable(Box::new(node))
    }
}

/// A struct (or the active variant of an enum) and its fields.
pub struct StructNode<'a> {
    pub(crate) name: &'static str,
    pub(crate) fields: Vec<Field<'a>>,
}

impl<'a> StructNode<'a> {
    /// Creates a struct node. Fields are walked in the given order.
    pub fn new(name: &'static str, fields: Vec<Field<'a>>) -> Self {
        Self { name, fields }
    }

    /// Type name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in walk order.
    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }
}

/// One field of a [`StructNode`].
pub struct Field<'a> {
    pub(crate) name: &'static str,
    pub(crate) hide: Option<&'static str>,
    pub(crate) value: &'a mut dyn Hideable,
}

impl<'a> Field<'a> {
    /// Creates a field.
    ///
    /// `hide` is the field's annotation: `Some(text)` starts hiding with
    /// `text` as the replacement for this field's subtree, `None` inherits
    /// whatever the enclosing value passes down.
    pub fn new(
        name: &'static str,
        hide: Option<&'static str>,
        value: &'a mut dyn Hideable,
    ) -> Self {
        Self { name, hide, value }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn hide(&self) -> Option<&'static str> {
        self.hide
    }
}

/// Visitor handed to [`MapNode::for_each_entry`].
///
/// Receives the entry's position in the key snapshot and the value taken out
/// of the map.
pub type EntryVisitor<'v> = dyn FnMut(usize, &mut dyn Hideable) -> Result<(), HideError> + 'v;

/// Associative containers whose entries are replaced as whole values.
///
/// Implementations must:
/// - take every entry out before visiting, so each value is owned by the
///   walk and never reached through a reference into the map,
/// - pass each value to the visitor,
/// - reinsert every entry under its original key, including the ones left
///   unvisited after the visitor failed.
///
/// The key set is unchanged afterwards.
pub trait MapNode {
    /// Visits every entry as described on the trait.
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), HideError>;
}

macro_rules! scalars {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// A mutable reference to a leaf value.
        ///
        /// Each variant knows how to test its value against the type's zero
        /// value and how to synthesize a replacement from text.
        pub enum Scalar<'a> {
            $(
                #[doc = concat!("A `", stringify!($ty), "` leaf.")]
                $variant(&'a mut $ty),
            )*
            /// A JSON number inside a `serde_json::Value`.
            #[cfg(feature = "json")]
            Number(&'a mut serde_json::Number),
        }

        impl Scalar<'_> {
            /// Name of the referenced type.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Scalar::$variant(_) => stringify!($ty),)*
                    #[cfg(feature = "json")]
                    Scalar::Number(_) => "serde_json::Number",
                }
            }

            /// Returns `true` if the value equals its type's zero value.
            pub fn is_zero(&self) -> bool {
                match self {
                    $(Scalar::$variant(value) => super::synthesize::IsZero::is_zero(&**value),)*
                    #[cfg(feature = "json")]
                    Scalar::Number(value) => super::synthesize::IsZero::is_zero(&**value),
                }
            }

            /// Overwrites the value with one synthesized from `text`.
            pub fn assign(&mut self, text: &str) {
                match self {
                    $(Scalar::$variant(value) => {
                        **value = super::synthesize::FromReplacement::from_replacement(text);
                    })*
                    #[cfg(feature = "json")]
                    Scalar::Number(value) => {
                        **value = super::synthesize::FromReplacement::from_replacement(text);
                    }
                }
            }
        }

        $(
            impl Hideable for $ty {
                fn node(&mut self) -> Node<'_> {
                    Node::Scalar(Scalar::$variant(self))
                }
            }
        )*
    };
}

scalars! {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    Complex64(Complex<f32>),
    Complex128(Complex<f64>),
    Str(String),
}
