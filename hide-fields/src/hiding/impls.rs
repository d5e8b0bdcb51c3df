//! `Hideable` implementations for standard library types.
//!
//! Scalars are implemented next to [`super::node::Scalar`]. This module covers
//! everything with structure:
//!
//! - pointers: references, `Box`, `Option`, `Rc`, `Arc`, `RefCell`, `Mutex`
//! - sequences: `Vec`, `VecDeque`, slices, arrays
//! - maps: `HashMap`, `BTreeMap` (entries taken out, walked, reinserted)
//! - struct-like values: tuples and `Result`
//! - opaque values: unit, `PhantomData`, sets, raw pointers, channels
//! - unknown values: `dyn Any`

use std::{
    any::{type_name, Any},
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
    mem,
    rc::Rc,
    sync::{
        mpsc::{Receiver, Sender, SyncSender},
        Arc, Mutex, PoisonError,
    },
};

use super::node::{EntryVisitor, Field, Hideable, MapNode, Node, StructNode, Target};
use crate::error::HideError;

// =============================================================================
// Pointers
// =============================================================================

impl<T> Hideable for &mut T
where
    T: Hideable + ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        Node::Pointer(Target::to((**self).node()))
    }

    fn is_borrowed_root() -> bool
    where
        Self: Sized,
    {
        true
    }
}

impl<T> Hideable for &T
where
    T: ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        Node::Pointer(Target::Shared(type_name::<T>()))
    }
}

impl<T> Hideable for Box<T>
where
    T: Hideable + ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        Node::Pointer(Target::to((**self).node()))
    }
}

impl<T> Hideable for Option<T>
where
    T: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        match self {
            Some(value) => Node::Pointer(Target::to(value.node())),
            None => Node::Pointer(Target::Null),
        }
    }

    fn is_borrowed_root() -> bool
    where
        Self: Sized,
    {
        T::is_borrowed_root()
    }
}

impl<T> Hideable for Rc<T>
where
    T: Hideable + ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        match Rc::get_mut(self) {
            Some(value) => Node::Pointer(Target::to(value.node())),
            None => Node::Pointer(Target::Shared(type_name::<T>())),
        }
    }
}

impl<T> Hideable for Arc<T>
where
    T: Hideable + ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        match Arc::get_mut(self) {
            Some(value) => Node::Pointer(Target::to(value.node())),
            None => Node::Pointer(Target::Shared(type_name::<T>())),
        }
    }
}

impl<T> Hideable for RefCell<T>
where
    T: Hideable + ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        Node::Pointer(Target::to(self.get_mut().node()))
    }
}

impl<T> Hideable for Mutex<T>
where
    T: Hideable + ?Sized,
{
    fn node(&mut self) -> Node<'_> {
        // A poisoned lock still hands out its data; hiding must not be skipped.
        let value = self.get_mut().unwrap_or_else(PoisonError::into_inner);
        Node::Pointer(Target::to(value.node()))
    }
}

// =============================================================================
// Sequences
// =============================================================================

fn as_dyn<T: Hideable>(item: &mut T) -> &mut dyn Hideable {
    item
}

impl<T> Hideable for [T]
where
    T: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        Node::Seq(self.iter_mut().map(as_dyn).collect())
    }
}

impl<T, const N: usize> Hideable for [T; N]
where
    T: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        self.as_mut_slice().node()
    }
}

impl<T> Hideable for Vec<T>
where
    T: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        self.as_mut_slice().node()
    }
}

impl<T> Hideable for VecDeque<T>
where
    T: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        Node::Seq(self.iter_mut().map(as_dyn).collect())
    }
}

// =============================================================================
// Maps
// =============================================================================

/// Walks entries that were taken out of a map and hands every one of them
/// back to `reinsert`, including those left unvisited after a failure.
pub(super) fn visit_taken<K, V>(
    entries: impl IntoIterator<Item = (K, V)>,
    visit: &mut EntryVisitor<'_>,
    mut reinsert: impl FnMut(K, V),
) -> Result<(), HideError>
where
    V: Hideable,
{
    let mut result = Ok(());
    for (index, (key, mut value)) in entries.into_iter().enumerate() {
        if result.is_ok() {
            result = visit(index, &mut value);
        }
        reinsert(key, value);
    }
    result
}

impl<K, V, S> MapNode for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Hideable,
    S: BuildHasher,
{
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), HideError> {
        let entries: Vec<(K, V)> = self.drain().collect();
        visit_taken(entries, visit, |key, value| {
            self.insert(key, value);
        })
    }
}

impl<K, V, S> Hideable for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Hideable,
    S: BuildHasher,
{
    fn node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}

impl<K, V> MapNode for BTreeMap<K, V>
where
    K: Ord,
    V: Hideable,
{
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), HideError> {
        let entries = mem::take(self);
        visit_taken(entries, visit, |key, value| {
            self.insert(key, value);
        })
    }
}

impl<K, V> Hideable for BTreeMap<K, V>
where
    K: Ord,
    V: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        Node::Map(self)
    }
}

// =============================================================================
// Struct-like values
// =============================================================================

impl<T, E> Hideable for Result<T, E>
where
    T: Hideable,
    E: Hideable,
{
    fn node(&mut self) -> Node<'_> {
        match self {
            Ok(value) => {
                Node::Struct(StructNode::new("Ok", vec![Field::new("0", None, value)]))
            }
            Err(err) => {
                Node::Struct(StructNode::new("Err", vec![Field::new("0", None, err)]))
            }
        }
    }
}

macro_rules! impl_tuple {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Hideable),+> Hideable for ($($name,)+) {
            fn node(&mut self) -> Node<'_> {
                Node::Struct(StructNode::new(
                    "tuple",
                    vec![$(Field::new(stringify!($index), None, &mut self.$index)),+],
                ))
            }
        }
    };
}

impl_tuple!(A: 0);
impl_tuple!(A: 0, B: 1);
impl_tuple!(A: 0, B: 1, C: 2);
impl_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);

// =============================================================================
// Opaque and unknown values
// =============================================================================

macro_rules! impl_opaque {
    ($(impl<$($param:ident),*> for $ty:ty;)*) => {$(
        impl<$($param: ?Sized),*> Hideable for $ty {
            fn node(&mut self) -> Node<'_> {
                Node::Opaque
            }
        }
    )*};
}

impl_opaque! {
    impl<> for ();
    impl<T> for PhantomData<T>;
    impl<T> for *const T;
    impl<T> for *mut T;
}

// Set elements are their own keys; replacing one would change the set.
impl<T, S> Hideable for HashSet<T, S> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

impl<T> Hideable for BTreeSet<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

impl<T> Hideable for Sender<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

impl<T> Hideable for SyncSender<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

impl<T> Hideable for Receiver<T> {
    fn node(&mut self) -> Node<'_> {
        Node::Opaque
    }
}

impl Hideable for dyn Any {
    fn node(&mut self) -> Node<'_> {
        Node::Unknown("dyn Any")
    }
}

impl Hideable for dyn Any + Send {
    fn node(&mut self) -> Node<'_> {
        Node::Unknown("dyn Any + Send")
    }
}

impl Hideable for dyn Any + Send + Sync {
    fn node(&mut self) -> Node<'_> {
        Node::Unknown("dyn Any + Send + Sync")
    }
}
