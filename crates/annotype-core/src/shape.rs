//! Shape classification: the closed set of forms a value can take.
//!
//! Every value handed to the inferencer is classified exactly once, through
//! [`Inspect::shape`], into one of the [`Shape`] variants. The impls below are
//! the adapter registry mapping concrete Rust types onto those variants.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

/// Leaf types recognized by exact identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Primitive {
    Bool,
    Float,
    Int,
    Str,
    None,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::Str => "str",
            Self::None => "None",
        }
    }
}

/// The four recognized container forms.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ContainerKind {
    /// Key to value association.
    Mapping,
    /// Ordered, duplicate-permitting, variable length.
    Sequence,
    /// Unordered, duplicate-free.
    Set,
    /// Ordered, positionally typed, length fixed by the instance.
    Tuple,
}

impl ContainerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Mapping => "dict",
            Self::Sequence => "list",
            Self::Set => "set",
            Self::Tuple => "tuple",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified view of a single value.
///
/// Containers borrow their children as `&dyn Inspect` so the walk can
/// classify each child in turn. Anything that is neither a primitive nor one
/// of the containers is `Opaque`, carrying its runtime type name.
pub enum Shape<'a> {
    Primitive(Primitive),
    Mapping(Vec<(&'a dyn Inspect, &'a dyn Inspect)>),
    Sequence(Vec<&'a dyn Inspect>),
    Set(Vec<&'a dyn Inspect>),
    Tuple(Vec<&'a dyn Inspect>),
    Opaque(Cow<'a, str>),
}

impl Shape<'_> {
    /// Container kind, or `None` for primitives and opaque values.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Shape::Primitive(_) | Shape::Opaque(_) => None,
            Shape::Mapping(_) => Some(ContainerKind::Mapping),
            Shape::Sequence(_) => Some(ContainerKind::Sequence),
            Shape::Set(_) => Some(ContainerKind::Set),
            Shape::Tuple(_) => Some(ContainerKind::Tuple),
        }
    }

    /// Number of entries (mapping) or elements (other containers).
    pub fn len(&self) -> Option<usize> {
        match self {
            Shape::Primitive(_) | Shape::Opaque(_) => None,
            Shape::Mapping(entries) => Some(entries.len()),
            Shape::Sequence(items) | Shape::Set(items) | Shape::Tuple(items) => Some(items.len()),
        }
    }

    /// Display name for the value's kind, as used in mismatch messages.
    pub fn kind_name(&self) -> &str {
        match self {
            Shape::Primitive(p) => p.name(),
            Shape::Opaque(name) => name.as_ref(),
            Shape::Mapping(_) => ContainerKind::Mapping.name(),
            Shape::Sequence(_) => ContainerKind::Sequence.name(),
            Shape::Set(_) => ContainerKind::Set.name(),
            Shape::Tuple(_) => ContainerKind::Tuple.name(),
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len() {
            Some(len) => write!(f, "Shape({}, len={len})", self.kind_name()),
            None => write!(f, "Shape({})", self.kind_name()),
        }
    }
}

/// Capability inspection at the language boundary.
///
/// Implementors report which [`Shape`] they have. Only types that report
/// [`Shape::Primitive`] are primitives: a newtype around `i64` is an `int`
/// only if its impl says so, otherwise it should report [`Shape::Opaque`]
/// (see [`opaque`]).
pub trait Inspect {
    fn shape(&self) -> Shape<'_>;
}

/// Opaque shape named after `T`'s Rust type name.
pub fn opaque<T: ?Sized>() -> Shape<'static> {
    Shape::Opaque(Cow::Borrowed(std::any::type_name::<T>()))
}

pub(crate) fn refs<'a, T: Inspect + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> Vec<&'a dyn Inspect> {
    items.into_iter().map(|item| item as &dyn Inspect).collect()
}

pub(crate) fn entries<'a, K: Inspect + 'a, V: Inspect + 'a>(
    items: impl IntoIterator<Item = (&'a K, &'a V)>,
) -> Vec<(&'a dyn Inspect, &'a dyn Inspect)> {
    items
        .into_iter()
        .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
        .collect()
}

// ============================================================================
// Primitives
// ============================================================================

macro_rules! primitive_impls {
    ($prim:ident => $($ty:ty),+) => {
        $(
            impl Inspect for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Primitive(Primitive::$prim)
                }
            }
        )+
    };
}

primitive_impls!(Int => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
primitive_impls!(Float => f32, f64);
primitive_impls!(Bool => bool);
primitive_impls!(Str => str, String);
primitive_impls!(None => ());

impl<T: Inspect> Inspect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            None => Shape::Primitive(Primitive::None),
            Some(value) => value.shape(),
        }
    }
}

// ============================================================================
// Pointers
// ============================================================================

impl<T: Inspect + ?Sized> Inspect for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

// ============================================================================
// Sequences
// ============================================================================

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self))
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self))
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self))
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(refs(self))
    }
}

// ============================================================================
// Sets
// ============================================================================

impl<T: Inspect, S> Inspect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(refs(self.iter()))
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(refs(self))
    }
}

impl<T: Inspect, S> Inspect for IndexSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(refs(self.iter()))
    }
}

// ============================================================================
// Mappings
// ============================================================================

impl<K: Inspect, V: Inspect, S> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(entries(self.iter()))
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(entries(self))
    }
}

impl<K: Inspect, V: Inspect, S> Inspect for IndexMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(entries(self.iter()))
    }
}

// ============================================================================
// Tuples
// ============================================================================

macro_rules! tuple_impls {
    ($( ( $($name:ident $idx:tt),+ ) )+) => {
        $(
            impl<$($name: Inspect),+> Inspect for ($($name,)+) {
                fn shape(&self) -> Shape<'_> {
                    Shape::Tuple(vec![$(&self.$idx as &dyn Inspect),+])
                }
            }
        )+
    };
}

tuple_impls! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10)
    (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11)
}

// ============================================================================
// JSON
// ============================================================================

/// JSON numbers are `int` when they fit `i64`/`u64`, `float` otherwise.
impl Inspect for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        use serde_json::Value as Json;

        match self {
            Json::Null => Shape::Primitive(Primitive::None),
            Json::Bool(_) => Shape::Primitive(Primitive::Bool),
            Json::Number(n) if n.is_i64() || n.is_u64() => Shape::Primitive(Primitive::Int),
            Json::Number(_) => Shape::Primitive(Primitive::Float),
            Json::String(_) => Shape::Primitive(Primitive::Str),
            Json::Array(items) => Shape::Sequence(refs(items)),
            Json::Object(fields) => Shape::Mapping(entries(fields)),
        }
    }
}
