//! Type descriptors produced by inference.
//!
//! A descriptor is a plain tree: every call builds a fresh one and hands
//! ownership to the caller. Equality is structural, with union members
//! compared as a set.

use std::collections::BTreeSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use annotype_core::{ContainerKind, Primitive};
use indexmap::IndexSet;

/// Leaf type tag.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ScalarType {
    Bool,
    Float,
    Int,
    Str,
    None,
    /// Runtime type name of a value outside the recognized forms.
    Opaque(String),
}

impl ScalarType {
    /// The primitive this tag stands for, `None` for opaque types.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Bool => Some(Primitive::Bool),
            Self::Float => Some(Primitive::Float),
            Self::Int => Some(Primitive::Int),
            Self::Str => Some(Primitive::Str),
            Self::None => Some(Primitive::None),
            Self::Opaque(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Opaque(name) => name.as_str(),
            _ => self.primitive().map(Primitive::name).unwrap_or_default(),
        }
    }
}

impl From<Primitive> for ScalarType {
    fn from(p: Primitive) -> Self {
        match p {
            Primitive::Bool => Self::Bool,
            Primitive::Float => Self::Float,
            Primitive::Int => Self::Int,
            Primitive::Str => Self::Str,
            Primitive::None => Self::None,
        }
    }
}

/// Inferred structural type of a value.
#[derive(Clone, Debug)]
pub enum TypeDescriptor {
    Scalar(ScalarType),
    /// One of several types. Holds at least two distinct members when built
    /// through [`TypeDescriptor::union`], the only constructor that upholds
    /// this; equality and hashing treat members as a set either way.
    Union(Vec<TypeDescriptor>),
    /// Key and value types summarized over all entries.
    Mapping {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Sequence(Box<TypeDescriptor>),
    Set(Box<TypeDescriptor>),
    /// Positional element types, in input order.
    Tuple(Vec<TypeDescriptor>),
    /// Tuple of two or more elements sharing one type.
    HomogeneousTuple(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn scalar(p: Primitive) -> Self {
        Self::Scalar(p.into())
    }

    pub fn opaque(type_name: impl Into<String>) -> Self {
        Self::Scalar(ScalarType::Opaque(type_name.into()))
    }

    pub fn mapping(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::Mapping {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn sequence(element: TypeDescriptor) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn set(element: TypeDescriptor) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn homogeneous_tuple(element: TypeDescriptor) -> Self {
        Self::HomogeneousTuple(Box::new(element))
    }

    /// Union of `members` in the given order, duplicates dropped.
    ///
    /// Collapses to the sole member when only one distinct type remains.
    /// Returns `None` for an empty input.
    pub fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> Option<Self> {
        let mut distinct: Vec<TypeDescriptor> = members
            .into_iter()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        match distinct.len() {
            0 => None,
            1 => distinct.pop(),
            _ => Some(Self::Union(distinct)),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// Union members, or the descriptor itself for anything else.
    pub fn members(&self) -> &[TypeDescriptor] {
        match self {
            Self::Union(members) => members,
            _ => std::slice::from_ref(self),
        }
    }

    /// Container kind this descriptor describes, if any.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Self::Scalar(_) | Self::Union(_) => None,
            Self::Mapping { .. } => Some(ContainerKind::Mapping),
            Self::Sequence(_) => Some(ContainerKind::Sequence),
            Self::Set(_) => Some(ContainerKind::Set),
            Self::Tuple(_) | Self::HomogeneousTuple(_) => Some(ContainerKind::Tuple),
        }
    }

    /// Canonical form: the deterministic key used for alphabetical ordering.
    ///
    /// `int`, `None`, `Union[int, str]`, `Dict[str, int]`, `List[int]`,
    /// `Set[int]`, `Tuple[int, str]`, `Tuple[int, ...]`.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        write_canonical(&mut out, self, false);
        out
    }

    /// Ordering key: the canonical form, then the canonical form with opaque
    /// names marked, so an opaque type named `int` never ties with `int`.
    pub(crate) fn sort_key(&self) -> (String, String) {
        let mut marked = String::new();
        write_canonical(&mut marked, self, true);
        (self.canonical(), marked)
    }
}

fn write_canonical(out: &mut String, ty: &TypeDescriptor, mark_opaque: bool) {
    match ty {
        TypeDescriptor::Scalar(ScalarType::Opaque(name)) if mark_opaque => {
            out.push('\0');
            out.push_str(name);
        }
        TypeDescriptor::Scalar(scalar) => out.push_str(scalar.name()),
        TypeDescriptor::Union(members) => write_generic(out, "Union", members, mark_opaque),
        TypeDescriptor::Mapping { key, value } => {
            write_generic(out, "Dict", [&**key, &**value], mark_opaque)
        }
        TypeDescriptor::Sequence(elem) => write_generic(out, "List", [&**elem], mark_opaque),
        TypeDescriptor::Set(elem) => write_generic(out, "Set", [&**elem], mark_opaque),
        TypeDescriptor::Tuple(elems) if elems.is_empty() => out.push_str("Tuple[()]"),
        TypeDescriptor::Tuple(elems) => write_generic(out, "Tuple", elems, mark_opaque),
        TypeDescriptor::HomogeneousTuple(elem) => {
            out.push_str("Tuple[");
            write_canonical(out, elem, mark_opaque);
            out.push_str(", ...]");
        }
    }
}

fn write_generic<'a>(
    out: &mut String,
    name: &str,
    args: impl IntoIterator<Item = &'a TypeDescriptor>,
    mark_opaque: bool,
) {
    out.push_str(name);
    out.push('[');
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_canonical(out, arg, mark_opaque);
    }
    out.push(']');
}

// Union members compare as a set; everything else compares positionally.
impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        use TypeDescriptor as T;

        match (self, other) {
            (T::Scalar(a), T::Scalar(b)) => a == b,
            (T::Union(a), T::Union(b)) => {
                a.iter().all(|m| b.contains(m)) && b.iter().all(|m| a.contains(m))
            }
            (
                T::Mapping { key: k1, value: v1 },
                T::Mapping { key: k2, value: v2 },
            ) => k1 == k2 && v1 == v2,
            (T::Sequence(a), T::Sequence(b))
            | (T::Set(a), T::Set(b))
            | (T::HomogeneousTuple(a), T::HomogeneousTuple(b)) => a == b,
            (T::Tuple(a), T::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Scalar(scalar) => scalar.hash(state),
            Self::Union(members) => {
                // Set of member hashes: independent of order and duplicates.
                let hashes: BTreeSet<u64> = members
                    .iter()
                    .map(|member| {
                        let mut hasher = DefaultHasher::new();
                        member.hash(&mut hasher);
                        hasher.finish()
                    })
                    .collect();
                hashes.hash(state);
            }
            Self::Mapping { key, value } => {
                key.hash(state);
                value.hash(state);
            }
            Self::Sequence(elem) | Self::Set(elem) | Self::HomogeneousTuple(elem) => {
                elem.hash(state)
            }
            Self::Tuple(elems) => elems.hash(state),
        }
    }
}
