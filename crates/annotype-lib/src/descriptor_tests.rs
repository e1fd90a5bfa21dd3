use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use annotype_core::{ContainerKind, Primitive};

use crate::descriptor::{ScalarType, TypeDescriptor};

fn int() -> TypeDescriptor {
    TypeDescriptor::scalar(Primitive::Int)
}

fn string() -> TypeDescriptor {
    TypeDescriptor::scalar(Primitive::Str)
}

fn float() -> TypeDescriptor {
    TypeDescriptor::scalar(Primitive::Float)
}

fn union(members: impl IntoIterator<Item = TypeDescriptor>) -> TypeDescriptor {
    TypeDescriptor::union(members).unwrap()
}

#[test]
fn scalar_canonical_forms() {
    insta::assert_snapshot!(int().canonical(), @"int");
    insta::assert_snapshot!(string().canonical(), @"str");
    insta::assert_snapshot!(float().canonical(), @"float");
    insta::assert_snapshot!(TypeDescriptor::scalar(Primitive::Bool).canonical(), @"bool");
    insta::assert_snapshot!(TypeDescriptor::scalar(Primitive::None).canonical(), @"None");
    insta::assert_snapshot!(TypeDescriptor::opaque("datetime").canonical(), @"datetime");
}

#[test]
fn container_canonical_forms() {
    let ty = TypeDescriptor::mapping(string(), union([int(), float()]));
    insta::assert_snapshot!(ty.canonical(), @"Dict[str, Union[int, float]]");

    let ty = TypeDescriptor::sequence(TypeDescriptor::set(int()));
    insta::assert_snapshot!(ty.canonical(), @"List[Set[int]]");

    let ty = TypeDescriptor::Tuple(vec![int(), string(), int()]);
    insta::assert_snapshot!(ty.canonical(), @"Tuple[int, str, int]");

    let ty = TypeDescriptor::homogeneous_tuple(TypeDescriptor::sequence(string()));
    insta::assert_snapshot!(ty.canonical(), @"Tuple[List[str], ...]");

    insta::assert_snapshot!(TypeDescriptor::Tuple(vec![]).canonical(), @"Tuple[()]");
}

#[test]
fn union_drops_duplicates_and_collapses() {
    assert_eq!(TypeDescriptor::union([]), None);
    assert_eq!(TypeDescriptor::union([int(), int()]), Some(int()));

    let ty = union([int(), string(), int()]);
    assert_eq!(ty.members(), &[int(), string()]);
    assert!(ty.is_union());
}

#[test]
fn union_equality_ignores_member_order() {
    let a = union([int(), string()]);
    let b = union([string(), int()]);

    assert_eq!(a, b);
    assert_eq!(TypeDescriptor::sequence(a.clone()), TypeDescriptor::sequence(b.clone()));
    assert_ne!(a, union([int(), float()]));
    assert_ne!(a, union([int(), string(), float()]));

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

fn hash_of(ty: &TypeDescriptor) -> u64 {
    let mut hasher = DefaultHasher::new();
    ty.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn union_equality_with_repeated_members() {
    let repeated = TypeDescriptor::Union(vec![int(), int()]);
    let mixed = TypeDescriptor::Union(vec![int(), string()]);
    assert_ne!(repeated, mixed);
    assert_ne!(mixed, repeated);

    let left = TypeDescriptor::Union(vec![int(), int(), string()]);
    let right = TypeDescriptor::Union(vec![int(), string(), string()]);
    assert_eq!(left, right);
    assert_eq!(right, left);
    assert_eq!(hash_of(&left), hash_of(&right));
    assert_eq!(hash_of(&left), hash_of(&union([string(), int()])));

    let set: HashSet<_> = [left, right, mixed].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn sort_key_separates_opaque_from_primitive_names() {
    let opaque = TypeDescriptor::opaque("int");

    assert_eq!(opaque.canonical(), int().canonical());
    assert_ne!(opaque.sort_key(), int().sort_key());
    assert!(opaque.sort_key() < int().sort_key());

    let nested = TypeDescriptor::sequence(opaque);
    assert_ne!(nested.sort_key(), TypeDescriptor::sequence(int()).sort_key());
}

#[test]
fn tuple_equality_is_positional() {
    let a = TypeDescriptor::Tuple(vec![int(), string()]);
    let b = TypeDescriptor::Tuple(vec![string(), int()]);

    assert_ne!(a, b);
    assert_ne!(a, TypeDescriptor::homogeneous_tuple(int()));
}

#[test]
fn mapping_equality_compares_key_and_value() {
    assert_eq!(
        TypeDescriptor::mapping(string(), int()),
        TypeDescriptor::mapping(string(), int())
    );
    assert_ne!(
        TypeDescriptor::mapping(string(), int()),
        TypeDescriptor::mapping(int(), string())
    );
}

#[test]
fn members_of_non_union_is_itself() {
    let ty = TypeDescriptor::sequence(int());

    assert_eq!(ty.members(), std::slice::from_ref(&ty));
    assert!(!ty.is_scalar());
    assert!(int().is_scalar());
}

#[test]
fn container_kinds() {
    assert_eq!(int().container_kind(), None);
    assert_eq!(union([int(), string()]).container_kind(), None);
    assert_eq!(
        TypeDescriptor::mapping(int(), int()).container_kind(),
        Some(ContainerKind::Mapping)
    );
    assert_eq!(
        TypeDescriptor::sequence(int()).container_kind(),
        Some(ContainerKind::Sequence)
    );
    assert_eq!(
        TypeDescriptor::set(int()).container_kind(),
        Some(ContainerKind::Set)
    );
    assert_eq!(
        TypeDescriptor::homogeneous_tuple(int()).container_kind(),
        Some(ContainerKind::Tuple)
    );
}

#[test]
fn scalar_type_maps_primitives() {
    assert_eq!(ScalarType::from(Primitive::Bool), ScalarType::Bool);
    assert_eq!(ScalarType::Int.primitive(), Some(Primitive::Int));
    assert_eq!(ScalarType::Opaque("Decimal".into()).primitive(), None);
    assert_eq!(ScalarType::Opaque("Decimal".into()).name(), "Decimal");
    assert_eq!(ScalarType::None.name(), "None");
}
