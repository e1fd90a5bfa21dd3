use indoc::indoc;

use crate::verify::{conforms, mismatches};
use crate::{Primitive, TypeDescriptor, Value, infer};

fn int() -> TypeDescriptor {
    TypeDescriptor::scalar(Primitive::Int)
}

fn string() -> TypeDescriptor {
    TypeDescriptor::scalar(Primitive::Str)
}

fn int_or_str() -> TypeDescriptor {
    TypeDescriptor::union([int(), string()]).unwrap()
}

#[test]
fn inferred_type_accepts_its_value() {
    let input = indoc! {r#"
        {
            "users": [
                {"name": "ada", "age": 36, "tags": ["admin", 7]},
                {"name": "bob", "age": null, "tags": [1.5]}
            ],
            "total": 2
        }
    "#};
    let value: Value = serde_json::from_str(input).unwrap();

    for alphabetize in [true, false] {
        let ty = infer(&value, alphabetize).unwrap();
        assert_eq!(mismatches(&value, &ty), Vec::<String>::new());
    }
}

#[test]
fn inferred_tuple_types_accept_their_values() {
    let values = [
        Value::tuple([1, 2, 3]),
        Value::tuple([Value::from(1), Value::from("a")]),
        Value::tuple([Value::set([true])]),
    ];

    for value in &values {
        let ty = infer(value, true).unwrap();
        assert!(conforms(value, &ty), "{}", ty.canonical());
    }
}

#[test]
fn scalar_mismatch_at_root() {
    insta::assert_snapshot!(mismatches(&"text", &int()).join("\n"), @"type: int, value: str");
    assert!(!conforms(&true, &int()));
    assert!(conforms(&Value::None, &TypeDescriptor::scalar(Primitive::None)));
}

#[test]
fn opaque_matches_by_name() {
    let ty = TypeDescriptor::opaque("datetime");

    assert!(conforms(&Value::object("datetime"), &ty));
    insta::assert_snapshot!(
        mismatches(&Value::object("date"), &ty).join("\n"),
        @"type: datetime, value: date"
    );
    assert!(!conforms(&Value::from(1), &ty));
}

#[test]
fn union_accepts_any_member() {
    let ty = TypeDescriptor::sequence(int_or_str());

    assert!(conforms(&Value::list([Value::from(1), Value::from("a")]), &ty));

    let value = Value::list([Value::from(1), Value::from(2.5), Value::None]);
    insta::assert_snapshot!(mismatches(&value, &ty).join("\n"), @r"
    [1]: type: Union[int, str], value: float
    [2]: type: Union[int, str], value: None
    ");
}

#[test]
fn mapping_mismatch_paths() {
    let ty = TypeDescriptor::mapping(string(), int());
    let value = Value::map([
        (Value::from("a"), Value::from(1)),
        (Value::from(2), Value::from("b")),
    ]);

    insta::assert_snapshot!(mismatches(&value, &ty).join("\n"), @r"
    keys[1]: type: str, value: int
    values[1]: type: int, value: str
    ");
}

#[test]
fn nested_mismatch_paths() {
    let ty = TypeDescriptor::sequence(TypeDescriptor::mapping(
        string(),
        TypeDescriptor::sequence(int()),
    ));
    let value = Value::list([
        Value::map([("a", Value::list([1, 2]))]),
        Value::map([("b", Value::list([Value::from(3), Value::from("x")]))]),
    ]);

    insta::assert_snapshot!(
        mismatches(&value, &ty).join("\n"),
        @"[1].values[0][1]: type: int, value: str"
    );
}

#[test]
fn container_kind_mismatch() {
    let ty = TypeDescriptor::set(int());

    insta::assert_snapshot!(
        mismatches(&vec![1, 2], &ty).join("\n"),
        @"type: Set[int], value: list"
    );
    assert!(!conforms(&(1, 2), &TypeDescriptor::sequence(int())));
}

#[test]
fn tuple_arity_must_match() {
    let ty = TypeDescriptor::Tuple(vec![int(), string()]);

    assert!(conforms(&(1, "a"), &ty));
    insta::assert_snapshot!(
        mismatches(&(1, "a", 2), &ty).join("\n"),
        @"type: Tuple[int, str] of arity 2, value: tuple of arity 3"
    );
    insta::assert_snapshot!(
        mismatches(&("a", 1), &ty).join("\n"),
        @r"
    [0]: type: int, value: str
    [1]: type: str, value: int
    "
    );
}

#[test]
fn homogeneous_tuple_accepts_any_arity() {
    let ty = TypeDescriptor::homogeneous_tuple(int());

    assert!(conforms(&(1,), &ty));
    assert!(conforms(&(1, 2, 3, 4), &ty));
    insta::assert_snapshot!(
        mismatches(&(1, "a"), &ty).join("\n"),
        @"[1]: type: int, value: str"
    );
}

#[test]
fn empty_containers_conform() {
    assert!(conforms(&Vec::<String>::new(), &TypeDescriptor::sequence(int())));
    assert!(conforms(&Value::Map(vec![]), &TypeDescriptor::mapping(int(), int())));
    assert!(conforms(&Value::Tuple(vec![]), &TypeDescriptor::Tuple(vec![])));
}
