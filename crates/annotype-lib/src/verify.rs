//! Conformance of values to type descriptors.
//!
//! Checks a value against a descriptor and reports every mismatch with the
//! path where it occurs. Any descriptor returned by `infer(v)` accepts `v`.

use annotype_core::{Inspect, Shape};

use crate::descriptor::{ScalarType, TypeDescriptor};

/// Check `value` against `ty`, collecting one message per mismatch.
///
/// Messages read `path: type: <expected>, value: <kind>`; the path is
/// omitted for the root.
pub fn mismatches<T: Inspect + ?Sized>(value: &T, ty: &TypeDescriptor) -> Vec<String> {
    let mut errors = Vec::new();
    verify_type(&value.shape(), ty, &mut String::new(), &mut errors);
    errors
}

/// Whether `value` conforms to `ty`.
pub fn conforms<T: Inspect + ?Sized>(value: &T, ty: &TypeDescriptor) -> bool {
    mismatches(value, ty).is_empty()
}

/// Recursive verification. Collects mismatch paths into `errors`.
fn verify_type(
    shape: &Shape<'_>,
    ty: &TypeDescriptor,
    path: &mut String,
    errors: &mut Vec<String>,
) {
    match ty {
        TypeDescriptor::Scalar(scalar) => {
            if !scalar_matches(scalar, shape) {
                errors.push(mismatch(path, ty, shape));
            }
        }

        TypeDescriptor::Union(members) => {
            let accepted = members.iter().any(|member| {
                let mut scratch = Vec::new();
                verify_type(shape, member, path, &mut scratch);
                scratch.is_empty()
            });
            if !accepted {
                errors.push(mismatch(path, ty, shape));
            }
        }

        TypeDescriptor::Mapping { key, value } => match shape {
            Shape::Mapping(pairs) => {
                for (i, (k, v)) in pairs.iter().enumerate() {
                    verify_child(*k, key, &format!(".keys[{i}]"), path, errors);
                    verify_child(*v, value, &format!(".values[{i}]"), path, errors);
                }
            }
            _ => errors.push(mismatch(path, ty, shape)),
        },

        TypeDescriptor::Sequence(elem) => match shape {
            Shape::Sequence(items) => verify_items(items, elem, path, errors),
            _ => errors.push(mismatch(path, ty, shape)),
        },

        TypeDescriptor::Set(elem) => match shape {
            Shape::Set(items) => verify_items(items, elem, path, errors),
            _ => errors.push(mismatch(path, ty, shape)),
        },

        TypeDescriptor::HomogeneousTuple(elem) => match shape {
            Shape::Tuple(items) => verify_items(items, elem, path, errors),
            _ => errors.push(mismatch(path, ty, shape)),
        },

        TypeDescriptor::Tuple(elems) => match shape {
            Shape::Tuple(items) if items.len() == elems.len() => {
                for (i, (item, elem)) in items.iter().zip(elems).enumerate() {
                    verify_child(*item, elem, &format!("[{i}]"), path, errors);
                }
            }
            Shape::Tuple(items) => errors.push(format_error(
                path,
                &format!(
                    "type: {} of arity {}, value: tuple of arity {}",
                    ty.canonical(),
                    elems.len(),
                    items.len()
                ),
            )),
            _ => errors.push(mismatch(path, ty, shape)),
        },
    }
}

fn scalar_matches(scalar: &ScalarType, shape: &Shape<'_>) -> bool {
    match (scalar, shape) {
        (ScalarType::Opaque(expected), Shape::Opaque(actual)) => {
            expected.as_str() == actual.as_ref()
        }
        (_, Shape::Primitive(p)) => scalar.primitive() == Some(*p),
        _ => false,
    }
}

fn verify_items(
    items: &[&dyn Inspect],
    elem: &TypeDescriptor,
    path: &mut String,
    errors: &mut Vec<String>,
) {
    for (i, item) in items.iter().enumerate() {
        verify_child(*item, elem, &format!("[{i}]"), path, errors);
    }
}

fn verify_child(
    child: &dyn Inspect,
    ty: &TypeDescriptor,
    segment: &str,
    path: &mut String,
    errors: &mut Vec<String>,
) {
    let prev_len = path.len();
    path.push_str(segment);
    verify_type(&child.shape(), ty, path, errors);
    path.truncate(prev_len);
}

fn mismatch(path: &str, ty: &TypeDescriptor, shape: &Shape<'_>) -> String {
    format_error(
        path,
        &format!("type: {}, value: {}", ty.canonical(), shape.kind_name()),
    )
}

/// Format path for error message. Leading dot is stripped.
fn format_path(path: &str) -> &str {
    path.strip_prefix('.').unwrap_or(path)
}

/// Format error with optional path prefix.
fn format_error(path: &str, msg: &str) -> String {
    let p = format_path(path);
    if p.is_empty() {
        msg.to_string()
    } else {
        format!("{}: {}", p, msg)
    }
}
