//! Annotype: structural type inference for runtime values.
//!
//! Describes a value's type in terms of its shape: containers (mappings,
//! sequences, sets, tuples) are summarized by the types of their elements,
//! with a union wherever elements disagree.
//!
//! # Example
//!
//! ```
//! use annotype_lib::{Value, infer};
//!
//! let value = Value::map([("a", Value::from(1)), ("b", Value::from(2.0))]);
//!
//! let ty = infer(&value, true).expect("no empty containers");
//! assert_eq!(ty.canonical(), "Dict[str, Union[float, int]]");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod descriptor;
pub mod infer;
pub mod verify;

#[cfg(test)]
mod descriptor_tests;
#[cfg(test)]
mod verify_tests;

pub use annotype_core::{ContainerKind, Inspect, Primitive, Shape, Value, opaque};
pub use descriptor::{ScalarType, TypeDescriptor};
pub use infer::Inferencer;

/// Errors that can occur during type inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Empty container: there is no element to derive a child type from.
    #[error("cannot infer element type of empty {container} at {path}")]
    UnsupportedInput {
        container: ContainerKind,
        path: String,
    },

    /// Containers nested deeper than the configured limit.
    #[error("recursion limit of {limit} exceeded at {path}")]
    RecursionLimitExceeded { limit: u32, path: String },
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Infer the structural type of `value`.
///
/// With `alphabetize`, union members and other child types are ordered by
/// canonical form; without it they keep first-seen order. Fails if any
/// container in the tree is empty.
pub fn infer<T: Inspect + ?Sized>(value: &T, alphabetize: bool) -> Result<TypeDescriptor> {
    Inferencer::new().alphabetize(alphabetize).infer(value)
}
