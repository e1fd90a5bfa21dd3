#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for annotype's view of runtime values.
//!
//! Two layers:
//! - **Classification layer**: the closed [`Shape`] set and the [`Inspect`]
//!   capability that maps a concrete Rust type onto it, once, at the boundary
//! - **Value layer**: [`Value`], an owned dynamic value for data that arrives
//!   without a static Rust type (JSON, config files, other serde formats)

mod shape;
mod value;


pub use shape::{ContainerKind, Inspect, Primitive, Shape, opaque};
pub use value::Value;
