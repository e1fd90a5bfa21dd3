//! Recursive type inference over classified values.
//!
//! Each value is classified once via [`Inspect::shape`]; containers recurse
//! into their children and summarize them:
//! - mapping keys, mapping values, sequence and set elements go through
//!   [`TypeDescriptor::union`], with union members optionally sorted by
//!   canonical form
//! - tuples stay positional unless two or more elements share one type

use annotype_core::{ContainerKind, Inspect, Shape};
use indexmap::IndexSet;

use crate::descriptor::TypeDescriptor;
use crate::{Error, Result};

/// Inference configuration.
///
/// Defaults match the plain [`infer`](fn@crate::infer) call with
/// `alphabetize = true`: canonical ordering and no recursion limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inferencer {
    /// Order child types by canonical form (default: true).
    alphabetize: bool,
    /// Maximum container nesting depth (default: unbounded).
    recursion_limit: Option<u32>,
}

impl Default for Inferencer {
    fn default() -> Self {
        Self {
            alphabetize: true,
            recursion_limit: None,
        }
    }
}

impl Inferencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort child types by canonical form instead of first-seen order.
    pub fn alphabetize(mut self, alphabetize: bool) -> Self {
        self.alphabetize = alphabetize;
        self
    }

    /// Fail with [`Error::RecursionLimitExceeded`] when containers nest deeper
    /// than `limit`. The outermost container is at depth 1.
    pub fn recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_alphabetize(&self) -> bool {
        self.alphabetize
    }

    pub fn get_recursion_limit(&self) -> Option<u32> {
        self.recursion_limit
    }

    /// Infer the type descriptor of `value`.
    ///
    /// Fails on the first empty container found anywhere in the tree.
    pub fn infer<T: Inspect + ?Sized>(&self, value: &T) -> Result<TypeDescriptor> {
        let mut walk = Walk {
            config: *self,
            path: String::from("$"),
            depth: 0,
        };
        walk.infer_shape(value.shape()).inspect_err(|err| {
            tracing::debug!(error = %err, "type inference failed");
        })
    }

    /// Build one child descriptor from already-inferred element types.
    ///
    /// `None` when `types` is empty.
    fn collapse(&self, types: Vec<TypeDescriptor>) -> Option<TypeDescriptor> {
        let mut ty = TypeDescriptor::union(types)?;
        if self.alphabetize
            && let TypeDescriptor::Union(members) = &mut ty
        {
            members.sort_by_cached_key(TypeDescriptor::sort_key);
        }
        Some(ty)
    }

    /// Positional tuple, unless arity > 1 and every element has one type.
    fn tuple(&self, mut elements: Vec<TypeDescriptor>) -> TypeDescriptor {
        let distinct = elements.iter().collect::<IndexSet<_>>().len();
        if distinct == 1 && elements.len() > 1 {
            return TypeDescriptor::HomogeneousTuple(Box::new(elements.swap_remove(0)));
        }
        TypeDescriptor::Tuple(elements)
    }
}

/// State of one inference call.
struct Walk {
    config: Inferencer,
    /// Location of the value being inferred, e.g. `$[0].values[2]`.
    path: String,
    /// Number of containers currently entered.
    depth: u32,
}

impl Walk {
    fn infer_shape(&mut self, shape: Shape<'_>) -> Result<TypeDescriptor> {
        match shape {
            Shape::Primitive(p) => Ok(TypeDescriptor::scalar(p)),
            Shape::Opaque(name) => Ok(TypeDescriptor::opaque(name.into_owned())),
            Shape::Mapping(pairs) => {
                self.enter(ContainerKind::Mapping, pairs.len())?;
                let keys = self.infer_all(pairs.iter().map(|(k, _)| *k), ".keys")?;
                let values = self.infer_all(pairs.iter().map(|(_, v)| *v), ".values")?;
                self.leave();
                Ok(TypeDescriptor::mapping(
                    self.collapse(ContainerKind::Mapping, keys)?,
                    self.collapse(ContainerKind::Mapping, values)?,
                ))
            }
            Shape::Sequence(items) => {
                self.enter(ContainerKind::Sequence, items.len())?;
                let elements = self.infer_all(items.iter().copied(), "")?;
                self.leave();
                Ok(TypeDescriptor::sequence(
                    self.collapse(ContainerKind::Sequence, elements)?,
                ))
            }
            Shape::Set(items) => {
                self.enter(ContainerKind::Set, items.len())?;
                let elements = self.infer_all(items.iter().copied(), "")?;
                self.leave();
                Ok(TypeDescriptor::set(self.collapse(ContainerKind::Set, elements)?))
            }
            Shape::Tuple(items) => {
                self.enter(ContainerKind::Tuple, items.len())?;
                let elements = self.infer_all(items.iter().copied(), "")?;
                self.leave();
                Ok(self.config.tuple(elements))
            }
        }
    }

    /// Infer each child, extending the path with `{segment}[i]`.
    fn infer_all<'a>(
        &mut self,
        children: impl Iterator<Item = &'a dyn Inspect>,
        segment: &str,
    ) -> Result<Vec<TypeDescriptor>> {
        let mut types = Vec::with_capacity(children.size_hint().0);
        for (i, child) in children.enumerate() {
            let prev_len = self.path.len();
            self.path.push_str(&format!("{segment}[{i}]"));
            let ty = self.infer_shape(child.shape());
            self.path.truncate(prev_len);
            types.push(ty?);
        }
        Ok(types)
    }

    fn enter(&mut self, container: ContainerKind, len: usize) -> Result<()> {
        tracing::trace!(path = %self.path, %container, len, "entering container");

        self.depth += 1;
        if let Some(limit) = self.config.recursion_limit
            && self.depth > limit
        {
            return Err(Error::RecursionLimitExceeded {
                limit,
                path: self.path.clone(),
            });
        }

        if len == 0 {
            return Err(self.empty(container));
        }
        Ok(())
    }

    fn collapse(
        &self,
        container: ContainerKind,
        types: Vec<TypeDescriptor>,
    ) -> Result<TypeDescriptor> {
        self.config
            .collapse(types)
            .ok_or_else(|| self.empty(container))
    }

    fn empty(&self, container: ContainerKind) -> Error {
        Error::UnsupportedInput {
            container,
            path: self.path.clone(),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
