//! Return-type resolution.
//!
//! The deterministic, total priority chain. First matching rule wins:
//!
//! 1. explicit return type on an individual option's marker (first in
//!    discovery order)
//! 2. explicit return type on the registry marker
//! 3. return type implied by a generic constraint on the declaration
//! 4. `TReturn` from a double-argument root instantiation
//! 5. the registry marker's configured fallback return type
//! 6. the resolved base type itself
//!
//! Rule 6 always applies, so resolution never comes back empty.

use reg_graph::TypeRef;

use crate::{RegistryDeclaration, ValueMeta};

/// Resolve the element/return type of one registry.
///
/// `values` must still be in discovery order; rule 1 takes the first
/// option carrying an override.
pub(crate) fn resolve(decl: &RegistryDeclaration, values: &[ValueMeta]) -> TypeRef {
    if let Some(overridden) = values.iter().find_map(|v| v.return_override.clone()) {
        return overridden;
    }
    if let Some(explicit) = decl.marker.default_return.clone() {
        return explicit;
    }
    if let Some(constraint) = decl.constraint_return.clone() {
        return constraint;
    }
    if let Some(candidate) = decl.candidate_return.clone() {
        return candidate;
    }
    if let Some(fallback) = decl.marker.default_generic_return.clone() {
        return fallback;
    }
    decl.base.clone()
}
