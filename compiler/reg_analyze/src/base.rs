//! Base-type and arity resolution for registry declarations.
//!
//! Walks a declaration's base-type chain until it reaches an instantiation
//! of the registry root abstraction, substituting generic arguments as it
//! steps through intermediate generic bases. Supported shapes:
//!
//! - `Registry<TBase>` — the argument is the base type and the candidate
//!   return type
//! - `Registry<TBase, TReturn>` — first argument base type, second the
//!   candidate return type
//!
//! When `TBase` is a generic parameter of the declaration itself
//! (`Widgets<T> where T : Widget` deriving `Registry<T>`), the parameter's
//! constraint becomes the base type and also feeds rule 3 of return-type
//! resolution.

use rustc_hash::{FxHashMap, FxHashSet};

use reg_diagnostic::{root_not_found, unsupported_arity, Diagnostic};
use reg_graph::{ModuleGraph, Name, StringLookup, TypeDescriptor, TypeRef};

use crate::{Candidate, RegistryDeclaration};

/// Resolve a scanned candidate into a full registry declaration.
///
/// `root` is the interned fully-qualified name of the root abstraction and
/// `fallback_namespace` substitutes for declarations whose own namespace
/// cannot be determined.
pub(crate) fn resolve(
    graph: &ModuleGraph,
    root: Name,
    fallback_namespace: Name,
    candidate: Candidate,
) -> Result<RegistryDeclaration, Diagnostic> {
    let decl = graph.descriptor(candidate.loc);
    let marker = decl.registry.clone().unwrap_or_default();

    let instantiation = find_root_instantiation(graph, decl, root);

    let (base_arg, candidate_return) = match &instantiation {
        Some(inst) => match inst.args.len() {
            1 => (Some(inst.args[0].clone()), None),
            2 => (Some(inst.args[0].clone()), Some(inst.args[1].clone())),
            n => {
                return Err(unsupported_arity(
                    graph.resolve(decl.fqn),
                    graph.resolve(root),
                    n,
                ));
            }
        },
        None => (None, None),
    };

    // A base argument that names one of the declaration's own generic
    // parameters resolves through the parameter's constraint.
    let mut constraint_return = None;
    let inferred_base = base_arg.and_then(|arg| {
        if let Some(param) = decl.generic_param(arg.name) {
            constraint_return.clone_from(&param.constraint);
            param.constraint.clone()
        } else {
            Some(arg)
        }
    });

    // An explicit marker base type wins over the inferred one and rescues
    // declarations with no resolvable instantiation.
    let Some(base) = marker.base_type.clone().or(inferred_base) else {
        return Err(root_not_found(
            graph.resolve(decl.fqn),
            graph.resolve(root),
        ));
    };

    let namespace = if decl.namespace.is_empty() {
        fallback_namespace
    } else {
        decl.namespace
    };

    Ok(RegistryDeclaration {
        loc: candidate.loc,
        fqn: decl.fqn,
        collection: marker.collection_name.unwrap_or(decl.name),
        namespace,
        base,
        constraint_return,
        candidate_return,
        scope: marker.scope,
        access: marker.access,
        marker,
    })
}

/// Walk the declaration's base chain looking for an instantiation of the
/// root abstraction, substituting generic arguments through intermediate
/// bases. Returns the instantiation reference with fully substituted
/// arguments, or `None` when the chain ends (or leaves the graph) without
/// reaching the root.
fn find_root_instantiation(
    graph: &ModuleGraph,
    decl: &TypeDescriptor,
    root: Name,
) -> Option<TypeRef> {
    let mut seen: FxHashSet<Name> = FxHashSet::default();
    let mut current = decl.base.clone();

    while let Some(reference) = current {
        if reference.name == root {
            return Some(reference);
        }
        if !seen.insert(reference.name) {
            return None;
        }
        let def = graph.resolve_ref(&reference)?;
        let substitution = bind_params(def, &reference);
        current = def
            .base
            .as_ref()
            .map(|base| substitute(base, &substitution));
    }
    None
}

/// Pair a definition's generic parameters with the arguments of the
/// reference instantiating it.
fn bind_params(def: &TypeDescriptor, reference: &TypeRef) -> FxHashMap<Name, TypeRef> {
    def.generics
        .iter()
        .zip(reference.args.iter())
        .map(|(param, arg)| (param.name, arg.clone()))
        .collect()
}

/// Replace parameter names with their bound arguments, recursively.
fn substitute(reference: &TypeRef, bindings: &FxHashMap<Name, TypeRef>) -> TypeRef {
    if reference.args.is_empty() {
        if let Some(bound) = bindings.get(&reference.name) {
            return bound.clone();
        }
    }
    TypeRef {
        name: reference.name,
        args: reference
            .args
            .iter()
            .map(|arg| substitute(arg, bindings))
            .collect(),
    }
}

#[cfg(test)]
mod tests;
