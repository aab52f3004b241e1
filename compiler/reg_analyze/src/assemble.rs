//! Registry model assembly.
//!
//! Pure aggregation of the earlier passes' outputs into one immutable
//! [`RegistryModel`]. Everything that could fail was filtered upstream;
//! what remains here are the membership policies:
//!
//! - options with no public constructor are dropped (warning)
//! - display-name collisions keep the first-discovered type and drop the
//!   rest (error)
//! - access mode: explicit preference wins, otherwise singleton iff every
//!   surviving option is default-constructible
//! - options that cannot be constructed without caller arguments are kept
//!   but excluded from enumeration (note)
//!
//! Survivors are sorted by their stable ordering key; the discovery order
//! only breaks ties.

use rustc_hash::FxHashMap;

use reg_diagnostic::{
    empty_registry, name_collision, no_public_constructor, no_usable_constructor, not_enumerable,
    Diagnostic,
};
use reg_graph::{
    AccessMode, AccessPreference, LookupMethod, ModuleGraph, Name, RegistryModel, StringLookup,
    TypeRef, ValueDescriptor,
};

use crate::{RegistryDeclaration, ValueMeta};

/// Assemble the final model for one registry declaration.
///
/// `values` must be in discovery order. Never fails; policy violations
/// surface as diagnostics next to a model that omits the offenders.
pub(crate) fn assemble(
    graph: &ModuleGraph,
    decl: &RegistryDeclaration,
    values: Vec<ValueMeta>,
    lookups: Vec<LookupMethod>,
    return_type: TypeRef,
) -> (RegistryModel, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    // Constructorless options first: nothing can ever be generated for them.
    let mut survivors: Vec<ValueMeta> = Vec::with_capacity(values.len());
    for value in values {
        if value.constructors.is_empty() {
            diagnostics.push(no_public_constructor(graph.resolve(value.fqn)));
        } else {
            survivors.push(value);
        }
    }

    // Display-name collisions: first discovered keeps the name.
    let mut taken: FxHashMap<Name, Name> = FxHashMap::default();
    let mut named: Vec<ValueMeta> = Vec::with_capacity(survivors.len());
    for value in survivors {
        match taken.get(&value.display) {
            Some(&first) => {
                diagnostics.push(name_collision(
                    graph.resolve(value.display),
                    graph.resolve(first),
                    graph.resolve(value.fqn),
                ));
            }
            None => {
                taken.insert(value.display, value.fqn);
                named.push(value);
            }
        }
    }

    let mode = match decl.access {
        AccessPreference::Singleton => AccessMode::Singleton,
        AccessPreference::Factory => AccessMode::Factory,
        AccessPreference::Auto => {
            if named.iter().all(|v| v.default_ctor.is_some()) {
                AccessMode::Singleton
            } else {
                AccessMode::Factory
            }
        }
    };

    // Mode-specific membership.
    let mut kept: Vec<ValueMeta> = Vec::with_capacity(named.len());
    for value in named {
        if value.default_ctor.is_none() {
            if mode == AccessMode::Singleton && !value.force_factory {
                diagnostics.push(no_usable_constructor(graph.resolve(value.fqn)));
                continue;
            }
            diagnostics.push(not_enumerable(graph.resolve(value.fqn)));
        }
        kept.push(value);
    }

    if kept.is_empty() {
        diagnostics.push(empty_registry(
            graph.resolve(decl.fqn),
            graph.resolve(decl.base.name),
        ));
    }

    kept.sort_by_key(|v| v.order);

    // Short base name: from the descriptor when the base is declared in
    // the graph, else the last segment of the fully-qualified name.
    let base_name = match graph.find(decl.base.name) {
        Some(base) => base.name,
        None => {
            let fqn = graph.resolve(decl.base.name);
            let short = fqn.rsplit('.').next().unwrap_or(fqn);
            graph.interner().intern(short)
        }
    };

    let model = RegistryModel {
        namespace: decl.namespace,
        collection: decl.collection,
        base_name,
        base_fqn: decl.base.name,
        return_type,
        mode,
        values: kept
            .into_iter()
            .map(|v| ValueDescriptor {
                name: v.name,
                fqn: v.fqn,
                display: v.display,
                namespace: v.namespace,
                order: v.order,
                constructors: v.constructors,
                default_ctor: v.default_ctor,
                force_factory: v.force_factory,
            })
            .collect(),
        lookups,
    };

    (model, diagnostics)
}
