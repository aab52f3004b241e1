//! Option-type discovery.
//!
//! Collects every concrete type whose base-type chain includes a registry's
//! resolved base type — by interned fully-qualified-name identity, so two
//! differently-qualified types sharing a short name never collide. Scope
//! decides how far the walk reaches: `local` stays in the first module,
//! `global` traverses every module in dependency order.
//!
//! This is the most expensive phase under `global` scope; the chain walk
//! is memoized per registry, since many options share chain suffixes.

use rustc_hash::FxHashMap;

use reg_graph::{ModuleGraph, Name, Scope, TypeLoc, TypeRef};

use crate::scan::walk_module_types;
use crate::{OptionSite, RegistryDeclaration};

/// Discover the option types of one registry declaration, in deterministic
/// discovery order (module order, then declaration order).
pub(crate) fn collect(graph: &ModuleGraph, decl: &RegistryDeclaration) -> Vec<OptionSite> {
    let module_count = match decl.scope {
        Scope::Local => 1,
        Scope::Global => graph.modules().len(),
    };

    // Memoized answer per type: does its chain reach the base?
    let mut chain_memo: FxHashMap<Name, bool> = FxHashMap::default();
    let mut sites = Vec::new();
    let mut discovery_index = 0u32;

    for (module_idx, module) in graph.modules().iter().take(module_count).enumerate() {
        walk_module_types(module, |ty_id, ty| {
            if !ty.is_concrete() {
                return;
            }
            if !chain_reaches(graph, ty.base.as_ref(), decl.base.name, &mut chain_memo) {
                return;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "module count always fits u32"
            )]
            let loc = TypeLoc {
                module: module_idx as u32,
                ty: ty_id,
            };
            sites.push(OptionSite {
                loc,
                discovery_index,
            });
            discovery_index += 1;
        });
    }

    tracing::debug!(
        options = sites.len(),
        scope = ?decl.scope,
        "collected option types"
    );
    sites
}

/// Whether a base chain starting at `start` reaches `target` by exact
/// identity. Memoizes per chain link; a link already known (either way)
/// answers for every type below it.
fn chain_reaches(
    graph: &ModuleGraph,
    start: Option<&TypeRef>,
    target: Name,
    memo: &mut FxHashMap<Name, bool>,
) -> bool {
    let mut trail: Vec<Name> = Vec::new();
    let mut current = start.cloned();
    let mut reached = false;

    while let Some(reference) = current {
        if reference.name == target {
            reached = true;
            break;
        }
        if let Some(&known) = memo.get(&reference.name) {
            reached = known;
            break;
        }
        if trail.contains(&reference.name) {
            break;
        }
        trail.push(reference.name);
        current = graph
            .resolve_ref(&reference)
            .and_then(|def| def.base.clone());
    }

    for link in trail {
        memo.insert(link, reached);
    }
    reached
}

#[cfg(test)]
mod tests;
