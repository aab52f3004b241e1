//! Registry declaration scanner.
//!
//! Walks every module's namespace tree — including nested type
//! declarations — exactly once, collecting the types that carry a
//! registry-root marker. The walk is depth-first in arena creation order,
//! which is declaration order, so the candidate list is deterministic.

use rustc_hash::FxHashSet;

use reg_graph::{ModuleGraph, ModuleSnapshot, Name, TypeDescriptor, TypeId, TypeLoc};

use crate::Candidate;

/// Visit every type in a module — namespace-declared and nested — in
/// declaration order. Shared by declaration scanning and option discovery.
pub(crate) fn walk_module_types<F>(module: &ModuleSnapshot, mut visit: F)
where
    F: FnMut(TypeId, &TypeDescriptor),
{
    let mut stack = vec![module.root()];
    while let Some(ns_id) = stack.pop() {
        let node = module.namespace(ns_id);
        for &ty_id in &node.types {
            visit_with_nested(module, ty_id, &mut visit);
        }
        // Reverse so the depth-first order matches creation order.
        for &child in node.children.iter().rev() {
            stack.push(child);
        }
    }
}

fn visit_with_nested<F>(module: &ModuleSnapshot, ty_id: TypeId, visit: &mut F)
where
    F: FnMut(TypeId, &TypeDescriptor),
{
    let ty = module.ty(ty_id);
    visit(ty_id, ty);
    for &nested in &ty.nested {
        visit_with_nested(module, nested, visit);
    }
}

/// Find every registry-root declaration in the graph.
///
/// Each type is checked for the marker at most once; the visited set
/// memoizes the answer by type identity, so a type known not to be a root
/// is never re-examined even when the arena reaches it twice.
pub(crate) fn registry_roots(graph: &ModuleGraph) -> Vec<Candidate> {
    let mut visited: FxHashSet<Name> = FxHashSet::default();
    let mut candidates = Vec::new();

    for (module_idx, module) in graph.modules().iter().enumerate() {
        walk_module_types(module, |ty_id, ty| {
            if !visited.insert(ty.fqn) {
                return;
            }
            if ty.registry.is_some() {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "module count always fits u32"
                )]
                let loc = TypeLoc {
                    module: module_idx as u32,
                    ty: ty_id,
                };
                candidates.push(Candidate { loc });
            }
        });
    }

    tracing::debug!(count = candidates.len(), "scanned registry declarations");
    candidates
}
