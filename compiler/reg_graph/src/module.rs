//! Module snapshots and their namespace arenas.

use crate::{Name, TypeDescriptor, TypeId};

/// Index of a namespace node within its module's namespace arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NamespaceId(u32);

impl NamespaceId {
    /// Create from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NamespaceId(raw)
    }

    /// Index into the module's namespace arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One namespace node: child namespaces plus directly-declared types.
///
/// The arena forms a tree rooted at the module's root namespace (empty
/// path). The graph builder guarantees a tree, so traversal never needs a
/// cycle check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamespaceNode {
    /// Full dotted path (`app.shapes`), empty for the root.
    pub path: Name,
    /// Last path segment (`shapes`), empty for the root.
    pub name: Name,
    /// Child namespaces in creation order.
    pub children: Vec<NamespaceId>,
    /// Types declared directly in this namespace, in declaration order.
    pub types: Vec<TypeId>,
}

/// Read-only snapshot of one module's declarations.
#[derive(Debug)]
pub struct ModuleSnapshot {
    name: Name,
    root: NamespaceId,
    namespaces: Vec<NamespaceNode>,
    types: Vec<TypeDescriptor>,
}

impl ModuleSnapshot {
    /// Assemble a snapshot from its arenas. Used by the graph builder.
    pub(crate) fn new(
        name: Name,
        root: NamespaceId,
        namespaces: Vec<NamespaceNode>,
        types: Vec<TypeDescriptor>,
    ) -> Self {
        ModuleSnapshot {
            name,
            root,
            namespaces,
            types,
        }
    }

    /// Module name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// Root namespace of the module.
    pub fn root(&self) -> NamespaceId {
        self.root
    }

    /// Resolve a namespace id.
    pub fn namespace(&self, id: NamespaceId) -> &NamespaceNode {
        &self.namespaces[id.index()]
    }

    /// Resolve a type id.
    pub fn ty(&self, id: TypeId) -> &TypeDescriptor {
        &self.types[id.index()]
    }

    /// Number of types declared in this module.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// All types with their ids, in declaration order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeDescriptor)> {
        self.types.iter().enumerate().map(|(i, ty)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "arena indices always fit u32"
            )]
            let id = TypeId::from_raw(i as u32);
            (id, ty)
        })
    }
}
