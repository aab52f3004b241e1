//! The module graph: every declaration visible to one engine run.

use rustc_hash::FxHashMap;

use crate::{ModuleSnapshot, Name, StringInterner, StringLookup, TypeDescriptor, TypeId, TypeRef};

/// Location of a type: module index plus type id within that module.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TypeLoc {
    /// Index into the graph's dependency-ordered module list.
    pub module: u32,
    /// Type id within that module.
    pub ty: TypeId,
}

/// Read-only view of all declarations reachable from a root project.
///
/// Modules are held in dependency order with the local module at index 0;
/// the engine never learns how they were resolved. All lookups key on
/// interned fully-qualified names, so two differently-qualified types with
/// the same short name never collide.
#[derive(Debug)]
pub struct ModuleGraph {
    interner: StringInterner,
    modules: Vec<ModuleSnapshot>,
    index: FxHashMap<Name, TypeLoc>,
}

impl ModuleGraph {
    pub(crate) fn new(
        interner: StringInterner,
        modules: Vec<ModuleSnapshot>,
        index: FxHashMap<Name, TypeLoc>,
    ) -> Self {
        ModuleGraph {
            interner,
            modules,
            index,
        }
    }

    /// The interner every name in this graph was produced by.
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// All modules, dependency-ordered, local module first.
    pub fn modules(&self) -> &[ModuleSnapshot] {
        &self.modules
    }

    /// The local module.
    pub fn local(&self) -> &ModuleSnapshot {
        &self.modules[0]
    }

    /// Locate a type by fully-qualified name.
    pub fn locate(&self, fqn: Name) -> Option<TypeLoc> {
        self.index.get(&fqn).copied()
    }

    /// Resolve a location to its descriptor.
    pub fn descriptor(&self, loc: TypeLoc) -> &TypeDescriptor {
        self.modules[loc.module as usize].ty(loc.ty)
    }

    /// Find a type descriptor by fully-qualified name.
    pub fn find(&self, fqn: Name) -> Option<&TypeDescriptor> {
        self.locate(fqn).map(|loc| self.descriptor(loc))
    }

    /// Find the declaration a type reference points at, if it is declared
    /// anywhere in the graph. References to framework types outside the
    /// graph resolve to `None`.
    pub fn resolve_ref(&self, r: &TypeRef) -> Option<&TypeDescriptor> {
        self.find(r.name)
    }
}

impl StringLookup for ModuleGraph {
    fn resolve(&self, name: Name) -> &str {
        self.interner.resolve(name)
    }
}
