//! Programmatic construction of module graphs.
//!
//! The builder is the only way to make a [`ModuleGraph`]: the manifest
//! loader drives it from deserialized input, and tests drive it directly.
//! It assigns declaration indices in insertion order, builds each module's
//! namespace arena from dotted paths, and indexes every type by interned
//! fully-qualified name.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    ConstructorSignature, GenericParam, LookupMarker, ModuleGraph, ModuleSnapshot, Name,
    NamespaceId, NamespaceNode, OptionMarker, ParamSpec, Property, RegistryMarker, StringInterner,
    StringLookup, TypeDescriptor, TypeId, TypeKind, TypeLoc, TypeRef,
};

/// Error constructing a module graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two declarations share one fully-qualified name.
    DuplicateType { fqn: String },
    /// A nested declaration names a parent that does not exist in its module.
    UnknownParent { fqn: String, parent: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateType { fqn } => {
                write!(f, "duplicate type definition `{fqn}`")
            }
            GraphError::UnknownParent { fqn, parent } => {
                write!(f, "nested type `{fqn}` names unknown parent `{parent}`")
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Specification of one type declaration, consumed by [`GraphBuilder::add`].
#[derive(Clone, Debug)]
pub struct TypeSpec {
    namespace: String,
    name: String,
    nested_in: Option<String>,
    kind: TypeKind,
    base: Option<TypeRef>,
    generics: Vec<GenericParam>,
    registry: Option<RegistryMarker>,
    option: Option<OptionMarker>,
    constructors: Vec<ConstructorSignature>,
    properties: Vec<Property>,
}

impl TypeSpec {
    /// A declaration of the given kind in the given namespace.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: TypeKind) -> Self {
        TypeSpec {
            namespace: namespace.into(),
            name: name.into(),
            nested_in: None,
            kind,
            base: None,
            generics: Vec::new(),
            registry: None,
            option: None,
            constructors: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// A concrete class declaration.
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(namespace, name, TypeKind::Class)
    }

    /// Set the base-type reference.
    pub fn base(mut self, base: TypeRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Declare this type nested inside the type with the given
    /// fully-qualified name. Nested types stay out of the namespace node
    /// and are reached through their parent during traversal.
    pub fn nested_in(mut self, parent_fqn: impl Into<String>) -> Self {
        self.nested_in = Some(parent_fqn.into());
        self
    }

    /// Add a generic parameter.
    pub fn generic(mut self, param: GenericParam) -> Self {
        self.generics.push(param);
        self
    }

    /// Attach a registry-root marker.
    pub fn registry(mut self, marker: RegistryMarker) -> Self {
        self.registry = Some(marker);
        self
    }

    /// Attach an option marker.
    pub fn option(mut self, marker: OptionMarker) -> Self {
        self.option = Some(marker);
        self
    }

    /// Add a constructor. Declaration order is preserved.
    pub fn constructor(mut self, ctor: ConstructorSignature) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Add a property. Declaration order is preserved.
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }
}

struct ModuleBuild {
    name: Name,
    specs: Vec<TypeSpec>,
}

/// Builder for [`ModuleGraph`].
pub struct GraphBuilder {
    interner: StringInterner,
    modules: Vec<ModuleBuild>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            interner: StringInterner::new(),
            modules: Vec::new(),
        }
    }

    /// Intern a string through the graph's interner.
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// A non-generic type reference.
    pub fn tref(&self, path: &str) -> TypeRef {
        TypeRef::simple(self.intern(path))
    }

    /// A generic type reference.
    pub fn tref_with(&self, path: &str, args: Vec<TypeRef>) -> TypeRef {
        TypeRef::with_args(self.intern(path), args)
    }

    /// A constructor parameter.
    pub fn param(&self, name: &str, ty: &str, default: Option<&str>) -> ParamSpec {
        ParamSpec {
            name: self.intern(name),
            ty: self.tref(ty),
            default: default.map(|d| self.intern(d)),
        }
    }

    /// A property, optionally carrying a lookup marker.
    pub fn property(&self, name: &str, ty: &str, lookup: Option<LookupMarker>) -> Property {
        Property {
            name: self.intern(name),
            ty: self.tref(ty),
            lookup,
        }
    }

    /// Start a module; modules must be added in dependency order with the
    /// local module first. Returns the module's index.
    pub fn module(&mut self, name: &str) -> usize {
        let name = self.intern(name);
        self.modules.push(ModuleBuild {
            name,
            specs: Vec::new(),
        });
        self.modules.len() - 1
    }

    /// Add a type declaration to a module. Declaration order within the
    /// module is the order of `add` calls.
    pub fn add(&mut self, module: usize, spec: TypeSpec) {
        self.modules[module].specs.push(spec);
    }

    /// Assemble the graph.
    pub fn finish(self) -> Result<ModuleGraph, GraphError> {
        let GraphBuilder { interner, modules } = self;
        let mut snapshots = Vec::with_capacity(modules.len());
        let mut index: FxHashMap<Name, TypeLoc> = FxHashMap::default();

        for (module_idx, module) in modules.into_iter().enumerate() {
            let snapshot = build_module(&interner, module)?;

            for (ty_id, ty) in snapshot.types() {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "module count always fits u32"
                )]
                let loc = TypeLoc {
                    module: module_idx as u32,
                    ty: ty_id,
                };
                if index.insert(ty.fqn, loc).is_some() {
                    return Err(GraphError::DuplicateType {
                        fqn: interner.resolve(ty.fqn).to_owned(),
                    });
                }
            }
            snapshots.push(snapshot);
        }

        Ok(ModuleGraph::new(interner, snapshots, index))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_module(interner: &StringInterner, module: ModuleBuild) -> Result<ModuleSnapshot, GraphError> {
    // Root namespace at index 0.
    let mut namespaces = vec![NamespaceNode {
        path: Name::EMPTY,
        name: Name::EMPTY,
        children: Vec::new(),
        types: Vec::new(),
    }];
    let root = NamespaceId::from_raw(0);
    let mut ns_by_path: FxHashMap<String, NamespaceId> = FxHashMap::default();
    ns_by_path.insert(String::new(), root);

    // First pass: fully-qualified names and descriptor shells, so nested
    // declarations can reference parents declared later in the module.
    let mut fqns = Vec::with_capacity(module.specs.len());
    let mut local: FxHashMap<String, TypeId> = FxHashMap::default();
    for (i, spec) in module.specs.iter().enumerate() {
        let fqn = qualify(spec);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena indices always fit u32"
        )]
        let id = TypeId::from_raw(i as u32);
        // Intra-module duplicates surface as graph-wide duplicates in
        // `finish`; keep the first here so indexing stays total.
        local.entry(fqn.clone()).or_insert(id);
        fqns.push(fqn);
    }

    let mut types = Vec::with_capacity(module.specs.len());
    let mut nested_links: Vec<(TypeId, TypeId)> = Vec::new();

    for (i, spec) in module.specs.into_iter().enumerate() {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena indices always fit u32"
        )]
        let id = TypeId::from_raw(i as u32);

        if let Some(parent_fqn) = &spec.nested_in {
            let Some(&parent) = local.get(parent_fqn.as_str()) else {
                return Err(GraphError::UnknownParent {
                    fqn: fqns[i].clone(),
                    parent: parent_fqn.clone(),
                });
            };
            nested_links.push((parent, id));
        } else {
            let ns = ensure_namespace(interner, &mut namespaces, &mut ns_by_path, &spec.namespace);
            namespaces[ns.index()].types.push(id);
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "arena indices always fit u32"
        )]
        let decl_index = i as u32;
        types.push(TypeDescriptor {
            name: interner.intern(&spec.name),
            fqn: interner.intern(&fqns[i]),
            namespace: interner.intern(&spec.namespace),
            kind: spec.kind,
            base: spec.base,
            generics: SmallVec::from_vec(spec.generics),
            registry: spec.registry,
            option: spec.option,
            constructors: spec.constructors,
            properties: spec.properties,
            nested: Vec::new(),
            decl_index,
        });
    }

    for (parent, child) in nested_links {
        types[parent.index()].nested.push(child);
    }

    Ok(ModuleSnapshot::new(module.name, root, namespaces, types))
}

fn qualify(spec: &TypeSpec) -> String {
    if let Some(parent) = &spec.nested_in {
        format!("{parent}.{}", spec.name)
    } else if spec.namespace.is_empty() {
        spec.name.clone()
    } else {
        format!("{}.{}", spec.namespace, spec.name)
    }
}

fn ensure_namespace(
    interner: &StringInterner,
    namespaces: &mut Vec<NamespaceNode>,
    by_path: &mut FxHashMap<String, NamespaceId>,
    path: &str,
) -> NamespaceId {
    if let Some(&id) = by_path.get(path) {
        return id;
    }

    let (parent_path, segment) = match path.rfind('.') {
        Some(dot) => (&path[..dot], &path[dot + 1..]),
        None => ("", path),
    };
    let parent = ensure_namespace(interner, namespaces, by_path, parent_path);

    #[expect(
        clippy::cast_possible_truncation,
        reason = "arena indices always fit u32"
    )]
    let id = NamespaceId::from_raw(namespaces.len() as u32);
    namespaces.push(NamespaceNode {
        path: interner.intern(path),
        name: interner.intern(segment),
        children: Vec::new(),
        types: Vec::new(),
    });
    namespaces[parent.index()].children.push(id);
    by_path.insert(path.to_owned(), id);
    id
}
