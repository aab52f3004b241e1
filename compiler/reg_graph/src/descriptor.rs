//! Type descriptors: the engine's read-only view of one declared type.

use smallvec::SmallVec;

use crate::{GenericParam, LookupMarker, Name, OptionMarker, RegistryMarker, TypeRef};

/// Index of a type within its module's type arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "snapshot", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// Create from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Get the raw arena index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the module's type arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declaration kind of a type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Class,
    AbstractClass,
    Interface,
    Struct,
    Enum,
}

impl TypeKind {
    /// Whether values of this kind can be instantiated.
    ///
    /// Abstract classes and interfaces are excluded from option discovery
    /// unconditionally.
    pub fn is_concrete(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Struct | TypeKind::Enum)
    }
}

/// One declared property.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    /// Property name as declared.
    pub name: Name,
    /// Declared type.
    pub ty: TypeRef,
    /// Lookup marker, when the property drives a generated lookup method.
    pub lookup: Option<LookupMarker>,
}

/// One constructor parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamSpec {
    /// Parameter name as declared.
    pub name: Name,
    /// Declared type.
    pub ty: TypeRef,
    /// Default literal text, if the parameter has one.
    pub default: Option<Name>,
}

/// One public constructor: ordered parameters, source order preserved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstructorSignature {
    /// Whether the constructor is publicly accessible.
    pub public: bool,
    /// Parameters in declaration order.
    pub params: Vec<ParamSpec>,
}

impl ConstructorSignature {
    /// A public zero-parameter constructor.
    pub fn nullary() -> Self {
        ConstructorSignature {
            public: true,
            params: Vec::new(),
        }
    }

    /// Whether invoking this constructor needs no caller-supplied arguments:
    /// either no parameters, or a default literal for every parameter.
    pub fn is_default_constructible(&self) -> bool {
        self.params.iter().all(|p| p.default.is_some())
    }
}

/// A type declared somewhere in the module graph.
///
/// Owned by the module graph provider; the engine only reads it.
/// `decl_index` captures source-declaration order within the module and is
/// the stable key deterministic code emission sorts by.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeDescriptor {
    /// Short name (`Circle`).
    pub name: Name,
    /// Fully-qualified name (`app.shapes.Circle`); the identity key.
    pub fqn: Name,
    /// Containing namespace (`app.shapes`), empty for the root namespace.
    pub namespace: Name,
    /// Declaration kind.
    pub kind: TypeKind,
    /// Base-type reference, if the declaration has one.
    pub base: Option<TypeRef>,
    /// Declared generic parameters; registries have at most two.
    pub generics: SmallVec<[GenericParam; 2]>,
    /// Registry-root marker, if this type declares a collection.
    pub registry: Option<RegistryMarker>,
    /// Option marker, if present.
    pub option: Option<OptionMarker>,
    /// Constructors in declaration order.
    pub constructors: Vec<ConstructorSignature>,
    /// Properties in declaration order.
    pub properties: Vec<Property>,
    /// Nested type declarations.
    pub nested: Vec<TypeId>,
    /// Source-declaration order within the module.
    pub decl_index: u32,
}

impl TypeDescriptor {
    /// Whether this type can appear in a registry as an option.
    pub fn is_concrete(&self) -> bool {
        self.kind.is_concrete()
    }

    /// Publicly-accessible constructors in declaration order.
    pub fn public_constructors(&self) -> impl Iterator<Item = &ConstructorSignature> {
        self.constructors.iter().filter(|c| c.public)
    }

    /// Index of the first public constructor invocable without caller
    /// arguments, the construction path enumeration accessors use.
    pub fn default_constructor(&self) -> Option<usize> {
        self.constructors
            .iter()
            .position(|c| c.public && c.is_default_constructible())
    }

    /// Look up a declared generic parameter by name.
    pub fn generic_param(&self, name: Name) -> Option<&GenericParam> {
        self.generics.iter().find(|p| p.name == name)
    }
}
