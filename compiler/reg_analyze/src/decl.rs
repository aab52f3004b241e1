//! Intermediate results the passes hand each other.

use reg_graph::{
    AccessPreference, ConstructorSignature, Name, RegistryMarker, Scope, TypeLoc, TypeRef,
};

/// A type found by the declaration scanner: carries a registry marker,
/// not yet resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// Where the declaration lives.
    pub loc: TypeLoc,
}

/// A registry declaration after base-type and arity resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryDeclaration {
    /// Where the declaration lives.
    pub loc: TypeLoc,
    /// Fully-qualified name of the declaring type.
    pub fqn: Name,
    /// Collection name: explicit marker value or the declaration's short
    /// name.
    pub collection: Name,
    /// Namespace of the generated registry, after fallback substitution.
    pub namespace: Name,
    /// The resolved base type options must derive from.
    pub base: TypeRef,
    /// Return type implied by a generic constraint on the declaration
    /// (`Registry<T> where T : Base` resolves `T`'s constraint), feeding
    /// rule 3 of return-type resolution.
    pub constraint_return: Option<TypeRef>,
    /// `TReturn` from a double-argument root instantiation, feeding rule 4.
    pub candidate_return: Option<TypeRef>,
    /// Discovery scope.
    pub scope: Scope,
    /// Singleton-vs-factory preference.
    pub access: AccessPreference,
    /// The full registry marker, for rules 2 and 5.
    pub marker: RegistryMarker,
}

/// A concrete type discovered for one registry, identified by location
/// and stamped with its discovery order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OptionSite {
    /// Where the option type lives.
    pub loc: TypeLoc,
    /// Position in deterministic discovery order (module order, then
    /// declaration order).
    pub discovery_index: u32,
}

/// Extracted metadata for one option type, not yet assembled into a
/// [`reg_graph::ValueDescriptor`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueMeta {
    /// Where the option type lives.
    pub site: OptionSite,
    /// Short type name.
    pub name: Name,
    /// Fully-qualified type name.
    pub fqn: Name,
    /// Resolved display name.
    pub display: Name,
    /// Originating namespace.
    pub namespace: Name,
    /// Stable ordering key: explicit order hint, then discovery order.
    pub order: (i32, u32),
    /// Public constructors in declaration order.
    pub constructors: Vec<ConstructorSignature>,
    /// Index of the first default-constructible public constructor.
    pub default_ctor: Option<usize>,
    /// Per-item factory override from the option marker.
    pub force_factory: bool,
    /// Per-item return type override, feeding rule 1 of return-type
    /// resolution.
    pub return_override: Option<TypeRef>,
}
