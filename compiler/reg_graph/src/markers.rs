//! Declarative markers read from the module graph.
//!
//! Markers are the engine's entire input surface beyond the type graph
//! itself: a registry-root marker on the collection declaration, an
//! optional option marker on discovered types, and lookup markers on
//! base-type properties. The engine only reads them; it never checks how
//! the host front-end spelled them.

use crate::{Name, TypeRef};

/// Discovery scope for option types.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Scope {
    /// Walk the local module only.
    #[default]
    Local,
    /// Walk every module reachable through the dependency graph.
    Global,
}

/// Singleton-vs-factory preference on a registry declaration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum AccessPreference {
    /// Singleton when every option type is default-constructible,
    /// factory otherwise.
    #[default]
    Auto,
    /// Force cached singleton accessors.
    Singleton,
    /// Force per-constructor factory functions.
    Factory,
}

/// Result cardinality of a generated lookup method.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Cardinality {
    /// First match or none.
    #[default]
    Single,
    /// Every match.
    Multiple,
}

/// Marker declaring a type as the root of a generated registry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegistryMarker {
    /// Explicit target base type; inferred from the generic shape when absent.
    pub base_type: Option<TypeRef>,
    /// Explicit collection name; derived from the declaration name when absent.
    pub collection_name: Option<Name>,
    /// Explicit return type (rule 2 of return-type resolution).
    pub default_return: Option<TypeRef>,
    /// Configured fallback return type (rule 5).
    pub default_generic_return: Option<TypeRef>,
    /// Discovery scope.
    pub scope: Scope,
    /// Singleton-vs-factory preference.
    pub access: AccessPreference,
}

/// Marker on a discovered option type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OptionMarker {
    /// Explicit display name; the short type name when absent.
    pub display_name: Option<Name>,
    /// Explicit ordering hint; ties break on discovery order.
    pub order_hint: Option<i32>,
    /// Per-item return type (rule 1 of return-type resolution).
    pub return_override: Option<TypeRef>,
    /// Per-item factory override: force a factory function for this type
    /// even in a singleton-mode registry.
    pub force_factory: bool,
}

/// Marker on a base-type property driving a generated lookup method.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LookupMarker {
    /// Explicit generated method name; derived from the property name
    /// when absent.
    pub method_name: Option<Name>,
    /// Single or multiple results.
    pub cardinality: Cardinality,
    /// Explicit value type; the property's declared type when absent.
    pub value_type: Option<TypeRef>,
}
