//! Module-graph data model for the regc registry compiler.
//!
//! This crate owns every type the engine's passes exchange:
//!
//! - [`Name`] / [`StringInterner`]: interned identifiers; type identity is
//!   interned fully-qualified name equality
//! - [`TypeDescriptor`] and friends: the read-only view of one declared
//!   type, including markers, constructors, and properties
//! - [`ModuleSnapshot`] / [`ModuleGraph`]: namespace arenas per module,
//!   dependency-ordered with the local module first
//! - [`GraphBuilder`]: the construction API used by manifest loading and
//!   tests
//! - [`RegistryModel`] and friends: the immutable, fully resolved output
//!   of analysis that code emission consumes
//!
//! The graph layer deliberately knows nothing about any particular
//! reflection or parser front-end; hosts adapt their own static-analysis
//! output into these types.

mod builder;
mod descriptor;
mod graph;
mod interner;
mod markers;
mod model;
mod module;
mod name;
mod ty;

pub use builder::{GraphBuilder, GraphError, TypeSpec};
pub use descriptor::{
    ConstructorSignature, ParamSpec, Property, TypeDescriptor, TypeId, TypeKind,
};
pub use graph::{ModuleGraph, TypeLoc};
pub use interner::{InternError, StringInterner, StringLookup};
pub use markers::{
    AccessPreference, Cardinality, LookupMarker, OptionMarker, RegistryMarker, Scope,
};
pub use model::{AccessMode, GeneratedRegistry, LookupMethod, RegistryModel, ValueDescriptor};
pub use module::{ModuleSnapshot, NamespaceId, NamespaceNode};
pub use name::Name;
pub use ty::{GenericParam, TypeRef};
