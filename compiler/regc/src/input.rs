//! Module-graph manifest loading.
//!
//! The CLI consumes a JSON manifest the host build pipeline writes: one
//! object per module, modules in dependency order with the local module
//! first. Loading errors are environment errors — reported once, aborting
//! the run — never per-declaration diagnostics.

use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use reg_graph::{
    Cardinality, ConstructorSignature, GenericParam, GraphBuilder, GraphError, LookupMarker,
    ModuleGraph, OptionMarker, ParamSpec, Property, RegistryMarker, Scope, TypeKind, TypeRef,
    TypeSpec,
};

/// Error loading a manifest.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read manifest: {0}")]
    Io(#[from] io::Error),
    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid module graph: {0}")]
    Graph(#[from] GraphError),
}

/// Top-level manifest: modules in dependency order, local module first.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub modules: Vec<ModuleManifest>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleManifest {
    pub name: String,
    #[serde(default)]
    pub namespaces: Vec<NamespaceManifest>,
}

#[derive(Debug, Deserialize)]
pub struct NamespaceManifest {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub types: Vec<TypeManifest>,
}

#[derive(Debug, Deserialize)]
pub struct TypeManifest {
    pub name: String,
    #[serde(default)]
    pub kind: KindManifest,
    #[serde(default)]
    pub base: Option<TypeRefManifest>,
    #[serde(default)]
    pub nested_in: Option<String>,
    #[serde(default)]
    pub generics: Vec<GenericManifest>,
    #[serde(default)]
    pub registry: Option<RegistryManifest>,
    #[serde(default)]
    pub option: Option<OptionManifest>,
    #[serde(default)]
    pub constructors: Vec<ConstructorManifest>,
    #[serde(default)]
    pub properties: Vec<PropertyManifest>,
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindManifest {
    #[default]
    Class,
    #[serde(alias = "abstract")]
    AbstractClass,
    Interface,
    Struct,
    Enum,
}

impl From<KindManifest> for TypeKind {
    fn from(kind: KindManifest) -> Self {
        match kind {
            KindManifest::Class => TypeKind::Class,
            KindManifest::AbstractClass => TypeKind::AbstractClass,
            KindManifest::Interface => TypeKind::Interface,
            KindManifest::Struct => TypeKind::Struct,
            KindManifest::Enum => TypeKind::Enum,
        }
    }
}

/// A type reference: either a bare dotted path or a generic instantiation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeRefManifest {
    Path(String),
    Generic {
        path: String,
        #[serde(default)]
        args: Vec<TypeRefManifest>,
    },
}

#[derive(Debug, Deserialize)]
pub struct GenericManifest {
    pub name: String,
    #[serde(default)]
    pub constraint: Option<TypeRefManifest>,
}

#[derive(Debug, Deserialize)]
pub struct RegistryManifest {
    #[serde(default)]
    pub base_type: Option<TypeRefManifest>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub default_return: Option<TypeRefManifest>,
    #[serde(default)]
    pub default_generic_return: Option<TypeRefManifest>,
    #[serde(default)]
    pub scope: ScopeManifest,
    #[serde(default)]
    pub access: AccessManifest,
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeManifest {
    #[default]
    Local,
    Global,
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessManifest {
    #[default]
    Auto,
    Singleton,
    Factory,
}

#[derive(Debug, Deserialize)]
pub struct OptionManifest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub order_hint: Option<i32>,
    #[serde(default)]
    pub return_override: Option<TypeRefManifest>,
    #[serde(default)]
    pub force_factory: bool,
}

#[derive(Debug, Deserialize)]
pub struct ConstructorManifest {
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub params: Vec<ParamManifest>,
}

#[derive(Debug, Deserialize)]
pub struct ParamManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRefManifest,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyManifest {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRefManifest,
    #[serde(default)]
    pub lookup: Option<LookupManifest>,
}

#[derive(Debug, Deserialize)]
pub struct LookupManifest {
    #[serde(default)]
    pub method_name: Option<String>,
    #[serde(default)]
    pub cardinality: CardinalityManifest,
    #[serde(default)]
    pub value_type: Option<TypeRefManifest>,
}

#[derive(Copy, Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardinalityManifest {
    #[default]
    Single,
    Multiple,
}

fn default_true() -> bool {
    true
}

/// Load a manifest file and build the module graph.
pub fn load_manifest(path: &Path) -> Result<ModuleGraph, InputError> {
    let text = std::fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&text)?;
    graph_from_manifest(manifest)
}

/// Build a module graph from a deserialized manifest.
pub fn graph_from_manifest(manifest: Manifest) -> Result<ModuleGraph, InputError> {
    let mut builder = GraphBuilder::new();

    for module in manifest.modules {
        let idx = builder.module(&module.name);
        for namespace in module.namespaces {
            for ty in namespace.types {
                let spec = type_spec(&builder, &namespace.path, ty);
                builder.add(idx, spec);
            }
        }
    }

    Ok(builder.finish()?)
}

fn type_spec(builder: &GraphBuilder, namespace: &str, ty: TypeManifest) -> TypeSpec {
    let mut spec = TypeSpec::new(namespace, &ty.name, ty.kind.into());

    if let Some(base) = &ty.base {
        spec = spec.base(type_ref(builder, base));
    }
    if let Some(parent) = &ty.nested_in {
        spec = spec.nested_in(parent.clone());
    }
    for generic in &ty.generics {
        let name = builder.intern(&generic.name);
        spec = spec.generic(match &generic.constraint {
            Some(constraint) => GenericParam::constrained(name, type_ref(builder, constraint)),
            None => GenericParam::new(name),
        });
    }
    if let Some(registry) = &ty.registry {
        spec = spec.registry(registry_marker(builder, registry));
    }
    if let Some(option) = &ty.option {
        spec = spec.option(option_marker(builder, option));
    }
    for ctor in &ty.constructors {
        spec = spec.constructor(ConstructorSignature {
            public: ctor.public,
            params: ctor.params.iter().map(|p| param(builder, p)).collect(),
        });
    }
    for property in &ty.properties {
        spec = spec.property(Property {
            name: builder.intern(&property.name),
            ty: type_ref(builder, &property.ty),
            lookup: property.lookup.as_ref().map(|l| lookup_marker(builder, l)),
        });
    }
    spec
}

fn type_ref(builder: &GraphBuilder, manifest: &TypeRefManifest) -> TypeRef {
    match manifest {
        TypeRefManifest::Path(path) => builder.tref(path),
        TypeRefManifest::Generic { path, args } => builder.tref_with(
            path,
            args.iter().map(|a| type_ref(builder, a)).collect(),
        ),
    }
}

fn registry_marker(builder: &GraphBuilder, manifest: &RegistryManifest) -> RegistryMarker {
    RegistryMarker {
        base_type: manifest.base_type.as_ref().map(|r| type_ref(builder, r)),
        collection_name: manifest.collection_name.as_deref().map(|n| builder.intern(n)),
        default_return: manifest.default_return.as_ref().map(|r| type_ref(builder, r)),
        default_generic_return: manifest
            .default_generic_return
            .as_ref()
            .map(|r| type_ref(builder, r)),
        scope: match manifest.scope {
            ScopeManifest::Local => Scope::Local,
            ScopeManifest::Global => Scope::Global,
        },
        access: match manifest.access {
            AccessManifest::Auto => reg_graph::AccessPreference::Auto,
            AccessManifest::Singleton => reg_graph::AccessPreference::Singleton,
            AccessManifest::Factory => reg_graph::AccessPreference::Factory,
        },
    }
}

fn option_marker(builder: &GraphBuilder, manifest: &OptionManifest) -> OptionMarker {
    OptionMarker {
        display_name: manifest.display_name.as_deref().map(|n| builder.intern(n)),
        order_hint: manifest.order_hint,
        return_override: manifest.return_override.as_ref().map(|r| type_ref(builder, r)),
        force_factory: manifest.force_factory,
    }
}

fn lookup_marker(builder: &GraphBuilder, manifest: &LookupManifest) -> LookupMarker {
    LookupMarker {
        method_name: manifest.method_name.as_deref().map(|n| builder.intern(n)),
        cardinality: match manifest.cardinality {
            CardinalityManifest::Single => Cardinality::Single,
            CardinalityManifest::Multiple => Cardinality::Multiple,
        },
        value_type: manifest.value_type.as_ref().map(|r| type_ref(builder, r)),
    }
}

fn param(builder: &GraphBuilder, manifest: &ParamManifest) -> ParamSpec {
    ParamSpec {
        name: builder.intern(&manifest.name),
        ty: type_ref(builder, &manifest.ty),
        default: manifest.default.as_deref().map(|d| builder.intern(d)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use reg_graph::StringLookup;

    use super::*;

    fn load(json: &str) -> ModuleGraph {
        let manifest: Manifest = match serde_json::from_str(json) {
            Ok(manifest) => manifest,
            Err(err) => panic!("manifest should parse: {err}"),
        };
        match graph_from_manifest(manifest) {
            Ok(graph) => graph,
            Err(err) => panic!("graph should build: {err}"),
        }
    }

    #[test]
    fn minimal_manifest_builds() {
        let graph = load(
            r#"{ "modules": [ { "name": "app", "namespaces": [
                { "path": "app", "types": [ { "name": "Widget" } ] }
            ] } ] }"#,
        );
        let widget = graph.interner().intern("app.Widget");
        let ty = match graph.find(widget) {
            Some(ty) => ty,
            None => panic!("Widget should be indexed"),
        };
        assert_eq!(ty.kind, TypeKind::Class);
        assert!(ty.base.is_none());
    }

    #[test]
    fn bare_path_and_generic_base_both_parse() {
        let graph = load(
            r#"{ "modules": [ { "name": "app", "namespaces": [
                { "path": "app", "types": [
                    { "name": "Plain", "base": "app.Base" },
                    { "name": "Fancy", "base": { "path": "registry.Registry",
                                                  "args": ["app.Base", "app.IBase"] } }
                ] }
            ] } ] }"#,
        );
        let fancy = graph.interner().intern("app.Fancy");
        let ty = match graph.find(fancy) {
            Some(ty) => ty,
            None => panic!("Fancy should be indexed"),
        };
        let base = match &ty.base {
            Some(base) => base,
            None => panic!("Fancy should have a base"),
        };
        assert_eq!(graph.resolve(base.name), "registry.Registry");
        assert_eq!(base.args.len(), 2);
        assert_eq!(graph.resolve(base.args[1].name), "app.IBase");
    }

    #[test]
    fn kinds_and_markers_deserialize() {
        let graph = load(
            r#"{ "modules": [ { "name": "app", "namespaces": [
                { "path": "app", "types": [
                    { "name": "Base", "kind": "abstract" },
                    { "name": "IFace", "kind": "interface" },
                    { "name": "Shapes",
                      "registry": { "scope": "global", "access": "factory",
                                     "collection_name": "AllShapes" } },
                    { "name": "Circle",
                      "option": { "display_name": "Round", "order_hint": -1 },
                      "constructors": [ { "params": [
                          { "name": "radius", "type": "f64", "default": "1.0" } ] } ] }
                ] }
            ] } ] }"#,
        );

        let base = graph.interner().intern("app.Base");
        assert_eq!(
            graph.find(base).map(|t| t.kind),
            Some(TypeKind::AbstractClass)
        );

        let shapes = graph.interner().intern("app.Shapes");
        let registry = match graph.find(shapes).and_then(|t| t.registry.as_ref()) {
            Some(marker) => marker,
            None => panic!("Shapes should carry a registry marker"),
        };
        assert_eq!(registry.scope, Scope::Global);
        assert_eq!(
            registry.collection_name.map(|n| graph.resolve(n).to_owned()),
            Some("AllShapes".to_owned())
        );

        let circle = graph.interner().intern("app.Circle");
        let ty = match graph.find(circle) {
            Some(ty) => ty,
            None => panic!("Circle should be indexed"),
        };
        let option = match &ty.option {
            Some(option) => option,
            None => panic!("Circle should carry an option marker"),
        };
        assert_eq!(option.order_hint, Some(-1));
        assert_eq!(ty.constructors.len(), 1);
        assert!(ty.constructors[0].public);
        assert_eq!(
            ty.constructors[0].params[0]
                .default
                .map(|d| graph.resolve(d).to_owned()),
            Some("1.0".to_owned())
        );
    }

    #[test]
    fn duplicate_types_are_an_input_error() {
        let manifest: Manifest = match serde_json::from_str(
            r#"{ "modules": [ { "name": "app", "namespaces": [
                { "path": "app", "types": [ { "name": "X" }, { "name": "X" } ] }
            ] } ] }"#,
        ) {
            Ok(manifest) => manifest,
            Err(err) => panic!("manifest should parse: {err}"),
        };
        assert!(matches!(
            graph_from_manifest(manifest),
            Err(InputError::Graph(GraphError::DuplicateType { .. }))
        ));
    }

    #[test]
    fn malformed_json_is_an_input_error() {
        let result: Result<Manifest, _> = serde_json::from_str("{ not json");
        assert!(result.is_err());
    }
}
