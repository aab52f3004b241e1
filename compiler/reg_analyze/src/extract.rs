//! Metadata extraction for discovered option types.
//!
//! Per option type: display name (explicit marker value or the short type
//! name), public constructors in declaration order, and the stable
//! ordering key. Per registry: the lookup methods, collected once from the
//! *base type's* own inheritance chain — they are defined on the base and
//! shared by every option.

use heck::ToSnakeCase;
use rustc_hash::FxHashSet;

use reg_graph::{LookupMethod, ModuleGraph, Name, StringLookup, TypeRef};

use crate::{OptionSite, ValueMeta};

/// Extract the emission metadata of one option type.
pub(crate) fn value_meta(graph: &ModuleGraph, site: OptionSite) -> ValueMeta {
    let ty = graph.descriptor(site.loc);
    let marker = ty.option.clone().unwrap_or_default();

    let constructors: Vec<_> = ty.public_constructors().cloned().collect();
    let default_ctor = constructors
        .iter()
        .position(reg_graph::ConstructorSignature::is_default_constructible);

    ValueMeta {
        site,
        name: ty.name,
        fqn: ty.fqn,
        display: marker.display_name.unwrap_or(ty.name),
        namespace: ty.namespace,
        order: (
            marker.order_hint.unwrap_or(0),
            site.discovery_index,
        ),
        constructors,
        default_ctor,
        force_factory: marker.force_factory,
        return_override: marker.return_override,
    }
}

/// Collect the lookup methods declared on the base type's chain.
///
/// Walks from the base type up through its ancestors; within one type,
/// properties keep declaration order. A derived type shadowing a property
/// of the same name wins, since it is reached first.
pub(crate) fn lookup_methods(graph: &ModuleGraph, base: &TypeRef) -> Vec<LookupMethod> {
    let mut methods = Vec::new();
    let mut seen_props: FxHashSet<Name> = FxHashSet::default();
    let mut seen_types: FxHashSet<Name> = FxHashSet::default();
    let mut current = Some(base.clone());

    while let Some(reference) = current {
        if !seen_types.insert(reference.name) {
            break;
        }
        let Some(def) = graph.resolve_ref(&reference) else {
            break;
        };
        for property in &def.properties {
            let Some(marker) = &property.lookup else {
                continue;
            };
            if !seen_props.insert(property.name) {
                continue;
            }
            let method = match marker.method_name {
                Some(explicit) => explicit,
                None => derived_method_name(graph, property.name),
            };
            methods.push(LookupMethod {
                property: property.name,
                method,
                cardinality: marker.cardinality,
                value_type: marker
                    .value_type
                    .clone()
                    .unwrap_or_else(|| property.ty.clone()),
            });
        }
        current = def.base.clone();
    }

    methods
}

/// `get_by_` + the snake-cased property name.
fn derived_method_name(graph: &ModuleGraph, property: Name) -> Name {
    let snake = graph.resolve(property).to_snake_case();
    graph.interner().intern(&format!("get_by_{snake}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use reg_graph::{
        Cardinality, ConstructorSignature, GraphBuilder, LookupMarker, ModuleGraph, OptionMarker,
        TypeKind, TypeSpec,
    };

    use super::*;

    fn graph_of(build: impl FnOnce(&mut GraphBuilder, usize)) -> ModuleGraph {
        let mut b = GraphBuilder::new();
        let app = b.module("app");
        build(&mut b, app);
        match b.finish() {
            Ok(graph) => graph,
            Err(err) => panic!("graph should build: {err}"),
        }
    }

    fn site_of(graph: &ModuleGraph, fqn: &str) -> OptionSite {
        let name = graph.interner().intern(fqn);
        let loc = match graph.locate(name) {
            Some(loc) => loc,
            None => panic!("{fqn} should exist"),
        };
        OptionSite {
            loc,
            discovery_index: 0,
        }
    }

    #[test]
    fn display_name_defaults_to_short_name() {
        let graph = graph_of(|b, app| {
            b.add(app, TypeSpec::class("app", "Circle"));
        });
        let meta = value_meta(&graph, site_of(&graph, "app.Circle"));
        assert_eq!(graph.resolve(meta.display), "Circle");
    }

    #[test]
    fn explicit_display_name_wins() {
        let graph = graph_of(|b, app| {
            let display = b.intern("Rounded");
            b.add(
                app,
                TypeSpec::class("app", "Circle").option(OptionMarker {
                    display_name: Some(display),
                    ..OptionMarker::default()
                }),
            );
        });
        let meta = value_meta(&graph, site_of(&graph, "app.Circle"));
        assert_eq!(graph.resolve(meta.display), "Rounded");
    }

    #[test]
    fn only_public_constructors_survive_in_order() {
        let graph = graph_of(|b, app| {
            let radius = b.param("radius", "f64", None);
            let label = b.param("label", "string", Some("\"round\""));
            b.add(
                app,
                TypeSpec::class("app", "Circle")
                    .constructor(ConstructorSignature {
                        public: true,
                        params: vec![radius],
                    })
                    .constructor(ConstructorSignature {
                        public: false,
                        params: vec![],
                    })
                    .constructor(ConstructorSignature {
                        public: true,
                        params: vec![label],
                    }),
            );
        });
        let meta = value_meta(&graph, site_of(&graph, "app.Circle"));
        assert_eq!(meta.constructors.len(), 2);
        assert_eq!(graph.resolve(meta.constructors[0].params[0].name), "radius");
        assert_eq!(graph.resolve(meta.constructors[1].params[0].name), "label");
        // The private nullary constructor must not make the type
        // default-constructible; the second public one does.
        assert_eq!(meta.default_ctor, Some(1));
    }

    #[test]
    fn order_hint_leads_the_ordering_key() {
        let graph = graph_of(|b, app| {
            b.add(
                app,
                TypeSpec::class("app", "Circle").option(OptionMarker {
                    order_hint: Some(-5),
                    ..OptionMarker::default()
                }),
            );
        });
        let mut site = site_of(&graph, "app.Circle");
        site.discovery_index = 7;
        let meta = value_meta(&graph, site);
        assert_eq!(meta.order, (-5, 7));
    }

    #[test]
    fn lookup_methods_come_from_the_base_chain() {
        let graph = graph_of(|b, app| {
            let code = b.property("Code", "u32", Some(LookupMarker::default()));
            let tag = b.property(
                "Tag",
                "string",
                Some(LookupMarker {
                    cardinality: Cardinality::Multiple,
                    ..LookupMarker::default()
                }),
            );
            let plain = b.property("Plain", "bool", None);
            b.add(
                app,
                TypeSpec::new("app", "Shape", TypeKind::AbstractClass)
                    .base(b.tref("app.Drawable"))
                    .property(code)
                    .property(plain),
            );
            b.add(
                app,
                TypeSpec::new("app", "Drawable", TypeKind::AbstractClass).property(tag),
            );
        });

        let base = TypeRef::simple(graph.interner().intern("app.Shape"));
        let methods = lookup_methods(&graph, &base);
        assert_eq!(methods.len(), 2);

        assert_eq!(graph.resolve(methods[0].method), "get_by_code");
        assert_eq!(methods[0].cardinality, Cardinality::Single);
        assert_eq!(graph.resolve(methods[0].value_type.name), "u32");

        assert_eq!(graph.resolve(methods[1].method), "get_by_tag");
        assert_eq!(methods[1].cardinality, Cardinality::Multiple);
    }

    #[test]
    fn explicit_method_name_and_value_type_win() {
        let graph = graph_of(|b, app| {
            let method = b.intern("find_by_code");
            let value_type = b.tref("i64");
            let code = b.property(
                "Code",
                "u32",
                Some(LookupMarker {
                    method_name: Some(method),
                    value_type: Some(value_type),
                    ..LookupMarker::default()
                }),
            );
            b.add(
                app,
                TypeSpec::new("app", "Shape", TypeKind::AbstractClass).property(code),
            );
        });

        let base = TypeRef::simple(graph.interner().intern("app.Shape"));
        let methods = lookup_methods(&graph, &base);
        assert_eq!(graph.resolve(methods[0].method), "find_by_code");
        assert_eq!(graph.resolve(methods[0].value_type.name), "i64");
    }

    #[test]
    fn multi_word_property_names_snake_case() {
        let graph = graph_of(|b, app| {
            let prop = b.property("AuthMethodKind", "string", Some(LookupMarker::default()));
            b.add(
                app,
                TypeSpec::new("app", "Shape", TypeKind::AbstractClass).property(prop),
            );
        });
        let base = TypeRef::simple(graph.interner().intern("app.Shape"));
        let methods = lookup_methods(&graph, &base);
        assert_eq!(graph.resolve(methods[0].method), "get_by_auth_method_kind");
    }

    #[test]
    fn lookup_walk_tolerates_bases_outside_the_graph() {
        let graph = graph_of(|b, app| {
            b.add(app, TypeSpec::class("app", "Circle"));
        });
        let base = TypeRef::simple(graph.interner().intern("framework.External"));
        assert!(lookup_methods(&graph, &base).is_empty());
    }
}
