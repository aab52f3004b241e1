use pretty_assertions::assert_eq;

use reg_graph::{
    ConstructorSignature, GraphBuilder, ModuleGraph, RegistryMarker, Scope, StringLookup,
    TypeKind, TypeSpec,
};

use super::*;
use crate::{base, scan};

const ROOT: &str = "registry.Registry";

fn resolve_decl(graph: &ModuleGraph) -> RegistryDeclaration {
    let root = graph.interner().intern(ROOT);
    let candidates = scan::registry_roots(graph);
    assert_eq!(candidates.len(), 1, "fixture should have one candidate");
    match base::resolve(graph, root, Name::EMPTY, candidates[0]) {
        Ok(decl) => decl,
        Err(diag) => panic!("declaration should resolve: {}", diag.message),
    }
}

fn option_names(graph: &ModuleGraph, sites: &[OptionSite]) -> Vec<String> {
    sites
        .iter()
        .map(|s| graph.resolve(graph.descriptor(s.loc).fqn).to_owned())
        .collect()
}

fn fixture(scope: Scope) -> ModuleGraph {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    b.add(app, TypeSpec::new("app", "Shape", TypeKind::AbstractClass));
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(b.tref_with(ROOT, vec![shape.clone()]))
            .registry(RegistryMarker {
                scope,
                ..RegistryMarker::default()
            }),
    );
    b.add(
        app,
        TypeSpec::class("app", "Circle")
            .base(shape.clone())
            .constructor(ConstructorSignature::nullary()),
    );
    b.add(
        app,
        TypeSpec::new("app", "Curved", TypeKind::AbstractClass).base(shape.clone()),
    );
    b.add(
        app,
        TypeSpec::class("app", "Ellipse")
            .base(b.tref("app.Curved"))
            .constructor(ConstructorSignature::nullary()),
    );
    b.add(
        app,
        TypeSpec::new("app", "IDrawable", TypeKind::Interface).base(shape.clone()),
    );
    b.add(app, TypeSpec::class("app", "Unrelated"));

    let dep = b.module("dep");
    b.add(
        dep,
        TypeSpec::class("dep", "Square")
            .base(b.tref("app.Shape"))
            .constructor(ConstructorSignature::nullary()),
    );

    match b.finish() {
        Ok(graph) => graph,
        Err(err) => panic!("graph should build: {err}"),
    }
}

#[test]
fn local_scope_stays_in_the_local_module() {
    let graph = fixture(Scope::Local);
    let decl = resolve_decl(&graph);
    let sites = collect(&graph, &decl);
    assert_eq!(
        option_names(&graph, &sites),
        vec!["app.Circle", "app.Ellipse"]
    );
}

#[test]
fn global_scope_reaches_referenced_modules() {
    let graph = fixture(Scope::Global);
    let decl = resolve_decl(&graph);
    let sites = collect(&graph, &decl);
    assert_eq!(
        option_names(&graph, &sites),
        vec!["app.Circle", "app.Ellipse", "dep.Square"]
    );
}

#[test]
fn abstract_types_and_interfaces_are_excluded() {
    let graph = fixture(Scope::Global);
    let decl = resolve_decl(&graph);
    let names = option_names(&graph, &collect(&graph, &decl));
    assert!(!names.iter().any(|n| n == "app.Curved"));
    assert!(!names.iter().any(|n| n == "app.IDrawable"));
}

#[test]
fn discovery_indices_are_sequential() {
    let graph = fixture(Scope::Global);
    let decl = resolve_decl(&graph);
    let sites = collect(&graph, &decl);
    let indices: Vec<u32> = sites.iter().map(|s| s.discovery_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn identity_is_fully_qualified_not_short_name() {
    // `other.Shape` shares the short name of the base but is a different
    // type; types deriving it must not be collected.
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    b.add(app, TypeSpec::new("app", "Shape", TypeKind::AbstractClass));
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(b.tref_with(ROOT, vec![shape.clone()]))
            .registry(RegistryMarker::default()),
    );
    b.add(
        app,
        TypeSpec::new("other", "Shape", TypeKind::AbstractClass),
    );
    b.add(
        app,
        TypeSpec::class("app", "Impostor").base(b.tref("other.Shape")),
    );
    b.add(app, TypeSpec::class("app", "Genuine").base(shape));
    let graph = match b.finish() {
        Ok(graph) => graph,
        Err(err) => panic!("graph should build: {err}"),
    };

    let decl = resolve_decl(&graph);
    assert_eq!(
        option_names(&graph, &collect(&graph, &decl)),
        vec!["app.Genuine"]
    );
}

#[test]
fn chain_inclusion_is_transitive() {
    let graph = fixture(Scope::Local);
    let decl = resolve_decl(&graph);
    let names = option_names(&graph, &collect(&graph, &decl));
    // Ellipse derives Curved derives Shape.
    assert!(names.iter().any(|n| n == "app.Ellipse"));
}

#[test]
fn empty_result_when_nothing_derives_the_base() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    b.add(
        app,
        TypeSpec::class("app", "Widgets")
            .base(b.tref_with(ROOT, vec![b.tref("app.Widget")]))
            .registry(RegistryMarker::default()),
    );
    let graph = match b.finish() {
        Ok(graph) => graph,
        Err(err) => panic!("graph should build: {err}"),
    };

    let decl = resolve_decl(&graph);
    assert!(collect(&graph, &decl).is_empty());
}
