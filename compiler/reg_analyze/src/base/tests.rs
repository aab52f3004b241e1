use pretty_assertions::assert_eq;

use reg_diagnostic::ErrorCode;
use reg_graph::{
    GenericParam, GraphBuilder, ModuleGraph, RegistryMarker, TypeKind, TypeSpec,
};

use super::*;
use crate::scan;

const ROOT: &str = "registry.Registry";

fn resolve_first(graph: &ModuleGraph) -> Result<RegistryDeclaration, Diagnostic> {
    let root = graph.interner().intern(ROOT);
    let candidates = scan::registry_roots(graph);
    assert_eq!(candidates.len(), 1, "fixture should have one candidate");
    resolve(graph, root, Name::EMPTY, candidates[0])
}

fn finish(b: GraphBuilder) -> ModuleGraph {
    match b.finish() {
        Ok(graph) => graph,
        Err(err) => panic!("graph should build: {err}"),
    }
}

#[test]
fn single_argument_shape_resolves_base() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    let root_inst = b.tref_with(ROOT, vec![shape.clone()]);
    b.add(app, TypeSpec::new("app", "Shape", TypeKind::AbstractClass));
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(root_inst)
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(decl.base, shape);
    assert_eq!(decl.candidate_return, None);
    assert_eq!(decl.constraint_return, None);
    assert_eq!(graph.resolve(decl.collection), "Shapes");
    assert_eq!(graph.resolve(decl.namespace), "app");
}

#[test]
fn double_argument_shape_captures_candidate_return() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    let ishape = b.tref("app.IShape");
    let root_inst = b.tref_with(ROOT, vec![shape.clone(), ishape.clone()]);
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(root_inst)
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(decl.base, shape);
    assert_eq!(decl.candidate_return, Some(ishape));
}

#[test]
fn instantiation_found_through_intermediate_base() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    let root_inst = b.tref_with(ROOT, vec![shape.clone()]);
    b.add(
        app,
        TypeSpec::new("app", "Middle", TypeKind::AbstractClass).base(root_inst),
    );
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(b.tref("app.Middle"))
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(decl.base, shape);
}

#[test]
fn generic_arguments_substitute_through_intermediates() {
    // Middle<T> : Registry<T>; Shapes : Middle<app.Shape>
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let t = b.intern("T");
    let root_inst = b.tref_with(ROOT, vec![b.tref("T")]);
    b.add(
        app,
        TypeSpec::new("app", "Middle", TypeKind::AbstractClass)
            .generic(GenericParam::new(t))
            .base(root_inst),
    );
    let shape = b.tref("app.Shape");
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(b.tref_with("app.Middle", vec![shape.clone()]))
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(decl.base, shape);
}

#[test]
fn own_generic_parameter_resolves_through_constraint() {
    // Shapes<T> where T : app.Shape, deriving Registry<T>
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let t = b.intern("T");
    let shape = b.tref("app.Shape");
    let root_inst = b.tref_with(ROOT, vec![b.tref("T")]);
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .generic(GenericParam::constrained(t, shape.clone()))
            .base(root_inst)
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(decl.base, shape.clone());
    assert_eq!(decl.constraint_return, Some(shape));
}

#[test]
fn missing_instantiation_is_root_not_found() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    b.add(
        app,
        TypeSpec::class("app", "Shapes").registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    match resolve_first(&graph) {
        Err(diag) => assert_eq!(diag.code, ErrorCode::RootNotFound),
        Ok(_) => panic!("expected RootNotFound"),
    }
}

#[test]
fn explicit_marker_base_rescues_unresolvable_chain() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    b.add(
        app,
        TypeSpec::class("app", "Shapes").registry(RegistryMarker {
            base_type: Some(shape.clone()),
            ..RegistryMarker::default()
        }),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(decl.base, shape);
}

#[test]
fn unsupported_arity_is_reported() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let root_inst = b.tref_with(
        ROOT,
        vec![b.tref("app.A"), b.tref("app.B"), b.tref("app.C")],
    );
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(root_inst)
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    match resolve_first(&graph) {
        Err(diag) => assert_eq!(diag.code, ErrorCode::UnsupportedArity),
        Ok(_) => panic!("expected UnsupportedArity"),
    }
}

#[test]
fn explicit_collection_name_wins() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    let root_inst = b.tref_with(ROOT, vec![shape]);
    let name = b.intern("AllShapes");
    b.add(
        app,
        TypeSpec::class("app", "Shapes")
            .base(root_inst)
            .registry(RegistryMarker {
                collection_name: Some(name),
                ..RegistryMarker::default()
            }),
    );
    let graph = finish(b);

    let decl = match resolve_first(&graph) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(graph.resolve(decl.collection), "AllShapes");
}

#[test]
fn empty_namespace_takes_fallback() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    let shape = b.tref("app.Shape");
    let root_inst = b.tref_with(ROOT, vec![shape]);
    b.add(
        app,
        TypeSpec::class("", "Shapes")
            .base(root_inst)
            .registry(RegistryMarker::default()),
    );
    let graph = finish(b);

    let root = graph.interner().intern(ROOT);
    let fallback = graph.interner().intern("generated");
    let candidates = scan::registry_roots(&graph);
    let decl = match resolve(&graph, root, fallback, candidates[0]) {
        Ok(decl) => decl,
        Err(diag) => panic!("should resolve: {}", diag.message),
    };
    assert_eq!(graph.resolve(decl.namespace), "generated");
}

#[test]
fn cyclic_base_chain_terminates() {
    let mut b = GraphBuilder::new();
    let app = b.module("app");
    b.add(
        app,
        TypeSpec::class("app", "A")
            .base(b.tref("app.B"))
            .registry(RegistryMarker::default()),
    );
    b.add(app, TypeSpec::class("app", "B").base(b.tref("app.A")));
    let graph = finish(b);

    match resolve_first(&graph) {
        Err(diag) => assert_eq!(diag.code, ErrorCode::RootNotFound),
        Ok(_) => panic!("expected RootNotFound"),
    }
}
