//! Analysis passes for the regc registry compiler.
//!
//! This crate turns a read-only [`reg_graph::ModuleGraph`] into immutable
//! [`reg_graph::RegistryModel`]s, one per registry declaration:
//!
//! ```text
//! Module graph → Scan → Base/arity resolve → Option scan
//!              → Extract → Return-type resolve → Assemble → RegistryModel
//! ```
//!
//! Each declaration is processed independently from the shared read-only
//! graph; a declaration that cannot be resolved is skipped with
//! diagnostics while every other declaration proceeds. Nothing here
//! performs I/O, and every pass is deterministic, so a host may fan
//! declarations out across threads without synchronization.

mod assemble;
mod base;
mod decl;
mod extract;
mod options;
mod returns;
mod scan;
mod validate;

pub use decl::{Candidate, OptionSite, RegistryDeclaration, ValueMeta};
pub use validate::validate;

use reg_diagnostic::Diagnostic;
use reg_graph::{ModuleGraph, Name, RegistryModel, StringLookup};

/// Engine configuration supplied by the host pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Fully-qualified name of the registry root abstraction.
    pub root_abstraction: String,
    /// Namespace used when a declaration's own namespace cannot be
    /// determined.
    pub fallback_namespace: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_abstraction: "registry.Registry".to_owned(),
            fallback_namespace: None,
        }
    }
}

/// Result of analyzing one registry declaration.
///
/// `model` is `None` when the declaration could not be resolved; the
/// diagnostics say why. A resolved declaration always carries a model,
/// even an empty one.
#[derive(Clone, Debug)]
pub struct AnalysisOutcome {
    pub model: Option<RegistryModel>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The analysis pipeline for one module graph.
///
/// Construction interns the configuration once; [`Analyzer::scan`] finds
/// the declarations and [`Analyzer::analyze`] runs the remaining passes
/// for one of them. Both take `&self`: the analyzer is freely shared
/// across threads.
pub struct Analyzer<'g> {
    graph: &'g ModuleGraph,
    root: Name,
    fallback_namespace: Name,
}

impl<'g> Analyzer<'g> {
    /// Create an analyzer for one graph and configuration.
    pub fn new(graph: &'g ModuleGraph, config: &Config) -> Self {
        let root = graph.interner().intern(&config.root_abstraction);
        let fallback_namespace = config
            .fallback_namespace
            .as_deref()
            .map_or(Name::EMPTY, |ns| graph.interner().intern(ns));
        Analyzer {
            graph,
            root,
            fallback_namespace,
        }
    }

    /// The graph this analyzer reads.
    pub fn graph(&self) -> &'g ModuleGraph {
        self.graph
    }

    /// Find every registry declaration in the graph.
    pub fn scan(&self) -> Vec<Candidate> {
        scan::registry_roots(self.graph)
    }

    /// Run the full pipeline for one scanned candidate.
    pub fn analyze(&self, candidate: Candidate) -> AnalysisOutcome {
        let span = tracing::debug_span!(
            "analyze",
            declaration = %self.graph.resolve(self.graph.descriptor(candidate.loc).fqn)
        );
        let _guard = span.enter();

        let decl = match base::resolve(self.graph, self.root, self.fallback_namespace, candidate) {
            Ok(decl) => decl,
            Err(diagnostic) => {
                return AnalysisOutcome {
                    model: None,
                    diagnostics: vec![diagnostic],
                };
            }
        };

        let sites = options::collect(self.graph, &decl);
        let values: Vec<ValueMeta> = sites
            .into_iter()
            .map(|site| extract::value_meta(self.graph, site))
            .collect();
        let lookups = extract::lookup_methods(self.graph, &decl.base);
        let return_type = returns::resolve(&decl, &values);
        let (model, diagnostics) = assemble::assemble(
            self.graph,
            &decl,
            values,
            lookups,
            return_type,
        );

        if cfg!(debug_assertions) {
            validate::validate(&model);
        }

        AnalysisOutcome {
            model: Some(model),
            diagnostics,
        }
    }
}
