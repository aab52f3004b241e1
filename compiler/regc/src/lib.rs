//! The regc registry compiler.
//!
//! Given a module graph — every type declaration visible to one build,
//! dependency-ordered with the local module first — regc discovers
//! registry declarations, resolves their base types and metadata, and
//! emits one deterministic generated source artifact per registry.
//!
//! # Pipeline
//!
//! ```text
//! manifest.json → ModuleGraph → scan → (analyze → emit) per declaration
//!              → RunReport { generated artifacts, diagnostics }
//! ```
//!
//! Declarations are processed in parallel: every pass after graph
//! construction reads shared immutable state, so the fan-out needs no
//! synchronization. Outputs are re-sorted by file name and diagnostics
//! funneled through one queue, so the report is identical however the
//! scheduler interleaves.

pub mod commands;
pub mod input;

pub use reg_analyze::Config;
pub use reg_diagnostic::{Diagnostic, DiagnosticConfig, ErrorCode, Severity};
pub use reg_graph::{GeneratedRegistry, ModuleGraph};

use rayon::prelude::*;

use reg_analyze::Analyzer;
use reg_diagnostic::{malformed_default, DiagnosticQueue};
use reg_emit::EmitError;

/// Everything one engine run produced.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Generated artifacts, sorted by file name.
    pub generated: Vec<GeneratedRegistry>,
    /// Diagnostics in deterministic order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl RunReport {
    /// Whether the run reported any errors.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Run the full engine over one module graph.
///
/// Each registry declaration resolves and emits independently; one
/// declaration's failure never blocks the rest. The report is
/// deterministic for identical inputs.
pub fn compile(
    graph: &ModuleGraph,
    config: &Config,
    diagnostics: DiagnosticConfig,
) -> RunReport {
    let analyzer = Analyzer::new(graph, config);
    let candidates = analyzer.scan();
    tracing::info!(declarations = candidates.len(), "compiling registries");

    let results: Vec<(Option<GeneratedRegistry>, Vec<Diagnostic>)> = candidates
        .par_iter()
        .map(|&candidate| {
            let outcome = analyzer.analyze(candidate);
            let mut diags = outcome.diagnostics;
            let generated = outcome.model.and_then(|model| {
                match reg_emit::emit(&model, graph) {
                    Ok(generated) => Some(generated),
                    Err(err) => {
                        diags.push(emit_diagnostic(&err));
                        None
                    }
                }
            });
            (generated, diags)
        })
        .collect();

    let mut queue = DiagnosticQueue::with_config(diagnostics);
    let mut generated = Vec::new();
    for (artifact, diags) in results {
        queue.extend(diags);
        if let Some(artifact) = artifact {
            generated.push(artifact);
        }
    }
    generated.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    RunReport {
        generated,
        error_count: queue.error_count(),
        warning_count: queue.warning_count(),
        diagnostics: queue.flush(),
    }
}

fn emit_diagnostic(err: &EmitError) -> Diagnostic {
    match err {
        EmitError::MalformedDefault {
            option_type,
            param,
            literal,
        } => malformed_default(option_type, param, literal),
    }
}
