//! CLI command implementations.
//!
//! Exit codes: `0` clean, `1` the run reported error diagnostics, `2`
//! environment failure (unreadable manifest, bad arguments, I/O).

use std::io::Write;
use std::path::{Path, PathBuf};

use reg_diagnostic::{DiagnosticEmitter, ErrorCode, JsonEmitter, TerminalEmitter};
use reg_emit::{Emitter, FileEmitter};

use crate::input::load_manifest;
use crate::{compile, Config, DiagnosticConfig, RunReport};

/// Options for `regc generate`.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Directory generated files are written into.
    pub out_dir: PathBuf,
    /// Engine configuration.
    pub config: Config,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            out_dir: PathBuf::from("generated"),
            config: Config::default(),
        }
    }
}

fn run(manifest: &Path, config: &Config) -> Result<RunReport, i32> {
    match load_manifest(manifest) {
        Ok(graph) => Ok(compile(&graph, config, DiagnosticConfig::default())),
        Err(err) => {
            eprintln!("error: {err}");
            Err(2)
        }
    }
}

fn report_to_terminal(report: &RunReport) {
    let stderr = std::io::stderr();
    let mut emitter = TerminalEmitter::new(stderr.lock());
    emitter.emit_all(&report.diagnostics);
    emitter.emit_summary(report.error_count, report.warning_count);
}

/// `regc generate <manifest> [-o <dir>]` — write generated registries.
///
/// Unchanged files are left untouched so downstream build caching sees
/// stable timestamps.
pub fn generate(manifest: &Path, options: &GenerateOptions) -> i32 {
    let report = match run(manifest, &options.config) {
        Ok(report) => report,
        Err(code) => return code,
    };

    if let Err(err) = std::fs::create_dir_all(&options.out_dir) {
        eprintln!("error: cannot create `{}`: {err}", options.out_dir.display());
        return 2;
    }

    let mut written = 0usize;
    let mut unchanged = 0usize;
    for artifact in &report.generated {
        let path = options.out_dir.join(&artifact.file_name);
        let existing = std::fs::read_to_string(&path).ok();
        if existing.as_deref() == Some(artifact.source.as_str()) {
            unchanged += 1;
            continue;
        }
        match FileEmitter::create(&path) {
            Ok(mut emitter) => {
                emitter.emit(&artifact.source);
                if let Err(err) = emitter.flush() {
                    eprintln!("error: cannot write `{}`: {err}", path.display());
                    return 2;
                }
                written += 1;
            }
            Err(err) => {
                eprintln!("error: cannot write `{}`: {err}", path.display());
                return 2;
            }
        }
    }

    report_to_terminal(&report);
    println!(
        "generated {} registr{} ({unchanged} unchanged)",
        written,
        if written == 1 { "y" } else { "ies" }
    );

    i32::from(report.has_errors())
}

/// `regc check <manifest> [--json]` — diagnostics only, no output files.
pub fn check(manifest: &Path, config: &Config, json: bool) -> i32 {
    let report = match run(manifest, config) {
        Ok(report) => report,
        Err(code) => return code,
    };

    if json {
        let stdout = std::io::stdout();
        let mut emitter = JsonEmitter::new(stdout.lock());
        emitter.emit_all(&report.diagnostics);
    } else {
        report_to_terminal(&report);
        println!(
            "checked {} registr{}",
            report.generated.len(),
            if report.generated.len() == 1 { "y" } else { "ies" }
        );
    }

    i32::from(report.has_errors())
}

/// `regc explain <code>` — long-form documentation for an error code.
pub fn explain(code: &str) -> i32 {
    match ErrorCode::from_code(code) {
        Some(code) => {
            println!("{code}: {}", code.explain());
            0
        }
        None => {
            eprintln!("error: unknown error code `{code}`");
            let _ = writeln!(
                std::io::stderr(),
                "codes range from E0001 to E0008; see `regc check` output"
            );
            2
        }
    }
}
