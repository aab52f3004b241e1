//! Machine-readable JSON diagnostic output.
//!
//! Hand-rendered: the output shape is a stable tooling contract and the
//! renderer is a dozen lines, not worth a serialization dependency here.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

/// JSON emitter: one object per diagnostic, `emit_all` wraps them in an
/// array.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter { writer }
    }

    fn write_object(&mut self, diagnostic: &Diagnostic) {
        let _ = write!(
            self.writer,
            "{{\"severity\":\"{}\",\"code\":\"{}\",\"message\":\"{}\"",
            diagnostic.severity,
            diagnostic.code,
            escape_json(&diagnostic.message)
        );
        if let Some(origin) = &diagnostic.origin {
            let _ = write!(self.writer, ",\"origin\":\"{}\"", escape_json(origin));
        }
        if !diagnostic.notes.is_empty() {
            let _ = write!(self.writer, ",\"notes\":[");
            let total = diagnostic.notes.len();
            for (i, note) in diagnostic.notes.iter().enumerate() {
                let _ = write!(
                    self.writer,
                    "\"{}\"{}",
                    escape_json(note),
                    trailing_comma(i, total)
                );
            }
            let _ = write!(self.writer, "]");
        }
        if let Some(help) = &diagnostic.help {
            let _ = write!(self.writer, ",\"help\":\"{}\"", escape_json(help));
        }
        let _ = write!(self.writer, "}}");
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_object(diagnostic);
        let _ = writeln!(self.writer);
    }

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        let _ = write!(self.writer, "[");
        let total = diagnostics.len();
        for (i, diag) in diagnostics.iter().enumerate() {
            self.write_object(diag);
            let _ = write!(self.writer, "{}", trailing_comma(i, total));
        }
        let _ = writeln!(self.writer, "]");
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let _ = writeln!(
            self.writer,
            "{{\"errors\":{error_count},\"warnings\":{warning_count}}}"
        );
    }
}
