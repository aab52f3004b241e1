//! Colored, human-readable diagnostic output.

use std::io::Write;

use crate::{Diagnostic, Severity};

use super::DiagnosticEmitter;

const RED: &str = "\x1b[31;1m";
const YELLOW: &str = "\x1b[33;1m";
const CYAN: &str = "\x1b[36;1m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Terminal emitter writing `error[E0004]: ...` style reports.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create an emitter with color enabled.
    pub fn new(writer: W) -> Self {
        TerminalEmitter {
            writer,
            color: true,
        }
    }

    /// Enable or disable ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        if !self.color {
            return "";
        }
        match severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
            Severity::Note => CYAN,
        }
    }

    fn bold(&self) -> &'static str {
        if self.color {
            BOLD
        } else {
            ""
        }
    }

    fn reset(&self) -> &'static str {
        if self.color {
            RESET
        } else {
            ""
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let color = self.severity_color(diagnostic.severity);
        let bold = self.bold();
        let reset = self.reset();

        // error[E0004]: duplicate display name `Circle`
        let _ = writeln!(
            self.writer,
            "{color}{}[{}]{reset}{bold}: {}{reset}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        );

        //   --> app.shapes.Rounded
        if let Some(origin) = &diagnostic.origin {
            let _ = writeln!(self.writer, "  --> {origin}");
        }

        for note in &diagnostic.notes {
            let _ = writeln!(self.writer, "   = note: {note}");
        }
        if let Some(help) = &diagnostic.help {
            let _ = writeln!(self.writer, "   = help: {help}");
        }
        let _ = writeln!(self.writer);
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        let color = if error_count > 0 {
            self.severity_color(Severity::Error)
        } else {
            self.severity_color(Severity::Warning)
        };
        let reset = self.reset();

        let errors = plural(error_count, "error");
        let warnings = plural(warning_count, "warning");
        let summary = match (error_count, warning_count) {
            (0, _) => warnings,
            (_, 0) => errors,
            _ => format!("{errors}; {warnings}"),
        };
        let _ = writeln!(self.writer, "{color}{summary}{reset}");
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
