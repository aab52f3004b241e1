//! Emission context: indentation-carrying line writer.

use crate::emitter::{Emitter, StringEmitter};

/// Line-oriented writing over a [`StringEmitter`], tracking the current
/// indentation level.
pub struct EmitContext {
    emitter: StringEmitter,
    indent: usize,
}

impl EmitContext {
    pub fn new() -> Self {
        EmitContext {
            emitter: StringEmitter::with_capacity(4 * 1024),
            indent: 0,
        }
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) {
        self.emitter.emit_indent(self.indent);
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }

    /// Write one unindented line (file-header comments).
    pub fn raw_line(&mut self, text: &str) {
        self.emitter.emit(text);
        self.emitter.emit_newline();
    }

    /// Write a blank line.
    pub fn blank(&mut self) {
        self.emitter.emit_newline();
    }

    /// Write a block-opening line and indent subsequent lines.
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedent and write a block-closing line.
    pub fn close(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    /// Finalize: no trailing blank lines, exactly one trailing newline.
    pub fn finish(mut self) -> String {
        self.emitter.trim_trailing_blank_lines();
        self.emitter.ensure_trailing_newline();
        self.emitter.output()
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}
