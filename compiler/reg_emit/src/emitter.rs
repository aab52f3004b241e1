//! Output emitters.
//!
//! Abstraction for output production during rendering. Supports string
//! building for in-memory emission and buffered streaming for file output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for emitting generated output.
///
/// The fragment builder writes to an emitter during rendering. Different
/// implementations support in-memory strings or file output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation (4 spaces per level).
    fn emit_indent(&mut self, level: usize);
}

/// String-based emitter for in-memory emission.
///
/// This is the primary emitter: generated registries are built in memory
/// so the host can compare them against existing output before touching
/// the filesystem.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    /// Create a new string emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the emitted output.
    pub fn output(self) -> String {
        self.buffer
    }

    /// Get the current buffer contents without consuming.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Ensure the output ends with a single newline.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    /// Remove trailing blank lines, leaving content followed by one
    /// newline.
    pub fn trim_trailing_blank_lines(&mut self) {
        while self.buffer.ends_with("\n\n") || self.buffer.ends_with(" \n") {
            self.buffer.pop();
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * 4 {
            self.buffer.push(' ');
        }
    }
}

/// File-based emitter streaming through a buffered writer.
pub struct FileEmitter {
    writer: BufWriter<File>,
}

impl FileEmitter {
    /// Create a new file emitter, truncating any existing file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Flush buffered output to disk.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, text: &str) {
        let _ = self.writer.write_all(text.as_bytes());
    }

    fn emit_newline(&mut self) {
        let _ = self.writer.write_all(b"\n");
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            let _ = self.writer.write_all(b"    ");
        }
    }
}
