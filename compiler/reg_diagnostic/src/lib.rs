//! Diagnostic system for the regc registry compiler.
//!
//! - Error codes for searchability (`E0001`…, `regc explain`)
//! - Clear messages (what went wrong)
//! - Origins (which declaration it went wrong on — the engine sees a type
//!   graph, not source text, so origins are fully-qualified names rather
//!   than spans)
//! - Notes and help (why, and how to fix)
//!
//! A failed registry declaration is a *diagnostic*, never a run failure:
//! the propagation policy is that one declaration's problems abort that
//! declaration only, and the [`DiagnosticQueue`] is where every
//! independently-processed declaration's reports converge.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{
    duplicate_type, empty_registry, malformed_default, name_collision, no_public_constructor,
    no_usable_constructor, not_enumerable, root_not_found, unsupported_arity, Diagnostic,
    Severity,
};
pub use emitter::{DiagnosticEmitter, JsonEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
