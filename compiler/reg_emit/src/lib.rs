//! Deterministic code emission for the regc registry compiler.
//!
//! # Architecture
//!
//! A builder/director pair renders one [`reg_graph::RegistryModel`] into
//! one generated Rust source artifact:
//!
//! - the fragment builder renders atomic fragments (header, count/name
//!   tables, singleton accessors or factory functions, enumeration,
//!   keyed-lookup methods)
//! - the [`Director`] sequences them through the `Idle → Rendering →
//!   Assembled → Emitted` state machine
//!
//! Output is byte-deterministic: value order was fixed at assembly time,
//! every table renders from that order, and the finalizer normalizes
//! trailing whitespace. Identical models produce identical artifacts,
//! which is what lets the host build cache skip unchanged output.
//!
//! # Modules
//!
//! - [`emitter`]: output abstraction for string and file output
//! - `context`: indentation-carrying line writer
//! - `fragments`: atomic fragment rendering
//! - `director`: fragment sequencing and the emission state machine
//! - `literal`: default-literal validation and rendering

mod context;
mod director;
pub mod emitter;
mod error;
mod fragments;
mod literal;

pub use director::{Director, EmitState};
pub use emitter::{Emitter, FileEmitter, StringEmitter};
pub use error::EmitError;

use reg_graph::{GeneratedRegistry, RegistryModel, StringLookup};

/// Emit one registry model with a fresh director.
///
/// Convenience for hosts that do not care about observing emission state.
pub fn emit(
    model: &RegistryModel,
    names: &dyn StringLookup,
) -> Result<GeneratedRegistry, EmitError> {
    Director::new().emit(model, names)
}
