//! Emission director.
//!
//! The director half of the builder/director pair: sequences fragment
//! rendering for one registry model into one generated source artifact.
//! Emission proceeds through an explicit state machine:
//!
//! ```text
//! Idle → Rendering → Assembled → Emitted
//! ```
//!
//! There are no retries. A rendering error aborts emission for that one
//! model and returns the director to `Idle`; other models in the run are
//! unaffected.

use heck::ToSnakeCase;

use reg_graph::{GeneratedRegistry, RegistryModel, StringLookup};

use crate::error::EmitError;
use crate::fragments::FragmentBuilder;

/// Emission progress for one model.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum EmitState {
    /// No emission in progress.
    #[default]
    Idle,
    /// Fragments are being rendered.
    Rendering,
    /// All fragments rendered, output being finalized.
    Assembled,
    /// The artifact has been produced.
    Emitted,
}

/// Sequences fragment assembly per registry model.
#[derive(Debug, Default)]
pub struct Director {
    state: EmitState,
}

impl Director {
    pub fn new() -> Self {
        Director {
            state: EmitState::Idle,
        }
    }

    /// Current emission state.
    pub fn state(&self) -> EmitState {
        self.state
    }

    /// Emit one registry model as a generated source artifact.
    ///
    /// Deterministic: identical models yield byte-identical output. The
    /// file name derives from the collection name.
    pub fn emit(
        &mut self,
        model: &RegistryModel,
        names: &dyn StringLookup,
    ) -> Result<GeneratedRegistry, EmitError> {
        self.state = EmitState::Rendering;

        let result = render(model, names);
        let source = match result {
            Ok(source) => source,
            Err(err) => {
                self.state = EmitState::Idle;
                return Err(err);
            }
        };
        self.state = EmitState::Assembled;

        let file_name = format!("{}.rs", names.resolve(model.collection).to_snake_case());
        self.state = EmitState::Emitted;

        Ok(GeneratedRegistry { file_name, source })
    }
}

fn render(model: &RegistryModel, names: &dyn StringLookup) -> Result<String, EmitError> {
    let mut builder = FragmentBuilder::new(model, names);
    builder.header();
    builder.module_open();
    builder.tables();
    builder.accessors()?;
    builder.enumeration()?;
    builder.lookup_methods();
    builder.module_close();
    Ok(builder.finish())
}
