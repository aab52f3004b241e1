//! Emission errors.

use thiserror::Error;

/// Error aborting emission of one registry model.
///
/// Other models in the same run are unaffected; the driver converts this
/// into a build diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A constructor parameter's default literal cannot be represented in
    /// generated source.
    #[error("default value `{literal}` of parameter `{param}` on `{option_type}` is not a representable literal")]
    MalformedDefault {
        option_type: String,
        param: String,
        literal: String,
    },
}
