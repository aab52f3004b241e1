//! Debug-mode validation of registry model invariants.
//!
//! Walks an assembled model and asserts the invariants the emitter relies
//! on:
//! - the resolved return type is present (resolution is total)
//! - value descriptors are sorted by their ordering key
//! - display names are unique
//! - every value kept under singleton mode has a usable construction path
//!   unless it is factory-only
//! - every recorded default-constructor index is in bounds and points at a
//!   default-constructible signature
//!
//! These checks run only in debug builds (`debug_assert!`). They catch
//! assembly bugs before the emitter renders invalid output.

use reg_graph::{AccessMode, RegistryModel};

/// Validate that a `RegistryModel` satisfies all assembly invariants.
///
/// Panics in debug builds with a descriptive message if any invariant is
/// violated; does nothing in release builds.
pub fn validate(model: &RegistryModel) {
    debug_assert!(
        !model.return_type.name.is_empty(),
        "return type resolution must be total"
    );

    debug_assert!(
        model.values.windows(2).all(|w| w[0].order <= w[1].order),
        "value descriptors must be sorted by ordering key"
    );

    for (i, value) in model.values.iter().enumerate() {
        debug_assert!(
            model.values[i + 1..].iter().all(|v| v.display != value.display),
            "display names must be unique after assembly"
        );

        if let Some(ctor) = value.default_ctor {
            debug_assert!(
                ctor < value.constructors.len(),
                "default constructor index out of bounds"
            );
            debug_assert!(
                value.constructors[ctor].is_default_constructible(),
                "default constructor must be invocable without arguments"
            );
        } else {
            debug_assert!(
                model.mode == AccessMode::Factory || value.force_factory,
                "singleton values must have a default construction path"
            );
        }

        debug_assert!(
            !value.constructors.is_empty(),
            "constructorless values must be dropped during assembly"
        );
    }
}
