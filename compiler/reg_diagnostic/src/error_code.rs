//! Stable error codes for searchability and machine consumption.

use std::fmt;

/// Every condition the engine reports, with a stable `E`-prefixed code.
///
/// Codes never change meaning once shipped; retired codes are not reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ErrorCode {
    /// The registry root abstraction was not found in a declaration's
    /// base-type chain.
    RootNotFound,
    /// The root abstraction was found, but with an unsupported generic
    /// arity.
    UnsupportedArity,
    /// A registry discovered zero option types.
    EmptyRegistry,
    /// Two option types resolved to the same display name.
    NameCollision,
    /// An option type has no public constructor.
    NoPublicConstructor,
    /// A constructor parameter's default literal cannot be represented in
    /// generated source.
    MalformedDefault,
    /// Two declarations in the module graph share a fully-qualified name.
    DuplicateType,
    /// A factory-mode option type cannot be constructed without caller
    /// arguments and is left out of the enumeration tables.
    NotEnumerable,
}

impl ErrorCode {
    /// Stable string form (`E0001`).
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::RootNotFound => "E0001",
            ErrorCode::UnsupportedArity => "E0002",
            ErrorCode::EmptyRegistry => "E0003",
            ErrorCode::NameCollision => "E0004",
            ErrorCode::NoPublicConstructor => "E0005",
            ErrorCode::MalformedDefault => "E0006",
            ErrorCode::DuplicateType => "E0007",
            ErrorCode::NotEnumerable => "E0008",
        }
    }

    /// Parse a stable string form back to a code.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "E0001" => Some(ErrorCode::RootNotFound),
            "E0002" => Some(ErrorCode::UnsupportedArity),
            "E0003" => Some(ErrorCode::EmptyRegistry),
            "E0004" => Some(ErrorCode::NameCollision),
            "E0005" => Some(ErrorCode::NoPublicConstructor),
            "E0006" => Some(ErrorCode::MalformedDefault),
            "E0007" => Some(ErrorCode::DuplicateType),
            "E0008" => Some(ErrorCode::NotEnumerable),
            _ => None,
        }
    }

    /// Long-form explanation for `regc explain <code>`.
    pub fn explain(self) -> &'static str {
        match self {
            ErrorCode::RootNotFound => {
                "A type carries a registry-root marker, but walking its base-type \
chain never reached an instantiation of the registry root abstraction \
(`Registry<TBase>` or `Registry<TBase, TReturn>`).

The declaration is skipped; every other registry in the run still \
generates. Check that the declaration derives (directly or transitively) \
from the root abstraction, and that the intermediate base types are part \
of the module graph."
            }
            ErrorCode::UnsupportedArity => {
                "An instantiation of the registry root abstraction was found, but \
with a generic arity other than one or two.

Supported shapes are `Registry<TBase>` (the argument is both the base \
type and the candidate return type) and `Registry<TBase, TReturn>` (the \
first argument is the base type, the second the candidate return type)."
            }
            ErrorCode::EmptyRegistry => {
                "A registry declaration discovered zero concrete option types \
deriving from its base type.

This is not an error: the registry still generates with an empty \
enumeration so call sites compile. If types were expected, check that \
they are concrete (not abstract, not an interface) and that cross-module \
types are only found when the declaration opts into global scope."
            }
            ErrorCode::NameCollision => {
                "Two option types in the same registry resolved to the same display \
name, either from explicit name markers or from identical short type \
names in different namespaces.

The first-discovered type keeps the name; later ones are dropped from \
the registry and reported. Give one of them an explicit display name."
            }
            ErrorCode::NoPublicConstructor => {
                "An option type exposes no public constructor, so neither a \
singleton accessor nor a factory function can be generated for it. The \
type is dropped from the registry."
            }
            ErrorCode::MalformedDefault => {
                "A constructor parameter declares a default literal that cannot be \
rendered into generated source (for example an unterminated string or a \
token that is not a literal).

Emission of the affected registry is aborted; other registries in the \
run are unaffected."
            }
            ErrorCode::DuplicateType => {
                "Two declarations in the module graph share one fully-qualified \
name. Type identity is fully-qualified-name identity, so the graph is \
ambiguous and the run aborts before analysis."
            }
            ErrorCode::NotEnumerable => {
                "A factory-mode option type has no public constructor invocable \
without caller-supplied arguments. Its factory functions are still \
generated, but it does not appear in `all`, `by_id`, or `by_name`."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
