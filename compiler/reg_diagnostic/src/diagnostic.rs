//! Diagnostic values: severity, message, origin, notes, help.

use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// One reported condition.
///
/// The engine analyzes a type graph, not source text, so diagnostics carry
/// an *origin* — the fully-qualified name of the declaration or option type
/// they concern — instead of a source span.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Stable error code.
    pub code: ErrorCode,
    /// What went wrong.
    pub message: String,
    /// Fully-qualified name of the declaration this concerns.
    pub origin: Option<String>,
    /// Context notes.
    pub notes: Vec<String>,
    /// How to fix it.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(severity: Severity, code: ErrorCode, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            code,
            message: message.into(),
            origin: None,
            notes: Vec::new(),
            help: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    /// Create a note diagnostic.
    pub fn note(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, code, message)
    }

    /// Attach the originating declaration.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Attach a context note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attach a fix suggestion.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The root abstraction was not found in a declaration's base chain.
pub fn root_not_found(declaration: &str, root_abstraction: &str) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::RootNotFound,
        format!("`{declaration}` is marked as a registry but never derives `{root_abstraction}`"),
    )
    .with_origin(declaration)
    .with_help(format!(
        "derive from `{root_abstraction}<TBase>` or `{root_abstraction}<TBase, TReturn>`"
    ))
}

/// The root abstraction was instantiated with an unsupported arity.
pub fn unsupported_arity(declaration: &str, root_abstraction: &str, arity: usize) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::UnsupportedArity,
        format!("`{declaration}` instantiates `{root_abstraction}` with {arity} generic arguments"),
    )
    .with_origin(declaration)
    .with_note("supported shapes take one or two generic arguments".to_owned())
}

/// A registry discovered zero option types.
pub fn empty_registry(declaration: &str, base: &str) -> Diagnostic {
    Diagnostic::warning(
        ErrorCode::EmptyRegistry,
        format!("no concrete types deriving `{base}` were discovered"),
    )
    .with_origin(declaration)
    .with_note("the registry is generated with an empty enumeration".to_owned())
}

/// Two option types resolved to the same display name.
pub fn name_collision(display: &str, first: &str, duplicate: &str) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::NameCollision,
        format!("display name `{display}` is already taken by `{first}`"),
    )
    .with_origin(duplicate)
    .with_help("give one of the types an explicit display name".to_owned())
}

/// An option type has no public constructor.
pub fn no_public_constructor(option_type: &str) -> Diagnostic {
    Diagnostic::warning(
        ErrorCode::NoPublicConstructor,
        format!("`{option_type}` has no public constructor and was dropped"),
    )
    .with_origin(option_type)
}

/// An option type cannot satisfy a singleton registry's construction
/// convention.
pub fn no_usable_constructor(option_type: &str) -> Diagnostic {
    Diagnostic::warning(
        ErrorCode::NoPublicConstructor,
        format!(
            "`{option_type}` has no constructor invocable without arguments and was \
dropped from the singleton registry"
        ),
    )
    .with_origin(option_type)
    .with_help("add a parameterless constructor or mark the type factory-only".to_owned())
}

/// A default literal cannot be rendered into generated source.
pub fn malformed_default(option_type: &str, param: &str, literal: &str) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::MalformedDefault,
        format!("default value `{literal}` of parameter `{param}` is not a representable literal"),
    )
    .with_origin(option_type)
}

/// Two declarations share a fully-qualified name.
pub fn duplicate_type(fqn: &str) -> Diagnostic {
    Diagnostic::error(
        ErrorCode::DuplicateType,
        format!("duplicate type definition `{fqn}`"),
    )
    .with_origin(fqn)
}

/// A factory-mode option type is excluded from enumeration.
pub fn not_enumerable(option_type: &str) -> Diagnostic {
    Diagnostic::note(
        ErrorCode::NotEnumerable,
        format!("`{option_type}` needs caller-supplied arguments and is left out of enumeration"),
    )
    .with_origin(option_type)
}
