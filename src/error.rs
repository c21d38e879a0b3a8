use std::fmt;

use thiserror::Error;

/// Top-level error type for the Monte Carlo geometry compiler.
#[derive(Debug, Error)]
pub enum McGeomError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("failed to serialize catalog: {0}")]
    Serialize(serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Fatal errors in the reactor geometry description.
///
/// Any of these aborts the build; no partial catalog is returned.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("unit '{unit}' has kind '{kind}', expected one of Pin, Assembly, Core")]
    UnsupportedRootKind { unit: String, kind: String },

    #[error("unit '{0}' does not exist in the geometry graph")]
    UnknownUnit(String),

    #[error("unit '{unit}' is missing required property '{key}'")]
    MissingProperty { key: String, unit: String },

    #[error("unit '{unit}' has invalid property '{key}': {reason}")]
    InvalidProperty {
        key: String,
        unit: String,
        reason: String,
    },

    #[error("unit '{unit}' declares '{key}' inconsistently with the rest of the build")]
    InconsistentDeclaration { key: String, unit: String },

    #[error("unit name '{0}' is emitted more than once")]
    DuplicateUnit(String),

    #[error("unit '{unit}' references '{reference}', which is not in the catalog")]
    DanglingReference { unit: String, reference: String },
}

impl ConfigurationError {
    pub(crate) fn invalid(key: &str, unit: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            key: key.into(),
            unit: unit.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by a property store lookup.
#[derive(Debug, Error, PartialEq)]
pub enum PropertyError {
    #[error("property '{key}' not found on unit '{unit}'")]
    NotFound { key: String, unit: String },

    #[error("property '{key}' on unit '{unit}' is not a {expected}")]
    WrongType {
        key: String,
        unit: String,
        expected: &'static str,
    },
}

impl From<PropertyError> for ConfigurationError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NotFound { key, unit } => Self::MissingProperty { key, unit },
            PropertyError::WrongType {
                key,
                unit,
                expected,
            } => Self::InvalidProperty {
                key,
                unit,
                reason: format!("expected {expected}"),
            },
        }
    }
}

/// Errors related to geometry graph construction.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("node not found: {0}")]
    UnknownNode(String),

    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    #[error("connecting '{input}' into '{consumer}' would create a cycle")]
    Cycle { input: String, consumer: String },

    #[error("nodes on a cycle cannot be ordered: {}", .0.join(", "))]
    Unordered(Vec<String>),
}

/// Errors related to CSG primitive construction.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("surface not found: {0}")]
    SurfaceNotFound(String),
}

/// Errors related to loading a geometry document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed geometry document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unit '{unit}' lists unknown input '{input}'")]
    UnknownInput { unit: String, input: String },
}

/// Non-fatal diagnostics recorded while building a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildWarning {
    /// Lattice elements declare more than one pitch; the maximum was used.
    PitchConflict { unit: String, distinct: usize },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PitchConflict { unit, distinct } => write!(
                f,
                "lattice '{unit}' mixes {distinct} distinct element pitches, using the largest"
            ),
        }
    }
}

/// Convenience type alias for results using [`McGeomError`].
pub type Result<T> = std::result::Result<T, McGeomError>;
