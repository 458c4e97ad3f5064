//! Error types for pattern-structure queries and enumeration.

use crate::pattern::Unsupported;

/// Errors surfaced by [`PatternStructure`](crate::PatternStructure) queries
/// and the enumeration entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum PsError {
    /// A query was issued before a successful `fit` call.
    Unfit,
    /// The pattern domain does not support a required algebraic operation.
    Unsupported(Unsupported),
    /// An object name was not part of the fitted collection.
    UnknownObject(String),
    /// A relative minimum support was outside the open interval (0, 1).
    BadMinSupport(f64),
    /// A pattern literal could not be parsed.
    Parse(String),
}

impl std::fmt::Display for PsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PsError::Unfit => {
                write!(f, "the data is unknown: fit the structure before querying it")
            }
            PsError::Unsupported(op) => write!(f, "{}", op),
            PsError::UnknownObject(name) => write!(f, "unknown object: {}", name),
            PsError::BadMinSupport(frac) => {
                write!(f, "relative min_support {} is not within (0, 1)", frac)
            }
            PsError::Parse(msg) => write!(f, "pattern parse error: {}", msg),
        }
    }
}

impl std::error::Error for PsError {}

impl From<Unsupported> for PsError {
    fn from(op: Unsupported) -> Self {
        PsError::Unsupported(op)
    }
}

pub type PsResult<T> = Result<T, PsError>;
