//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Errors raised when building or rendering an element tree.
///
/// Every operation validates before it mutates, so a returned error
/// means the document is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("invalid child: {0}")]
    InvalidChild(String),

    #[error("unknown element: {0:?}")]
    UnknownElement(Index),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for tree operations.
pub type XmlResult<T> = Result<T, XmlError>;
