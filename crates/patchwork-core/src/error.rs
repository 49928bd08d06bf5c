//! Error types for domain construction and strategy parsing.

use std::error::Error;
use std::fmt;

/// Errors arising from constructing index domains or parsing strategies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// An interval whose `last` lies more than one below its `first`.
    InvalidInterval {
        /// Requested first index.
        first: i64,
        /// Requested last index.
        last: i64,
    },
    /// A strided range was given a stride of zero.
    ZeroStride,
    /// A delete-method code or name that does not name a known strategy.
    UnknownDeleteMethod {
        /// The unrecognised code or name, as given.
        value: String,
    },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInterval { first, last } => {
                write!(
                    f,
                    "invalid interval [{first}..={last}]: last must be >= first - 1"
                )
            }
            Self::ZeroStride => write!(f, "range stride must be non-zero"),
            Self::UnknownDeleteMethod { value } => {
                write!(f, "unknown delete method '{value}'")
            }
        }
    }
}

impl Error for DomainError {}
