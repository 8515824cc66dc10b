//! Unified error type.

use thiserror::Error;

use crate::validate::ContractViolation;

/// The error type returned by chainware's fallible operations.
///
/// Request-time failures (401, 404, 422, etc.) are expressed as
/// [`Response`](crate::Response) or [`Failure`](crate::Failure) values, not as
/// `Error`s. This type surfaces startup problems: a chain whose contracts do
/// not line up, a route the router rejects, or a socket that cannot be bound.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{0}`")]
    Addr(String),

    #[error("endpoint `{path}`: {violation}")]
    Contract {
        path: String,
        #[source]
        violation: ContractViolation,
    },

    #[error("invalid route `{path}`: {source}")]
    Route {
        path: String,
        #[source]
        source: matchit::InsertError,
    },
}

impl Error {
    /// The contract violation behind this error, if that is what it is.
    pub fn violation(&self) -> Option<&ContractViolation> {
        match self {
            Self::Contract { violation, .. } => Some(violation),
            _ => None,
        }
    }
}
