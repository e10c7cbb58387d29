//! Error type for numeric operations

use thiserror::Error;

use crate::value::Kind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An operand was not an integer or a float. `kind` is what it was instead.
    #[error("Input to add should be either integers or floats")]
    InvalidArgument { kind: Kind },
}

impl Error {
    pub fn invalid_argument(kind: Kind) -> Self {
        Error::InvalidArgument { kind }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }

    /// Kind of the operand that was rejected.
    pub fn kind(&self) -> Kind {
        match self {
            Error::InvalidArgument { kind } => *kind,
        }
    }
}
