//! Errors returned by [`Encoder`](crate::Encoder) operations.

use crate::connector::EncoderId;
use crate::validate::InvalidParameter;

/// Failure of an encoder operation.
///
/// `E` is the connector's own error type; connector failures are passed
/// through untouched in [`TsplError::Connector`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum TsplError<E> {
    /// A numeric parameter was out of range. Nothing was written.
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameter),

    /// The connector is already bound to a different encoder.
    #[error("connector is already bound to {owner}")]
    AlreadyBound {
        /// The encoder that currently owns the connector.
        owner: EncoderId,
    },

    /// The connector failed to write or finalize.
    #[error(transparent)]
    Connector(E),
}

impl<E> TsplError<E> {
    /// Returns `true` for errors caused by the caller's arguments
    /// (as opposed to the connector).
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            TsplError::InvalidParameter(_) | TsplError::AlreadyBound { .. }
        )
    }

    /// The range violation, if this is one.
    pub fn as_invalid_parameter(&self) -> Option<&InvalidParameter> {
        match self {
            TsplError::InvalidParameter(e) => Some(e),
            _ => None,
        }
    }
}
