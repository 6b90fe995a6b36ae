//! # Design
//!
//! - A `ServiceError` means the call never produced an envelope; a backend that
//!   answers `success: false` is not an error at this layer.
//! - Messages stay constant; the failing operation travels as a field.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed source error carried by transport failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias for remote service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures raised before an envelope could be obtained.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or the connection failed.
    #[error("service transport failure")]
    Transport {
        /// Operation that was attempted.
        operation: &'static str,
        /// Underlying transport error.
        source: BoxError,
    },
    /// The response body was not a valid envelope.
    #[error("service response decode failure")]
    Decode {
        /// Operation that was attempted.
        operation: &'static str,
        /// Underlying decode error.
        source: BoxError,
    },
    /// The backend answered with a non-success status and no envelope.
    #[error("service returned unexpected status")]
    Status {
        /// Operation that was attempted.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
    },
    /// The service is not reachable in the current environment.
    #[error("service unavailable")]
    Unavailable {
        /// Operation that was attempted.
        operation: &'static str,
    },
}

impl ServiceError {
    /// Build a transport error from any source error.
    pub fn transport(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            operation,
            source: source.into(),
        }
    }

    /// Build a decode error from any source error.
    pub fn decode(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            operation,
            source: source.into(),
        }
    }

    /// Operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Transport { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Status { operation, .. }
            | Self::Unavailable { operation } => operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn helpers_preserve_operation_and_source() {
        let err = ServiceError::transport("metrics.get_all", io::Error::other("offline"));
        assert_eq!(err.operation(), "metrics.get_all");
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "service transport failure");

        let err = ServiceError::decode("metrics.create", io::Error::other("bad json"));
        assert!(matches!(err, ServiceError::Decode { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn status_and_unavailable_have_no_source() {
        let err = ServiceError::Status {
            operation: "diapers.delete",
            status: 502,
        };
        assert!(err.source().is_none());
        assert_eq!(err.operation(), "diapers.delete");

        let err = ServiceError::Unavailable {
            operation: "journal.notes",
        };
        assert_eq!(err.to_string(), "service unavailable");
    }
}
