//! Outcome reporting shared by every sync controller.

use bloom_api_models::ApiEnvelope;
use bloom_tools_core::{ServiceError, ServiceResult};

/// What happened to a remote call issued by a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The backend accepted the call and local state was reconciled.
    Applied,
    /// The backend answered `success: false`.
    Rejected,
    /// The call never produced an envelope.
    Failed,
    /// The owner unmounted before the result arrived; state was left untouched.
    Discarded,
    /// Nothing was sent (missing identifier, invalid input).
    Skipped,
}

impl SyncOutcome {
    /// Whether local state now reflects the remote change.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Remote reply split along the error taxonomy controllers act on.
#[derive(Debug)]
pub enum Reply<T> {
    /// `success: true`, with whatever payload came back.
    Accepted(Option<T>),
    /// `success: false`, with the backend message if any.
    Rejected(Option<String>),
    /// No envelope was obtained.
    Failed(ServiceError),
}

impl<T> Reply<T> {
    /// Outcome reported when the reply is applied as-is.
    #[must_use]
    pub const fn outcome(&self) -> SyncOutcome {
        match self {
            Self::Accepted(_) => SyncOutcome::Applied,
            Self::Rejected(_) => SyncOutcome::Rejected,
            Self::Failed(_) => SyncOutcome::Failed,
        }
    }
}

impl<T> From<ServiceResult<ApiEnvelope<T>>> for Reply<T> {
    fn from(result: ServiceResult<ApiEnvelope<T>>) -> Self {
        match result {
            Ok(envelope) if envelope.success => Self::Accepted(envelope.data),
            Ok(envelope) => Self::Rejected(envelope.error),
            Err(err) => Self::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_applied_counts_as_applied() {
        assert!(SyncOutcome::Applied.is_applied());
        for outcome in [
            SyncOutcome::Rejected,
            SyncOutcome::Failed,
            SyncOutcome::Discarded,
            SyncOutcome::Skipped,
        ] {
            assert!(!outcome.is_applied());
        }
    }

    #[test]
    fn replies_follow_the_envelope() {
        let accepted: Reply<u8> = Reply::from(Ok(ApiEnvelope::ok(1)));
        assert!(matches!(accepted, Reply::Accepted(Some(1))));
        assert_eq!(accepted.outcome(), SyncOutcome::Applied);

        let rejected: Reply<u8> =
            Reply::from(Ok(ApiEnvelope::failure(Some("Metric not found".into()))));
        assert!(matches!(&rejected, Reply::Rejected(Some(message)) if message == "Metric not found"));
        assert_eq!(rejected.outcome(), SyncOutcome::Rejected);

        let failed: Reply<u8> = Reply::from(Err(ServiceError::Unavailable {
            operation: "diapers.list",
        }));
        assert_eq!(failed.outcome(), SyncOutcome::Failed);
    }
}
