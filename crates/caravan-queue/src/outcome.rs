use caravan_protocol::RejectReason;
use caravan_types::RecordId;

/// A record the gateway refused within an otherwise processed batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRecord {
    pub id: RecordId,
    pub reason: Option<RejectReason>,
}

/// What a `sync_now` attempt did.
///
/// Transport failures are values here, not errors: the caller's user-facing
/// story is "sync failed, data safe locally", never an unhandled fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing was pending; no network call was made.
    NothingPending,
    /// The batch was processed; acknowledgments were applied per record.
    Completed {
        accepted: usize,
        rejected: Vec<RejectedRecord>,
    },
    /// The gateway was unreachable or refused the batch; every record is
    /// still PENDING and unmodified.
    TransportFailed { reason: String },
}

impl SyncOutcome {
    /// Returns `true` unless the transport failed.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::TransportFailed { .. })
    }

    /// Returns `true` if every record in the round was acknowledged.
    pub fn fully_acknowledged(&self) -> bool {
        match self {
            Self::NothingPending => true,
            Self::Completed { rejected, .. } => rejected.is_empty(),
            Self::TransportFailed { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pending_is_success() {
        assert!(SyncOutcome::NothingPending.is_success());
        assert!(SyncOutcome::NothingPending.fully_acknowledged());
    }

    #[test]
    fn transport_failure_is_not_success() {
        let outcome = SyncOutcome::TransportFailed {
            reason: "connection refused".into(),
        };
        assert!(!outcome.is_success());
        assert!(!outcome.fully_acknowledged());
    }

    #[test]
    fn partial_batch_is_success_but_not_fully_acked() {
        let outcome = SyncOutcome::Completed {
            accepted: 2,
            rejected: vec![RejectedRecord {
                id: RecordId::new(),
                reason: Some(RejectReason::InvalidRecord),
            }],
        };
        assert!(outcome.is_success());
        assert!(!outcome.fully_acknowledged());
    }
}
