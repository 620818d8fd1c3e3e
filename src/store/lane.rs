use tokio_util::sync::CancellationToken;

use crate::api::RequestFailure;

/// Independent concurrency partitions, each with its own busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    Session,
    Vote,
}

/// Request sequence for one lane. Only the latest issued request may land.
#[derive(Debug, Default)]
pub(crate) struct LaneSeq {
    issued: u64,
}

impl LaneSeq {
    pub(crate) fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub(crate) fn is_current(&self, seq: u64) -> bool {
        seq == self.issued
    }

    /// Makes every request issued so far stale.
    pub(crate) fn invalidate(&mut self) {
        self.issued += 1;
    }
}

/// An issued remote call: its lane, its sequence number, and the token of the
/// flow it belongs to.
#[derive(Debug)]
pub(crate) struct Pending {
    pub(crate) lane: Lane,
    pub(crate) seq: u64,
    pub(crate) cancel: CancellationToken,
}

impl Pending {
    /// Drives `call` unless the flow is cancelled first. `None` means cancelled.
    pub(crate) async fn run<T, F>(&self, call: F) -> Option<Result<T, RequestFailure>>
    where
        F: std::future::Future<Output = Result<T, RequestFailure>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = call => Some(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_sequence_is_current() {
        let mut lane = LaneSeq::default();
        let first = lane.issue();
        let second = lane.issue();
        assert!(!lane.is_current(first));
        assert!(lane.is_current(second));

        lane.invalidate();
        assert!(!lane.is_current(second));
    }

    #[tokio::test]
    async fn cancelled_pending_resolves_without_the_call() {
        let pending = Pending {
            lane: Lane::Vote,
            seq: 1,
            cancel: CancellationToken::new(),
        };
        pending.cancel.cancel();
        let result = pending
            .run(std::future::pending::<Result<(), RequestFailure>>())
            .await;
        assert!(result.is_none());
    }
}
