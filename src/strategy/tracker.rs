/// Lifecycle of one strategy run.
///
/// `Complete` is terminal and reached exactly once. Reaching it before all
/// input is consumed is impossible by construction: the completion equality
/// is only evaluated once the total is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPhase {
    Submitting,
    Draining,
    Complete,
}

/// Counts records handed to the transport versus records acknowledged.
///
/// Owned by exactly one task per run (the pool aggregator, the buffered
/// strategy's ack consumer); all concurrent completions funnel into that
/// owner through a channel, so the counters themselves are never shared.
#[derive(Debug)]
pub struct CompletionTracker {
    sent: u64,
    acknowledged: u64,
    total: Option<u64>,
    phase: DeliveryPhase,
}

impl CompletionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: 0,
            acknowledged: 0,
            total: None,
            phase: DeliveryPhase::Submitting,
        }
    }

    /// Records one record handed to the transport. Only meaningful while
    /// submitting; later calls are ignored.
    pub fn record_sent(&mut self) {
        if matches!(self.phase, DeliveryPhase::Submitting) {
            self.sent = self.sent.saturating_add(1);
        }
    }

    /// Fixes the total at the current sent count, ending the submission
    /// phase. With every record already acknowledged (including the
    /// zero-record run) this transitions straight to `Complete`.
    pub fn finalize_total(&mut self) {
        if matches!(self.phase, DeliveryPhase::Submitting) {
            self.total = Some(self.sent);
            self.phase = if self.acknowledged == self.sent {
                DeliveryPhase::Complete
            } else {
                DeliveryPhase::Draining
            };
        }
    }

    /// Adds an acknowledgment batch. Returns `true` exactly once, on the
    /// call that transitions the run to `Complete`; acknowledgments can
    /// never exceed the sent count.
    pub fn record_acked(&mut self, records: u64) -> bool {
        if matches!(self.phase, DeliveryPhase::Complete) {
            return false;
        }
        self.acknowledged = self.acknowledged.saturating_add(records).min(self.sent);
        if self.total == Some(self.acknowledged) {
            self.phase = DeliveryPhase::Complete;
            return true;
        }
        false
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, DeliveryPhase::Complete)
    }

    #[must_use]
    pub fn sent(&self) -> u64 {
        self.sent
    }

    #[must_use]
    pub fn acknowledged(&self) -> u64 {
        self.acknowledged
    }

    #[must_use]
    pub fn phase(&self) -> DeliveryPhase {
        self.phase
    }
}

impl Default for CompletionTracker {
    fn default() -> Self {
        Self::new()
    }
}
