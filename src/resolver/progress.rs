// WHY: phase-completion notifications for hosts that display progress
// Observers are fire-and-forget; the resolver never waits on them

use indicatif::ProgressBar;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Resolution phases in the order they complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolvePhase {
    TokensReady,
    SecondaryDetected,
    CandidatesDetected,
    ScoringComplete,
    AggregationComplete,
    MergeComplete,
}

impl ResolvePhase {
    /// Percentage milestone reported to progress hosts
    pub fn milestone(self) -> u8 {
        match self {
            ResolvePhase::TokensReady => 30,
            ResolvePhase::SecondaryDetected => 40,
            ResolvePhase::CandidatesDetected => 50,
            ResolvePhase::ScoringComplete => 60,
            ResolvePhase::AggregationComplete => 65,
            ResolvePhase::MergeComplete => 70,
        }
    }
}

/// Receives phase-completion notifications
pub trait ProgressObserver: Send + Sync {
    fn notify(&self, phase: ResolvePhase);
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn notify(&self, _phase: ResolvePhase) {}
}

/// Adapter turning a closure into an observer
pub struct FnObserver<F>(pub F);

impl<F> ProgressObserver for FnObserver<F>
where
    F: Fn(ResolvePhase) + Send + Sync,
{
    fn notify(&self, phase: ResolvePhase) {
        (self.0)(phase)
    }
}

impl ProgressObserver for UnboundedSender<ResolvePhase> {
    fn notify(&self, phase: ResolvePhase) {
        // Receiver may have gone away; progress is advisory
        let _ = self.send(phase);
    }
}

impl ProgressObserver for ProgressBar {
    fn notify(&self, phase: ResolvePhase) {
        self.set_position(u64::from(phase.milestone()));
        self.set_message(format!("{phase:?}"));
    }
}
