use std::fmt;
use std::sync::{Arc, Mutex};

/// Lifecycle of one order submission. Replaces the ad hoc boolean flags of a
/// timer-driven flow with explicit event-driven transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight
    Idle,
    /// An order-creation call is past the guards and not yet resolved
    Submitting,
    /// The order store accepted the order
    Committed,
    /// Assembly or the order store call failed
    Failed,
    /// The safety timeout fired while still submitting
    TimedOut,
}

/// Events that drive the submission state machine. Timers feed
/// `SafetyTimeout` and `Reset`; the checkout flow feeds the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Commit,
    Fail,
    SafetyTimeout,
    Reset,
}

impl SubmissionState {
    /// Applies one event. Stale timer events on a state they no longer apply
    /// to leave the state unchanged.
    pub fn apply(self, event: SubmissionEvent) -> SubmissionState {
        use SubmissionEvent::*;
        use SubmissionState::*;

        match (self, event) {
            (Idle, Submit) | (TimedOut, Submit) => Submitting,
            (Submitting, Commit) | (TimedOut, Commit) => Committed,
            (Submitting, Fail) | (TimedOut, Fail) => Failed,
            (Submitting, SafetyTimeout) => TimedOut,
            (_, Reset) => Idle,
            (state, _) => state,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Committed => "committed",
            SubmissionState::Failed => "failed",
            SubmissionState::TimedOut => "timed-out",
        };
        write!(f, "{}", name)
    }
}

/// Shared handle on a session's submission state. Cloned into the timer tasks
/// that deliver `SafetyTimeout` and `Reset`.
#[derive(Debug, Clone)]
pub struct SubmissionTracker {
    state: Arc<Mutex<SubmissionState>>,
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubmissionState::Idle)),
        }
    }

    pub fn current(&self) -> SubmissionState {
        *self.state.lock().unwrap()
    }

    /// UI-facing processing flag; the safety timeout clears it by moving the
    /// machine out of `Submitting`.
    pub fn is_processing(&self) -> bool {
        self.current() == SubmissionState::Submitting
    }

    /// Attempts to enter `Submitting`. Fails while a prior submission on this
    /// session has not been reset yet, which keeps the session busy for the
    /// guard-release window after completion.
    pub fn try_submit(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        match *state {
            SubmissionState::Idle | SubmissionState::TimedOut => {
                *state = state.apply(SubmissionEvent::Submit);
                true
            }
            _ => false,
        }
    }

    /// Delivers `SafetyTimeout` if the submission is still in flight. Returns
    /// whether the transition happened, so the timer task can log only when
    /// it actually intervened.
    pub fn force_timeout(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if *state == SubmissionState::Submitting {
            *state = state.apply(SubmissionEvent::SafetyTimeout);
            true
        } else {
            false
        }
    }

    pub fn dispatch(&self, event: SubmissionEvent) -> SubmissionState {
        let mut state = self.state.lock().unwrap();
        *state = state.apply(event);
        *state
    }
}
