//! Capture session state machine with thread-safe transitions.
//!
//! Enforces valid state transitions for the capture lifecycle:
//! - Idle -> Listening (capture started)
//! - Listening -> Stopped (graceful stop, a result is emitted)
//! - Listening -> Cancelled (abort, the transcript is discarded)
//!
//! `Stopped` and `Cancelled` are terminal: a new session gets a fresh
//! state machine.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::CaptureError;

/// Operational state of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No capture in progress. Ready to start.
    Idle,
    /// Actively receiving speech events from the source.
    Listening,
    /// Stopped gracefully; a capture result was emitted.
    Stopped,
    /// Aborted; accumulated text was discarded without a result.
    Cancelled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Listening => write!(f, "Listening"),
            SessionState::Stopped => write!(f, "Stopped"),
            SessionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl SessionState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &SessionState) -> bool {
        matches!(
            (self, target),
            (SessionState::Idle, SessionState::Listening)
                | (SessionState::Listening, SessionState::Stopped)
                | (SessionState::Listening, SessionState::Cancelled)
        )
    }

    /// Returns whether the session has finished, one way or the other.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Stopped | SessionState::Cancelled)
    }
}

/// Thread-safe state machine for capture state transitions.
///
/// Wraps `SessionState` in an `Arc<Mutex<>>` so the control loop and any
/// session handles observe the same state. All transitions are validated
/// before being applied, returning an error if the requested transition
/// is not permitted.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<SessionState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> SessionState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    ///
    /// Returns `Ok(())` if the transition is valid, or a
    /// `CaptureError::InvalidTransition` if it is not allowed from the
    /// current state.
    pub fn transition(&self, target: SessionState) -> Result<(), CaptureError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Capture state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(CaptureError::InvalidTransition {
                from: *state,
                to: target,
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
