//! Error types for speech capture.

use inlet_core::InletError;

use crate::state::SessionState;

/// Errors raised by the capture session lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The platform has no speech recognition backend.
    #[error("Speech capture is not supported on this platform")]
    NotSupported,

    /// A previous session is still listening.
    #[error("A capture session is already active")]
    AlreadyActive,

    /// The requested state change is not allowed from the current state.
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },

    /// The speech source failed to start or restart.
    #[error("Speech source failed: {0}")]
    SourceFailed(String),
}

impl From<CaptureError> for InletError {
    fn from(err: CaptureError) -> Self {
        InletError::Capture(err.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
