//! Upstream speech recognition contract.
//!
//! `SpeechSource` abstracts a platform speech-to-text backend as a typed
//! event stream. Recognizer streams can end on their own; the session
//! loop restarts the source transparently so one capture session can
//! span several recognizer runs.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::CaptureError;

/// Recognition error codes, displayed with their wire spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechErrorCode {
    /// No speech was detected. Benign; the session swallows it.
    NoSpeech,
    /// Audio capture failed (no microphone, or the device is busy).
    Audio,
    /// The recognition backend lost network connectivity.
    Network,
    /// Microphone permission was denied.
    NotAllowed,
    /// Recognition was torn down outside the session's control.
    Aborted,
    /// Any other backend-specific code, passed through verbatim.
    Other(String),
}

impl fmt::Display for SpeechErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechErrorCode::NoSpeech => write!(f, "no-speech"),
            SpeechErrorCode::Audio => write!(f, "audio-capture"),
            SpeechErrorCode::Network => write!(f, "network"),
            SpeechErrorCode::NotAllowed => write!(f, "not-allowed"),
            SpeechErrorCode::Aborted => write!(f, "aborted"),
            SpeechErrorCode::Other(code) => write!(f, "{}", code),
        }
    }
}

/// One event from a speech recognition stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    /// Interim hypothesis. Replaces any previous interim text.
    Partial { text: String },
    /// Finalized utterance with the recognizer's confidence.
    Final { text: String, confidence: f32 },
    /// The stream ended on its own, without a stop or abort request.
    End,
    /// A recognition error.
    Error { code: SpeechErrorCode },
}

/// A platform speech-to-text backend.
///
/// Each `start` call yields a fresh event stream for the same logical
/// session. Implementations must be `Send` so the session control loop
/// can own them inside a spawned task.
#[async_trait]
pub trait SpeechSource: Send {
    /// Whether the platform can capture speech at all.
    fn is_available(&self) -> bool;

    /// Begin recognition and return the event stream.
    async fn start(&mut self) -> Result<UnboundedReceiver<SpeechEvent>, CaptureError>;

    /// Stop gracefully, letting in-flight final results flush.
    async fn stop(&mut self);

    /// Tear down immediately, discarding in-flight results.
    async fn abort(&mut self);
}

/// Source for platforms without a speech backend.
///
/// Never available; `start` always fails with `NotSupported`.
#[derive(Debug, Default)]
pub struct UnsupportedSource;

#[async_trait]
impl SpeechSource for UnsupportedSource {
    fn is_available(&self) -> bool {
        false
    }

    async fn start(&mut self) -> Result<UnboundedReceiver<SpeechEvent>, CaptureError> {
        Err(CaptureError::NotSupported)
    }

    async fn stop(&mut self) {}

    async fn abort(&mut self) {}
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_spellings() {
        assert_eq!(SpeechErrorCode::NoSpeech.to_string(), "no-speech");
        assert_eq!(SpeechErrorCode::Audio.to_string(), "audio-capture");
        assert_eq!(SpeechErrorCode::Network.to_string(), "network");
        assert_eq!(SpeechErrorCode::NotAllowed.to_string(), "not-allowed");
        assert_eq!(SpeechErrorCode::Aborted.to_string(), "aborted");
        assert_eq!(
            SpeechErrorCode::Other("service-not-allowed".to_string()).to_string(),
            "service-not-allowed"
        );
    }

    #[test]
    fn test_unsupported_source_is_unavailable() {
        let source = UnsupportedSource;
        assert!(!source.is_available());
    }

    #[tokio::test]
    async fn test_unsupported_source_start_fails() {
        let mut source = UnsupportedSource;
        let result = source.start().await;
        assert!(matches!(result, Err(CaptureError::NotSupported)));
    }
}
