//! Voice capture sessions over pluggable speech recognition sources.
//!
//! Wraps a platform speech-to-text backend (`SpeechSource`) in an async
//! session with live cleaned previews, silence-window auto-stop, and a
//! validated state machine. A session survives spontaneous recognizer
//! stream ends by restarting its source, and emits its final transcript
//! exactly once.

pub mod error;
pub mod session;
pub mod source;
pub mod state;

pub use error::CaptureError;
pub use session::{
    CaptureResult, CaptureService, PreviewUpdate, SessionEvent, SessionHandle, TranscriptChunk,
};
pub use source::{SpeechErrorCode, SpeechEvent, SpeechSource, UnsupportedSource};
pub use state::{SessionState, StateMachine};
