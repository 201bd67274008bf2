//! Capture session control loop.
//!
//! A session owns a `SpeechSource` inside a spawned task and folds its
//! event stream into a transcript:
//! - `Partial` hypotheses replace the interim tail of the live preview.
//! - `Final` results are appended to the finalized transcript and
//!   recorded as timestamped chunks.
//! - A silence window is re-armed on every result; when it elapses with
//!   finalized text present, the session stops itself.
//! - Spontaneous stream ends are bridged by restarting the source, so
//!   one session can span several recognizer runs.
//!
//! Consumers hold a `SessionHandle` for control and an event receiver
//! for `Preview`, `Error`, and `Completed` events. `Completed` is
//! emitted exactly once per session, and never after a cancel.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;
use uuid::Uuid;

use inlet_core::CaptureConfig;

use crate::error::CaptureError;
use crate::source::{SpeechErrorCode, SpeechEvent, SpeechSource};
use crate::state::{SessionState, StateMachine};

// =============================================================================
// Session Records
// =============================================================================

/// One finalized utterance from the recognizer.
#[derive(Debug, Clone)]
pub struct TranscriptChunk {
    pub text: String,
    /// Recognizer confidence for this utterance, 0.0 to 1.0.
    pub confidence: f32,
    /// When the utterance was finalized.
    pub at: Instant,
}

/// Live view of the transcript while a session is running.
#[derive(Debug, Clone)]
pub struct PreviewUpdate {
    /// Finalized text followed by the current interim hypothesis.
    pub raw: String,
    /// `raw` with the cleaning pipeline applied.
    pub cleaned: String,
    /// Always false for previews; the final text arrives in `Completed`.
    pub is_final: bool,
}

/// The outcome of a gracefully stopped session.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// Finalized text only. A pending interim hypothesis is discarded.
    pub raw: String,
    /// `raw` with the cleaning pipeline applied.
    pub cleaned: String,
    /// Finalized utterances in arrival order.
    pub chunks: Vec<TranscriptChunk>,
    /// Time between the first and last finalized chunk. Zero with fewer
    /// than two chunks.
    pub duration: Duration,
}

/// Events delivered to the session consumer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The live transcript changed.
    Preview(PreviewUpdate),
    /// The source reported a recognition error. Non-fatal; the session
    /// keeps listening.
    Error(SpeechErrorCode),
    /// The session stopped and produced its result. Always the last
    /// event on the stream.
    Completed(CaptureResult),
}

/// Commands accepted by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Stop,
    Cancel,
}

// =============================================================================
// Session Handle
// =============================================================================

/// Caller-side handle to a running capture session.
///
/// Cheap to clone; all clones control the same session. Dropping every
/// clone cancels the session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: Uuid,
    control: UnboundedSender<Command>,
    state: StateMachine,
}

impl SessionHandle {
    /// Unique identifier of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    /// Request a graceful stop. The result arrives as a `Completed`
    /// event on the session's event stream.
    pub fn stop(&self) {
        let _ = self.control.send(Command::Stop);
    }

    /// Abort the session, discarding all accumulated text. No
    /// `Completed` event is emitted. Safe to call in any state.
    pub fn cancel(&self) {
        let _ = self.control.send(Command::Cancel);
    }
}

// =============================================================================
// Capture Service
// =============================================================================

/// Factory for capture sessions, enforcing at most one live session.
#[derive(Debug)]
pub struct CaptureService {
    config: CaptureConfig,
    last: Option<StateMachine>,
}

impl CaptureService {
    /// Create a capture service with the given configuration.
    pub fn new(config: CaptureConfig) -> Self {
        Self { config, last: None }
    }

    /// Start a new capture session on `source`.
    ///
    /// Fails with `AlreadyActive` while a previous session is still
    /// listening, and with `NotSupported` when the source reports no
    /// speech capability. On success the session runs in a spawned task
    /// until stopped, cancelled, or ended by the silence window.
    pub async fn start<S>(
        &mut self,
        mut source: S,
    ) -> Result<(SessionHandle, UnboundedReceiver<SessionEvent>), CaptureError>
    where
        S: SpeechSource + 'static,
    {
        if let Some(last) = &self.last {
            if last.current() == SessionState::Listening {
                return Err(CaptureError::AlreadyActive);
            }
        }
        if !source.is_available() {
            return Err(CaptureError::NotSupported);
        }

        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let state = StateMachine::new();

        let events = source.start().await?;
        state.transition(SessionState::Listening)?;

        tracing::info!(
            session_id = %id,
            language = %self.config.language,
            silence_ms = self.config.silence_ms,
            "Capture session started"
        );

        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let handle = SessionHandle {
            id,
            control: control_tx,
            state: state.clone(),
        };
        self.last = Some(state.clone());

        let session = Session {
            id,
            started_at,
            state,
            window: Duration::from_millis(self.config.silence_ms),
            source,
            finalized: String::new(),
            interim: String::new(),
            chunks: Vec::new(),
        };
        tokio::spawn(run_session(session, events, control_rx, event_tx));

        Ok((handle, event_rx))
    }
}

// =============================================================================
// Control Loop
// =============================================================================

struct Session<S> {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: StateMachine,
    window: Duration,
    source: S,
    finalized: String,
    interim: String,
    chunks: Vec<TranscriptChunk>,
}

impl<S: SpeechSource> Session<S> {
    fn preview_raw(&self) -> String {
        format!("{}{}", self.finalized, self.interim)
    }

    fn emit_preview(&self, out: &UnboundedSender<SessionEvent>) {
        let raw = self.preview_raw();
        let cleaned = inlet_cleaner::clean_text(&raw);
        let _ = out.send(SessionEvent::Preview(PreviewUpdate {
            raw,
            cleaned,
            is_final: false,
        }));
    }

    fn push_final(&mut self, text: String, confidence: f32) {
        self.chunks.push(TranscriptChunk {
            text: text.clone(),
            confidence,
            at: Instant::now(),
        });
        self.finalized.push_str(&text);
        self.interim.clear();
    }

    async fn complete(&mut self, out: &UnboundedSender<SessionEvent>) {
        if let Err(err) = self.state.transition(SessionState::Stopped) {
            tracing::warn!(session_id = %self.id, error = %err, "Stop ignored");
            return;
        }
        self.source.stop().await;

        let raw = self.finalized.clone();
        let cleaned = inlet_cleaner::clean_text(&raw);
        let duration = transcript_duration(&self.chunks);
        let chunks = std::mem::take(&mut self.chunks);

        let elapsed = Utc::now() - self.started_at;
        tracing::info!(
            session_id = %self.id,
            chunks = chunks.len(),
            elapsed_ms = elapsed.num_milliseconds(),
            "Capture session completed"
        );

        let _ = out.send(SessionEvent::Completed(CaptureResult {
            raw,
            cleaned,
            chunks,
            duration,
        }));
    }

    async fn cancel(&mut self) {
        if let Err(err) = self.state.transition(SessionState::Cancelled) {
            tracing::warn!(session_id = %self.id, error = %err, "Cancel ignored");
            return;
        }
        self.source.abort().await;
        self.finalized.clear();
        self.interim.clear();
        self.chunks.clear();
        tracing::info!(session_id = %self.id, "Capture session cancelled");
    }
}

fn transcript_duration(chunks: &[TranscriptChunk]) -> Duration {
    match (chunks.first(), chunks.last()) {
        (Some(first), Some(last)) => last.at.duration_since(first.at),
        _ => Duration::ZERO,
    }
}

async fn run_session<S>(
    mut session: Session<S>,
    mut events: UnboundedReceiver<SpeechEvent>,
    mut control: UnboundedReceiver<Command>,
    out: UnboundedSender<SessionEvent>,
) where
    S: SpeechSource + 'static,
{
    let silence = sleep(session.window);
    tokio::pin!(silence);
    let mut timer_armed = true;
    let mut stream_open = true;

    loop {
        tokio::select! {
            // Queued stop/cancel commands win over a racing silence timer.
            biased;

            cmd = control.recv() => match cmd {
                Some(Command::Stop) => {
                    session.complete(&out).await;
                    return;
                }
                Some(Command::Cancel) | None => {
                    // Every handle dropped counts as a cancel.
                    session.cancel().await;
                    return;
                }
            },

            event = events.recv(), if stream_open => match event {
                Some(SpeechEvent::Partial { text }) => {
                    session.interim = text;
                    silence.as_mut().reset(tokio::time::Instant::now() + session.window);
                    timer_armed = true;
                    session.emit_preview(&out);
                }
                Some(SpeechEvent::Final { text, confidence }) => {
                    session.push_final(text, confidence);
                    silence.as_mut().reset(tokio::time::Instant::now() + session.window);
                    timer_armed = true;
                    session.emit_preview(&out);
                }
                Some(SpeechEvent::Error { code }) => match code {
                    // Silence is not an error; the timer handles it.
                    SpeechErrorCode::NoSpeech => {
                        tracing::debug!(session_id = %session.id, "No speech detected");
                    }
                    code => {
                        tracing::warn!(
                            session_id = %session.id,
                            code = %code,
                            "Speech recognition error"
                        );
                        let _ = out.send(SessionEvent::Error(code));
                    }
                },
                // Recognizers end streams on their own; restart to keep
                // the session alive.
                Some(SpeechEvent::End) | None => match session.source.start().await {
                    Ok(fresh) => {
                        tracing::debug!(session_id = %session.id, "Speech source restarted");
                        events = fresh;
                    }
                    Err(err) => {
                        tracing::warn!(
                            session_id = %session.id,
                            error = %err,
                            "Speech source restart failed"
                        );
                        let _ = out.send(SessionEvent::Error(SpeechErrorCode::Other(
                            err.to_string(),
                        )));
                        stream_open = false;
                    }
                },
            },

            _ = &mut silence, if timer_armed => {
                if session.finalized.trim().is_empty() {
                    // Nothing captured yet; disarm until the next result.
                    timer_armed = false;
                } else {
                    tracing::debug!(session_id = %session.id, "Silence window elapsed");
                    session.complete(&out).await;
                    return;
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
