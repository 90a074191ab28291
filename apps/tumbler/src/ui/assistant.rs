//! Assistant chat panel with optional voice capture.

use chrono::{DateTime, Utc};
use shared::{domain::RequestSeq, error::ServiceError};
use tracing::{debug, warn};

pub const NO_ANSWER: &str = "No answer found.";
pub const VOICE_UNSUPPORTED: &str = "Voice input not supported in this platform.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCapture {
    /// Detected once at startup; never changes afterwards.
    Unsupported,
    Idle,
    Listening { seq: RequestSeq },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceToggle {
    Start(RequestSeq),
    Stop(RequestSeq),
}

#[derive(Debug, Clone)]
pub struct AssistantPanel {
    visible: bool,
    input_focused: bool,
    pub input: String,
    transcript: Vec<TranscriptEntry>,
    pending: Option<RequestSeq>,
    last_query: RequestSeq,
    last_capture: RequestSeq,
    voice: VoiceCapture,
}

impl AssistantPanel {
    pub fn new(voice_supported: bool) -> Self {
        Self {
            visible: false,
            input_focused: false,
            input: String::new(),
            transcript: Vec::new(),
            pending: None,
            last_query: RequestSeq::default(),
            last_capture: RequestSeq::default(),
            voice: if voice_supported {
                VoiceCapture::Idle
            } else {
                VoiceCapture::Unsupported
            },
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
        self.input_focused = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.input_focused = false;
    }

    /// Records the user's message and allocates a query, unless the input
    /// is blank or a query is already outstanding.
    pub fn submit(&mut self) -> Option<(RequestSeq, String)> {
        if self.pending.is_some() {
            debug!("assistant input disabled while a query is outstanding");
            return None;
        }
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.push(Speaker::User, query.clone());
        self.input.clear();
        self.last_query = self.last_query.next();
        self.pending = Some(self.last_query);
        Some((self.last_query, query))
    }

    pub fn settle(&mut self, seq: RequestSeq, outcome: Result<Option<String>, ServiceError>) -> bool {
        if self.pending != Some(seq) {
            debug!(%seq, "discarding stale assistant response");
            return false;
        }
        let answer = match outcome {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => NO_ANSWER.to_string(),
            Err(err) => {
                warn!(%err, "assistant query failed");
                NO_ANSWER.to_string()
            }
        };
        self.push(Speaker::Assistant, answer);
        self.pending = None;
        self.input_focused = true;
        true
    }

    /// Flips voice capture; a no-op when unsupported or while a query is
    /// outstanding.
    pub fn toggle_voice(&mut self) -> Option<VoiceToggle> {
        if !self.voice_enabled() {
            return None;
        }
        match self.voice {
            VoiceCapture::Unsupported => None,
            VoiceCapture::Idle => {
                self.last_capture = self.last_capture.next();
                self.voice = VoiceCapture::Listening {
                    seq: self.last_capture,
                };
                Some(VoiceToggle::Start(self.last_capture))
            }
            VoiceCapture::Listening { seq } => {
                self.voice = VoiceCapture::Idle;
                Some(VoiceToggle::Stop(seq))
            }
        }
    }

    /// Places a transcript into the input; never submits it.
    pub fn voice_transcribed(&mut self, seq: RequestSeq, text: String) -> bool {
        if self.voice != (VoiceCapture::Listening { seq }) {
            debug!(%seq, "discarding transcript from an inactive capture");
            return false;
        }
        self.input = text;
        self.voice = VoiceCapture::Idle;
        true
    }

    pub fn voice_ended(&mut self, seq: RequestSeq) {
        if self.voice == (VoiceCapture::Listening { seq }) {
            self.voice = VoiceCapture::Idle;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn controls_enabled(&self) -> bool {
        self.pending.is_none()
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice != VoiceCapture::Unsupported && self.controls_enabled()
    }

    /// Explanation shown on a permanently disabled voice control.
    pub fn voice_hint(&self) -> Option<&'static str> {
        (self.voice == VoiceCapture::Unsupported).then_some(VOICE_UNSUPPORTED)
    }

    pub fn voice(&self) -> VoiceCapture {
        self.voice
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.transcript.push(TranscriptEntry {
            speaker,
            text,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
#[path = "tests/assistant_tests.rs"]
mod tests;
