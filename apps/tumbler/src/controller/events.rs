//! UI/backend events and error modeling for the tumbler controller.

use client_core::SourceCard;
use shared::{
    domain::{ItemKind, RequestSeq},
    error::ServiceError,
    protocol::ReactionResult,
};

use crate::ui::search::SearchKey;

#[derive(Debug, Clone)]
pub enum UiEvent {
    DragStarted {
        list: ItemKind,
        card: Option<SourceCard>,
    },
    DragEnded,
    DragOver,
    DragLeave,
    ItemDropped {
        payload: String,
    },
    TumblerItemClicked {
        formula: String,
    },
    ReactionRequested,
    ReactionSettled {
        seq: RequestSeq,
        outcome: Result<ReactionResult, ServiceError>,
    },
    ProductSwapElapsed {
        seq: RequestSeq,
    },
    SearchInputChanged {
        text: String,
    },
    AutocompleteSettled {
        seq: RequestSeq,
        compounds: Result<Vec<String>, ServiceError>,
        elements: Result<Vec<String>, ServiceError>,
    },
    SearchKey(SearchKey),
    CandidateClicked {
        index: usize,
    },
    OutsideClicked,
    SearchCommitted {
        candidate: String,
    },
    WebSearchSettled {
        seq: RequestSeq,
        query: String,
        outcome: Result<Option<String>, ServiceError>,
    },
    AddSearchResultToTumbler,
    AssistantOpened,
    AssistantClosed,
    AssistantInputChanged {
        text: String,
    },
    AssistantSubmitted,
    AssistantSettled {
        seq: RequestSeq,
        outcome: Result<Option<String>, ServiceError>,
    },
    VoiceToggled,
    VoiceTranscribed {
        seq: RequestSeq,
        text: String,
    },
    VoiceCaptureEnded {
        seq: RequestSeq,
    },
    VoiceCaptureFailed {
        seq: RequestSeq,
        reason: String,
    },
    ReactionChainRequested {
        start: String,
        end: String,
    },
    ReactionChainSettled {
        seq: RequestSeq,
        outcome: Result<Vec<String>, ServiceError>,
    },
    Info(String),
    Error(UiError),
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::DragStarted { .. } => "drag_started",
            UiEvent::DragEnded => "drag_ended",
            UiEvent::DragOver => "drag_over",
            UiEvent::DragLeave => "drag_leave",
            UiEvent::ItemDropped { .. } => "item_dropped",
            UiEvent::TumblerItemClicked { .. } => "tumbler_item_clicked",
            UiEvent::ReactionRequested => "reaction_requested",
            UiEvent::ReactionSettled { .. } => "reaction_settled",
            UiEvent::ProductSwapElapsed { .. } => "product_swap_elapsed",
            UiEvent::SearchInputChanged { .. } => "search_input_changed",
            UiEvent::AutocompleteSettled { .. } => "autocomplete_settled",
            UiEvent::SearchKey(_) => "search_key",
            UiEvent::CandidateClicked { .. } => "candidate_clicked",
            UiEvent::OutsideClicked => "outside_clicked",
            UiEvent::SearchCommitted { .. } => "search_committed",
            UiEvent::WebSearchSettled { .. } => "web_search_settled",
            UiEvent::AddSearchResultToTumbler => "add_search_result_to_tumbler",
            UiEvent::AssistantOpened => "assistant_opened",
            UiEvent::AssistantClosed => "assistant_closed",
            UiEvent::AssistantInputChanged { .. } => "assistant_input_changed",
            UiEvent::AssistantSubmitted => "assistant_submitted",
            UiEvent::AssistantSettled { .. } => "assistant_settled",
            UiEvent::VoiceToggled => "voice_toggled",
            UiEvent::VoiceTranscribed { .. } => "voice_transcribed",
            UiEvent::VoiceCaptureEnded { .. } => "voice_capture_ended",
            UiEvent::VoiceCaptureFailed { .. } => "voice_capture_failed",
            UiEvent::ReactionChainRequested { .. } => "reaction_chain_requested",
            UiEvent::ReactionChainSettled { .. } => "reaction_chain_settled",
            UiEvent::Info(_) => "info",
            UiEvent::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_command_queue_disconnect_as_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::CommandQueue,
            "Backend command processor disconnected",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::CommandQueue);
    }

    #[test]
    fn classifies_bad_configuration_as_validation_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "invalid backend url 'x': relative URL without a base",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err_label(err.category()), "Validation");
    }
}
