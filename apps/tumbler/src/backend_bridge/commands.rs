//! Backend commands queued from the reducer to the backend worker.

use std::time::Duration;

use shared::domain::RequestSeq;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    SubmitReaction {
        seq: RequestSeq,
        formulas: Vec<String>,
    },
    ScheduleProductSwap {
        seq: RequestSeq,
        delay: Duration,
    },
    CancelProductSwap {
        seq: RequestSeq,
    },
    FetchAutocomplete {
        seq: RequestSeq,
        prefix: String,
    },
    WebSearch {
        seq: RequestSeq,
        query: String,
    },
    AssistantQuery {
        seq: RequestSeq,
        query: String,
    },
    StartVoiceCapture {
        seq: RequestSeq,
    },
    StopVoiceCapture {
        seq: RequestSeq,
    },
    FetchReactionChain {
        seq: RequestSeq,
        start: String,
        end: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SubmitReaction { .. } => "submit_reaction",
            BackendCommand::ScheduleProductSwap { .. } => "schedule_product_swap",
            BackendCommand::CancelProductSwap { .. } => "cancel_product_swap",
            BackendCommand::FetchAutocomplete { .. } => "fetch_autocomplete",
            BackendCommand::WebSearch { .. } => "web_search",
            BackendCommand::AssistantQuery { .. } => "assistant_query",
            BackendCommand::StartVoiceCapture { .. } => "start_voice_capture",
            BackendCommand::StopVoiceCapture { .. } => "stop_voice_capture",
            BackendCommand::FetchReactionChain { .. } => "fetch_reaction_chain",
        }
    }
}
