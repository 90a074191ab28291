//! Single-threaded reducer: applies one event to the state and returns the
//! backend commands it requires.

use shared::domain::CatalogEntry;
use tracing::{debug, info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{err_label, UiEvent},
    ui::{
        animation::Gradient,
        assistant::VoiceToggle,
        dragdrop::parse_drop_payload,
        reaction::{SettleDecision, SubmitDecision},
        search::CommitOutcome,
        AppState,
    },
};

pub fn reduce(state: &mut AppState, event: UiEvent) -> Vec<BackendCommand> {
    debug!(event = event.name(), "reducing ui event");
    match event {
        UiEvent::DragStarted { list, card } => {
            state.drag.drag_start(list, card.as_ref());
            Vec::new()
        }
        UiEvent::DragEnded => {
            state.drag.drag_end();
            Vec::new()
        }
        UiEvent::DragOver => {
            state.tumbler.armed = true;
            Vec::new()
        }
        UiEvent::DragLeave => {
            state.tumbler.armed = false;
            Vec::new()
        }
        UiEvent::ItemDropped { payload } => {
            state.tumbler.armed = false;
            if let Some(item) = parse_drop_payload(&payload) {
                state.add_to_tumbler(item);
            }
            Vec::new()
        }
        UiEvent::TumblerItemClicked { formula } => {
            state.remove_from_tumbler(&formula);
            Vec::new()
        }
        UiEvent::ReactionRequested => reduce_reaction_request(state),
        UiEvent::ReactionSettled { seq, outcome } => match state.reaction.settle(seq, outcome) {
            SettleDecision::Stale => {
                debug!(%seq, "discarding stale reaction response");
                Vec::new()
            }
            SettleDecision::Animate(plan) => {
                state.tumbler.liquid = plan.liquid;
                vec![BackendCommand::ScheduleProductSwap {
                    seq,
                    delay: plan.swap_delay,
                }]
            }
            SettleDecision::Failed => {
                state.tumbler.liquid = Gradient::DEFAULT;
                Vec::new()
            }
        },
        UiEvent::ProductSwapElapsed { seq } => {
            match state.reaction.take_swap(seq) {
                Some(products) => {
                    info!(%seq, products = products.len(), "reaction complete");
                    state.complete_reaction(&products);
                }
                None => debug!(%seq, "ignoring product swap that is no longer pending"),
            }
            Vec::new()
        }
        UiEvent::SearchInputChanged { text } => state
            .search
            .input_changed(&text)
            .map(|(seq, prefix)| BackendCommand::FetchAutocomplete { seq, prefix })
            .into_iter()
            .collect(),
        UiEvent::AutocompleteSettled {
            seq,
            compounds,
            elements,
        } => {
            state.search.autocomplete_settled(seq, compounds, elements);
            Vec::new()
        }
        UiEvent::SearchKey(key) => match state.search.key(key) {
            Some(candidate) => commit_candidate(state, &candidate),
            None => Vec::new(),
        },
        UiEvent::CandidateClicked { index } => match state.search.candidate(index) {
            Some(candidate) => commit_candidate(state, &candidate),
            None => Vec::new(),
        },
        UiEvent::OutsideClicked => {
            state.search.dismiss();
            Vec::new()
        }
        UiEvent::SearchCommitted { candidate } => commit_candidate(state, &candidate),
        UiEvent::WebSearchSettled {
            seq,
            query,
            outcome,
        } => {
            state.search.web_search_settled(seq, query, outcome);
            Vec::new()
        }
        UiEvent::AddSearchResultToTumbler => {
            let item = state
                .search
                .addable_entry()
                .map(CatalogEntry::to_selectable);
            if let Some(item) = item {
                state.add_to_tumbler(item);
            }
            Vec::new()
        }
        UiEvent::AssistantOpened => {
            state.assistant.open();
            Vec::new()
        }
        UiEvent::AssistantClosed => {
            state.assistant.close();
            Vec::new()
        }
        UiEvent::AssistantInputChanged { text } => {
            if state.assistant.controls_enabled() {
                state.assistant.input = text;
            }
            Vec::new()
        }
        UiEvent::AssistantSubmitted => state
            .assistant
            .submit()
            .map(|(seq, query)| BackendCommand::AssistantQuery { seq, query })
            .into_iter()
            .collect(),
        UiEvent::AssistantSettled { seq, outcome } => {
            state.assistant.settle(seq, outcome);
            Vec::new()
        }
        UiEvent::VoiceToggled => match state.assistant.toggle_voice() {
            Some(VoiceToggle::Start(seq)) => vec![BackendCommand::StartVoiceCapture { seq }],
            Some(VoiceToggle::Stop(seq)) => vec![BackendCommand::StopVoiceCapture { seq }],
            None => Vec::new(),
        },
        UiEvent::VoiceTranscribed { seq, text } => {
            state.assistant.voice_transcribed(seq, text);
            Vec::new()
        }
        UiEvent::VoiceCaptureEnded { seq } => {
            state.assistant.voice_ended(seq);
            Vec::new()
        }
        UiEvent::VoiceCaptureFailed { seq, reason } => {
            warn!(%seq, %reason, "voice capture failed");
            state.assistant.voice_ended(seq);
            Vec::new()
        }
        UiEvent::ReactionChainRequested { start, end } => {
            state.chain_seq = state.chain_seq.next();
            state.chain = None;
            vec![BackendCommand::FetchReactionChain {
                seq: state.chain_seq,
                start,
                end,
            }]
        }
        UiEvent::ReactionChainSettled { seq, outcome } => {
            if seq == state.chain_seq {
                state.chain = Some(outcome.map_err(|err| err.to_string()));
            } else {
                debug!(%seq, latest = %state.chain_seq, "discarding stale reaction chain");
            }
            Vec::new()
        }
        UiEvent::Info(message) => {
            state.status = message;
            Vec::new()
        }
        UiEvent::Error(err) => {
            state.status = format!("{} error: {}", err_label(err.category()), err.message());
            Vec::new()
        }
    }
}

fn reduce_reaction_request(state: &mut AppState) -> Vec<BackendCommand> {
    match state.reaction.submit(state.selection.formulas()) {
        SubmitDecision::Rejected => {
            state.tumbler.liquid = Gradient::DEFAULT;
            debug!(selected = state.selection.len(), "reaction needs at least two items");
            Vec::new()
        }
        SubmitDecision::Issue {
            seq,
            formulas,
            cancel_swap,
        } => {
            info!(%seq, formulas = ?formulas, "submitting reaction");
            let mut commands = Vec::with_capacity(2);
            if let Some(swap) = cancel_swap {
                commands.push(BackendCommand::CancelProductSwap { seq: swap });
            }
            commands.push(BackendCommand::SubmitReaction { seq, formulas });
            commands
        }
    }
}

fn commit_candidate(state: &mut AppState, candidate: &str) -> Vec<BackendCommand> {
    match state.search.commit(candidate, &state.catalog) {
        CommitOutcome::Local => Vec::new(),
        CommitOutcome::WebSearch { seq, query } => vec![BackendCommand::WebSearch { seq, query }],
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
