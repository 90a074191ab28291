//! Backend worker: a dedicated thread running a tokio runtime that executes
//! queued commands and posts settled results back as UI events.

use std::{sync::Arc, thread};

use client_core::{autocomplete_both, ChemBackend, SpeechRecognizer};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::RequestSeq;
use tokio::task::JoinHandle;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
};

fn post(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    let name = event.name();
    if let Err(err) = ui_tx.try_send(event) {
        tracing::warn!(event = name, "dropping backend event: {err}");
    }
}

/// Task handle tagged with the request it belongs to.
struct Tracked {
    seq: RequestSeq,
    handle: JoinHandle<()>,
}

impl Tracked {
    fn abort_if(slot: &mut Option<Tracked>, seq: RequestSeq) -> bool {
        match slot.take() {
            Some(task) if task.seq == seq => {
                task.handle.abort();
                true
            }
            other => {
                *slot = other;
                false
            }
        }
    }

    fn replace(slot: &mut Option<Tracked>, next: Tracked) {
        if let Some(prev) = slot.replace(next) {
            prev.handle.abort();
        }
    }
}

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    backend: Arc<dyn ChemBackend>,
    speech: Arc<dyn SpeechRecognizer>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                post(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            post(&ui_tx, UiEvent::Info("Backend worker ready".to_string()));

            let mut swap_task: Option<Tracked> = None;
            let mut voice_task: Option<Tracked> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend worker received command");
                match cmd {
                    BackendCommand::SubmitReaction { seq, formulas } => {
                        let backend = backend.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = backend.react(&formulas).await;
                            if let Err(err) = &outcome {
                                tracing::info!(%seq, %err, "reaction request did not succeed");
                            }
                            post(&ui_tx, UiEvent::ReactionSettled { seq, outcome });
                        });
                    }
                    BackendCommand::ScheduleProductSwap { seq, delay } => {
                        let ui_tx = ui_tx.clone();
                        let handle = tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            post(&ui_tx, UiEvent::ProductSwapElapsed { seq });
                        });
                        Tracked::replace(&mut swap_task, Tracked { seq, handle });
                    }
                    BackendCommand::CancelProductSwap { seq } => {
                        if Tracked::abort_if(&mut swap_task, seq) {
                            tracing::debug!(%seq, "cancelled pending product swap");
                        }
                    }
                    BackendCommand::FetchAutocomplete { seq, prefix } => {
                        let backend = backend.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let (compounds, elements) =
                                autocomplete_both(backend.as_ref(), &prefix).await;
                            post(
                                &ui_tx,
                                UiEvent::AutocompleteSettled {
                                    seq,
                                    compounds,
                                    elements,
                                },
                            );
                        });
                    }
                    BackendCommand::WebSearch { seq, query } => {
                        let backend = backend.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = backend.web_search(&query).await;
                            post(
                                &ui_tx,
                                UiEvent::WebSearchSettled {
                                    seq,
                                    query,
                                    outcome,
                                },
                            );
                        });
                    }
                    BackendCommand::AssistantQuery { seq, query } => {
                        let backend = backend.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = backend.web_search(&query).await;
                            post(&ui_tx, UiEvent::AssistantSettled { seq, outcome });
                        });
                    }
                    BackendCommand::StartVoiceCapture { seq } => {
                        let speech = speech.clone();
                        let ui_tx = ui_tx.clone();
                        let handle = tokio::spawn(async move {
                            match speech.transcribe().await {
                                Ok(text) => post(&ui_tx, UiEvent::VoiceTranscribed { seq, text }),
                                Err(err) => post(
                                    &ui_tx,
                                    UiEvent::VoiceCaptureFailed {
                                        seq,
                                        reason: format!("{err:#}"),
                                    },
                                ),
                            }
                        });
                        Tracked::replace(&mut voice_task, Tracked { seq, handle });
                    }
                    BackendCommand::StopVoiceCapture { seq } => {
                        if Tracked::abort_if(&mut voice_task, seq) {
                            post(&ui_tx, UiEvent::VoiceCaptureEnded { seq });
                        }
                    }
                    BackendCommand::FetchReactionChain { seq, start, end } => {
                        let backend = backend.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = backend.reaction_chain(&start, &end).await;
                            post(&ui_tx, UiEvent::ReactionChainSettled { seq, outcome });
                        });
                    }
                }
            }
            tracing::info!("backend command queue closed; worker exiting");
        });
    });
}
