//! Command orchestration: queues reducer output to the backend worker and
//! feeds settled backend events back through the reducer.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use client_core::{ChemBackend, SpeechRecognizer};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::{
    backend_bridge::{commands::BackendCommand, runtime::spawn_backend_thread},
    controller::{events::UiEvent, reducer::reduce},
    ui::AppState,
};

pub const COMMAND_QUEUE_CAPACITY: usize = 256;
pub const EVENT_QUEUE_CAPACITY: usize = 2048;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status =
                "Backend command processor disconnected (possible startup/runtime failure)"
                    .to_string();
        }
    }
}

/// Owns the interaction state and both ends of the worker channels.
pub struct Controller {
    state: AppState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl Controller {
    pub fn new(state: AppState, cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            state,
            cmd_tx,
            ui_rx,
        }
    }

    /// Creates the channels and starts the backend worker thread.
    pub fn launch(
        state: AppState,
        backend: Arc<dyn ChemBackend>,
        speech: Arc<dyn SpeechRecognizer>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
        let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
        spawn_backend_thread(cmd_rx, ui_tx, backend, speech);
        Self::new(state, cmd_tx, ui_rx)
    }

    pub fn dispatch(&mut self, event: UiEvent) {
        for cmd in reduce(&mut self.state, event) {
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status);
        }
    }

    /// Drains every event the worker has posted so far.
    pub fn process_ui_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.ui_rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Blocks for at most `timeout` for one worker event.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.ui_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                self.state.status = "Backend worker stopped".to_string();
                false
            }
        }
    }

    /// Processes worker events until `done` holds or `timeout` elapses.
    pub fn run_until(&mut self, timeout: Duration, done: impl Fn(&AppState) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if done(&self.state) {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.wait_for_event(remaining) {
                return done(&self.state);
            }
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
