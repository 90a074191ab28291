//! Drag gestures over the source lists and the tumbler drop target.

use client_core::SourceCard;
use shared::domain::{ItemKind, SelectableItem};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        formula: String,
    },
}

#[derive(Debug, Default, Clone)]
pub struct DragDropController {
    state: DragState,
    payload: Option<String>,
}

impl DragDropController {
    /// Starts a drag from the `list` source list. Only cards belonging to
    /// that list are draggable; returns the serialized drag payload.
    pub fn drag_start(&mut self, list: ItemKind, card: Option<&SourceCard>) -> Option<String> {
        let card = card.filter(|card| card.kind == list)?;
        let mut item = SelectableItem::new(card.formula.clone(), card.name.clone(), card.kind);
        if let Some(background) = &card.background {
            item = item.with_color(background.clone());
        }
        let payload = match serde_json::to_string(&item) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(formula = %card.formula, %err, "failed to encode drag payload");
                return None;
            }
        };
        self.state = DragState::Dragging {
            formula: card.formula.clone(),
        };
        self.payload = Some(payload.clone());
        Some(payload)
    }

    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
        self.payload = None;
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Payload of the drag in progress, if any.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn is_dragging(&self, formula: &str) -> bool {
        matches!(&self.state, DragState::Dragging { formula: current } if current == formula)
    }
}

/// Decodes a drop payload. Anything that is not a well-formed item yields
/// `None` and the drop is ignored.
pub fn parse_drop_payload(payload: &str) -> Option<SelectableItem> {
    let item: SelectableItem = match serde_json::from_str(payload) {
        Ok(item) => item,
        Err(err) => {
            debug!(%err, "ignoring malformed drop payload");
            return None;
        }
    };
    if item.formula.trim().is_empty() {
        debug!("ignoring drop payload without a formula");
        return None;
    }
    let color = item.color_hint.clone().unwrap_or_default();
    Some(SelectableItem {
        color_hint: None,
        ..item
    }
    .with_color(color))
}
