//! Root state owned by one tumbler controller.

use std::time::Duration;

use client_core::Catalog;
use shared::domain::{Product, RequestSeq, SelectableItem};
use tracing::debug;

use crate::ui::{
    assistant::AssistantPanel,
    dragdrop::DragDropController,
    reaction::ReactionOrchestrator,
    search::SearchResolver,
    selection::{SelectionStore, TumblerView},
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub selection: SelectionStore,
    pub tumbler: TumblerView,
    pub drag: DragDropController,
    pub reaction: ReactionOrchestrator,
    pub search: SearchResolver,
    pub assistant: AssistantPanel,
    pub status: String,
    /// Latest reaction chain lookup, rendered as `A → B → C`.
    pub chain: Option<Result<Vec<String>, String>>,
    pub chain_seq: RequestSeq,
}

impl AppState {
    pub fn new(catalog: Catalog, voice_supported: bool) -> Self {
        let selection = SelectionStore::default();
        let mut tumbler = TumblerView::default();
        tumbler.show_selection(&selection);
        Self {
            catalog,
            selection,
            tumbler,
            drag: DragDropController::default(),
            reaction: ReactionOrchestrator::default(),
            search: SearchResolver::default(),
            assistant: AssistantPanel::new(voice_supported),
            status: String::new(),
            chain: None,
            chain_seq: RequestSeq::default(),
        }
    }

    pub fn with_swap_delay(mut self, delay: Duration) -> Self {
        self.reaction = ReactionOrchestrator::with_swap_delay(delay);
        self
    }

    /// Store mutations repaint the tumbler immediately.
    pub fn add_to_tumbler(&mut self, item: SelectableItem) -> bool {
        let formula = item.formula.clone();
        let added = self.selection.add(item);
        if added {
            self.tumbler.show_selection(&self.selection);
        } else {
            debug!(%formula, "item already in tumbler");
        }
        added
    }

    pub fn remove_from_tumbler(&mut self, formula: &str) -> bool {
        let removed = self.selection.remove(formula);
        if removed {
            self.tumbler.show_selection(&self.selection);
        }
        removed
    }

    /// Clears the selection and shows the reaction products in its place.
    pub fn complete_reaction(&mut self, products: &[Product]) {
        self.selection.reset();
        self.tumbler.show_products(products);
    }
}
