//! Interaction state: selection store, tumbler view, drag-drop, reaction
//! orchestration, animation plans, search and the assistant panel.

pub mod animation;
pub mod app;
pub mod assistant;
pub mod dragdrop;
pub mod reaction;
pub mod search;
pub mod selection;

pub use app::AppState;
