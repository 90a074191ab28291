//! Controller layer: UI events, the reducer and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;

pub use orchestration::Controller;
