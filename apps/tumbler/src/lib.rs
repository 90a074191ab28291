//! Interaction layer of the chemistry tumbler: state objects, the event
//! reducer and the backend worker that executes its commands.

pub mod backend_bridge;
pub mod config;
pub mod controller;
pub mod ui;
