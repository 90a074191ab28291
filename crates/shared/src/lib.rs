//! Domain and wire types shared by the tumbler client crates.

pub mod domain;
pub mod error;
pub mod protocol;
