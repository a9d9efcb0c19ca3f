//! Domain types: configuration and the phase schedule.

pub mod config;
pub mod phase;
