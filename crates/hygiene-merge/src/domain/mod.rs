//! Domain model for the merge session.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod metrics;
pub mod resolved;
pub mod status;
