//! Code Hygiene merge narrative — conflict resolution.
//!
//! Owns the per-section resolution state, the metrics derived from it, and
//! the delayed commit workflow that funnels user choices into the state.

pub mod application;
pub mod domain;
