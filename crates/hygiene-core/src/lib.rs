//! Hygiene Core — shared domain abstractions.
//!
//! Traits and small value types that the content catalog and the merge
//! workflow both depend on: identifiers, errors, events, commands, and the
//! time seams (wall clock and commit delay) that tests replace.

pub mod aggregate;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod id;
pub mod telemetry;
pub mod time;
